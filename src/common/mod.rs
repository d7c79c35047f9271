//! Common, shared types.

pub mod layers;
pub mod screen;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
