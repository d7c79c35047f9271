//! Global state machines.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}

/// Whether the gameplay simulation is ticking.
///
/// Independent of `GameState` so pausing does not trigger `DespawnOnExit(InGame)`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum Simulation {
    #[default]
    Running,
    Paused,
}
