//! Feature plugins.

use bevy::prelude::*;

pub mod audio;
pub mod collider;
pub mod core;
pub mod enemies;
pub mod events;
pub mod motion;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod scoreboard;
pub mod tasks;

// Render-only
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    events::plugin(app);
    audio::plugin(app);
    motion::plugin(app);
    collider::plugin(app);
    projectiles::plugin(app);
    enemies::plugin(app);
    player::plugin(app);
    scoreboard::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    lighting::plugin(app);
    audio::playback_plugin(app);
    collider::debug_plugin(app);
}
