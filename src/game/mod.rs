//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: DefaultPlugins (window, render, audio, logging) + every game plugin.
//! - `configure_headless`: gameplay only, for integration tests.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::screen::SCREEN_SIZE;
use crate::common::state::{GameState, Simulation};
use crate::plugins;

/// Gameplay tick rate.
pub const FIXED_HZ: f64 = 60.0;

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    let default_plugins = DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: "Echelon Shooter".into(),
                resolution: WindowResolution::new(SCREEN_SIZE.x as u32, SCREEN_SIZE.y as u32),
                resizable: false,
                ..default()
            }),
            ..default()
        })
        .set(LogPlugin {
            filter: "wgpu=error,naga=warn,echelon_shooter=info".into(),
            ..default()
        });

    app.add_plugins(default_plugins);

    configure_game(app);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add render-only plugins (Firefly/camera/audio playback).
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.insert_resource(Time::<Fixed>::from_hz(FIXED_HZ));
    app.init_state::<GameState>();
    app.init_state::<Simulation>();
    plugins::register_gameplay(app);
}
