//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime.
//! - `echelon_shooter::game::configure_headless` installs the gameplay plugins.
//! - Time advances by exactly one fixed step per `app.update()`.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use echelon_shooter::game::FIXED_HZ;
use echelon_shooter::plugins::enemies::{Enemy, EnemyKind};

pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists for avian.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    echelon_shooter::game::configure_headless(&mut app);

    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / FIXED_HZ,
    )));

    // `App::run` normally does this; plugins such as avian register resources in `finish`.
    app.finish();
    app.cleanup();
    app
}

/// Update until `done` holds, at most `max_frames` times. Returns whether it held.
pub fn run_until(app: &mut App, max_frames: u32, mut done: impl FnMut(&mut World) -> bool) -> bool {
    for _ in 0..max_frames {
        app.update();
        if done(app.world_mut()) {
            return true;
        }
    }
    false
}

pub fn run_frames(app: &mut App, frames: u32) {
    for _ in 0..frames {
        app.update();
    }
}

/// First enemy of `kind` in the wave.
pub fn first_of_kind(world: &mut World, kind: EnemyKind) -> Entity {
    world
        .query::<(Entity, &Enemy)>()
        .iter(world)
        .find(|(_, enemy)| enemy.kind == kind)
        .map(|(e, _)| e)
        .expect("wave contains this kind")
}
