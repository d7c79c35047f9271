//! Core plugin: shared resources, the fixed-step ordering and pausing.
//!
//! ```text
//!   FixedUpdate      Drain ─► React ─► Advance ─► Sync
//!   FixedPostUpdate  (avian) ─► Resolve ─► Respond ─► Tally
//! ```
//!
//! Everything here only runs in `GameState::InGame` while `Simulation::Running`, so splines,
//! strafing and tasks all hold still while paused.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::{GameState, Simulation};
use crate::common::tunables::Tunables;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Move pushed events into this tick's view.
    Drain,
    /// Subscribers react to the drained events.
    React,
    /// Tasks, state machines, motion.
    Advance,
    /// Presentation and physics inputs derived from gameplay state.
    Sync,
}

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactSet {
    /// Raw overlaps become hitbox contacts.
    Resolve,
    /// Owners respond to their contacts.
    Respond,
    /// Global tallies (score, lives).
    Tally,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.06)));

    app.configure_sets(
        FixedUpdate,
        (
            GameplaySet::Drain,
            GameplaySet::React,
            GameplaySet::Advance,
            GameplaySet::Sync,
        )
            .chain()
            .run_if(in_state(GameState::InGame))
            .run_if(in_state(Simulation::Running)),
    );

    app.configure_sets(
        FixedPostUpdate,
        (ContactSet::Resolve, ContactSet::Respond, ContactSet::Tally)
            .chain()
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame))
            .run_if(in_state(Simulation::Running)),
    );

    app.add_systems(Update, toggle_pause.run_if(in_state(GameState::InGame)));
}

fn toggle_pause(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    state: Res<State<Simulation>>,
    mut next: ResMut<NextState<Simulation>>,
) {
    let Some(keys) = keys else { return; };
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }

    let target = match state.get() {
        Simulation::Running => Simulation::Paused,
        Simulation::Paused => Simulation::Running,
    };
    info!("[core] simulation {:?}", target);
    next.set(target);
}
