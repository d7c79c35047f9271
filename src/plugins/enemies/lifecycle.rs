//! Enemy transitions shared by the event, task and motion systems.
//!
//! Each function checks its own preconditions, so callers can apply them straight from
//! an event without looking at the current state first.

use bevy::prelude::*;

use super::components::{EchelonMember, EchelonState, Enemy, EnemyState, EnemyTasks, Explosion, Flight};
use crate::plugins::collider::Hitbox;
use crate::plugins::motion::ScreenBody;

/// (Re)enter the screen from the start of the entrance curve.
pub fn spawn(
    enemy: &mut Enemy,
    tasks: &mut EnemyTasks,
    flight: &mut Flight,
    body: &mut ScreenBody,
    hitbox: &mut Hitbox,
    explosion: &mut Explosion,
    member: Option<&mut EchelonMember>,
) {
    tasks.cancel_all();
    explosion.stop();
    flight.entrance.reset();
    flight.exit.reset();

    enemy.state = EnemyState::Entering;
    enemy.entered_screen = false;
    body.position = flight.entrance.start();

    hitbox.active = false;
    enemy.active = true;
    hitbox.active = true;
    hitbox.track(body.rect());

    if let Some(member) = member {
        member.state = EchelonState::Solo;
        member.engaged = false;
    }

    trace!("[enemy] {} spawned", enemy.id);
}

/// Blow up. Only engaged enemies can be destroyed; returns whether it happened.
pub fn destroy(
    enemy: &mut Enemy,
    tasks: &mut EnemyTasks,
    hitbox: &mut Hitbox,
    explosion: &mut Explosion,
    member: Option<&mut EchelonMember>,
) -> bool {
    if !enemy.active || !enemy.state.is_engaged() {
        return false;
    }

    tasks.fire_missile.cancel();
    tasks.exit_timeout.cancel();

    enemy.active = false;
    hitbox.active = false;
    enemy.state = EnemyState::Destroyed;
    explosion.start();

    if let Some(member) = member {
        member.state = EchelonState::Solo;
        member.engaged = false;
    }

    trace!("[enemy] {} destroyed", enemy.id);
    true
}

/// Leave the screen along the exit curve, starting from where the enemy is now.
pub fn begin_exit(enemy: &mut Enemy, tasks: &mut EnemyTasks, flight: &mut Flight, body: &ScreenBody) {
    if !enemy.active || !matches!(
        enemy.state,
        EnemyState::Entering | EnemyState::StrafingLeft | EnemyState::StrafingRight
    ) {
        return;
    }

    enemy.state = EnemyState::Exiting;
    tasks.fire_missile.cancel();

    flight.exit.reset();
    flight.exit.set_start_position(body.position);

    trace!("[enemy] {} begins exit", enemy.id);
}

/// Start fighting: strafe in `state`, fire on the interval, leave after the exit timeout.
pub fn engage(enemy: &mut Enemy, tasks: &mut EnemyTasks, state: EnemyState) {
    enemy.state = state;
    tasks.fire_missile.start();
    tasks.arm_exit();

    trace!("[enemy] {} engaged ({:?})", enemy.id, state);
}

pub fn finish_exit(enemy: &mut Enemy, tasks: &mut EnemyTasks, hitbox: &mut Hitbox) {
    enemy.active = false;
    enemy.state = EnemyState::Idle;
    hitbox.active = false;
    tasks.arm_respawn();

    trace!("[enemy] {} exited", enemy.id);
}

pub fn finish_explosion(enemy: &mut Enemy, tasks: &mut EnemyTasks) {
    enemy.state = EnemyState::Idle;
    tasks.arm_respawn();

    trace!("[enemy] {} explosion finished", enemy.id);
}
