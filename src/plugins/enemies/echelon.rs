//! Formations: the echelon strafes as one body and carries its synced members with it.

use bevy::prelude::*;

use super::components::{Echelon, EchelonMember, EchelonState, Enemy, EnemyKind, EnemyTasks};
use super::lifecycle;
use crate::common::tunables::Tunables;

/// Where member `index` of `echelon` belongs. A dangling link yields the origin.
pub fn slot_position(echelon: Option<&Echelon>, index: usize) -> Vec2 {
    match echelon {
        Some(echelon) => echelon.slot(index),
        None => {
            trace!("[echelon] member {index} has no formation, slot at origin");
            Vec2::ZERO
        }
    }
}

/// Strafe every formation between the left bound and the right bound minus its width.
pub fn advance_echelons(time: Res<Time>, tunables: Res<Tunables>, mut q: Query<&mut Echelon>) {
    let dt = time.delta_secs();

    for mut echelon in &mut q {
        let min = tunables.strafe_left_bound;
        let max = (tunables.strafe_right_bound - echelon.width()).max(min);

        let step = echelon.direction * echelon.speed * dt;
        echelon.position.x += step;

        if echelon.position.x <= min {
            echelon.position.x = min;
            echelon.direction = 1.0;
        } else if echelon.position.x >= max {
            echelon.position.x = max;
            echelon.direction = -1.0;
        }
    }
}

/// Plain echelon members wait in formation until every spawned member has synced,
/// then the waiting ones engage together.
pub fn engage_synced_members(
    echelons: Query<(Entity, &Echelon)>,
    mut members: Query<(&mut Enemy, &mut EnemyTasks, &mut EchelonMember)>,
) {
    for (formation, echelon) in &echelons {
        let in_formation = |enemy: &Enemy, member: &EchelonMember| {
            enemy.kind == EnemyKind::Echelon && enemy.active && member.echelon == Some(formation)
        };

        let mut waiting = 0;
        let mut all_synced = true;
        for (enemy, _, member) in &members {
            if !in_formation(enemy, member) {
                continue;
            }
            if member.state != EchelonState::Synced {
                all_synced = false;
                break;
            }
            if !member.engaged {
                waiting += 1;
            }
        }

        if !all_synced || waiting == 0 {
            continue;
        }

        let state = echelon.strafing_state();
        for (mut enemy, mut tasks, mut member) in &mut members {
            if !in_formation(&*enemy, &*member) || member.engaged {
                continue;
            }
            member.engaged = true;
            lifecycle::engage(&mut enemy, &mut tasks, state);
        }
    }
}
