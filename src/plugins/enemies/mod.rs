//! Enemies: the lifecycle state machine and its four variants.
//!
//! ```text
//!   Idle ──SPAWNED / COMPLETE_EXIT──► Entering ──entrance done──► StrafingLeft ⇄ StrafingRight
//!                                        │                              │
//!                                        └──────── BEGIN_EXIT ──────────┴──► Exiting ──exit done──► Idle
//!   any engaged state ──DESTROYED──► Destroyed ──explosion done──► Idle (respawn timeout armed)
//! ```
//!
//! Variants share this machine and differ only where noted on `EnemyKind`:
//! echelon members follow their formation while `Synced`, drones engage as soon as they
//! arrive, and the special enemy loops one long pass instead of strafing.
//!
//! Per fixed tick:
//! - React: `react_to_events`, then `fire_missiles` (reads the drained bus).
//! - Advance: roster and task timers push events for the next tick, formations move,
//!   then every enemy moves according to its state.
//! - Sync: sprite visibility and the explosion animation.
//! - Respond (after physics): contacts become `ENEMY_DESTROYED` pushes.

pub mod components;
pub mod echelon;
pub mod lifecycle;
pub mod spawner;

use bevy::prelude::*;

use crate::common::screen::{is_off_screen, look_at_degrees};
use crate::common::state::{GameState, Simulation};
use crate::common::tunables::Tunables;
use crate::plugins::audio::SoundCue;
use crate::plugins::collider::{Hitbox, HitboxContact, HitboxKind};
use crate::plugins::core::{ContactSet, GameplaySet};
use crate::plugins::events::{EventCode, FrameEvents, GameEvent, UserEvent};
use crate::plugins::motion::ScreenBody;
use crate::plugins::player::PlayerPosition;
use crate::plugins::projectiles::pool::{self, ProjectileSlots, Shot};
use crate::plugins::projectiles::ProjectilePool;

pub use components::{
    Aggression, Echelon, EchelonMember, EchelonState, Enemy, EnemyId, EnemyIds, EnemyKind,
    EnemyState, EnemyTasks, Explosion, Flight,
};

/// Added to the look-at heading so sprites and shots face their direction of travel.
const FACING_OFFSET_DEGREES: f32 = 90.0;
/// Strafing enemies face straight down.
const STRAFE_ROTATION: f32 = 180.0;

type EnemyParts = (
    &'static mut Enemy,
    &'static mut EnemyTasks,
    &'static mut Flight,
    &'static mut ScreenBody,
    &'static mut Hitbox,
    &'static mut Explosion,
    Option<&'static mut EchelonMember>,
);

pub fn plugin(app: &mut App) {
    app.init_resource::<EnemyIds>()
        .init_resource::<spawner::Roster>();

    app.add_systems(OnEnter(GameState::InGame), spawner::spawn_wave);

    app.add_systems(
        FixedUpdate,
        (react_to_events, fire_missiles)
            .chain()
            .in_set(GameplaySet::React),
    );
    app.add_systems(
        FixedUpdate,
        (
            spawner::tick_roster,
            tick_enemy_tasks,
            echelon::advance_echelons,
            echelon::engage_synced_members,
            advance_enemies,
        )
            .chain()
            .in_set(GameplaySet::Advance),
    );
    app.add_systems(FixedUpdate, present_enemies.in_set(GameplaySet::Sync));
    app.add_systems(FixedPostUpdate, respond_to_contacts.in_set(ContactSet::Respond));

    app.add_systems(OnEnter(Simulation::Paused), pause_enemy_tasks);
    app.add_systems(OnExit(Simulation::Paused), unpause_enemy_tasks);
}

/// Apply this tick's events, in push order.
pub fn react_to_events(frame: Res<FrameEvents>, mut q: Query<EnemyParts>) {
    for ev in frame.iter() {
        let Some(target) = ev.target else {
            let aggression = match ev.code {
                EventCode::PlayerDestroyed => Aggression::Passive,
                EventCode::PlayerCompleteSpawn => Aggression::Active,
                _ => continue,
            };
            for (mut enemy, ..) in &mut q {
                enemy.aggression = aggression;
            }
            trace!("[enemy] aggression -> {:?}", aggression);
            continue;
        };

        let Ok((mut enemy, mut tasks, mut flight, mut body, mut hitbox, mut explosion, mut member)) =
            q.get_mut(target)
        else {
            continue;
        };

        match ev.code {
            EventCode::EnemySpawned | EventCode::EnemyCompleteExit => lifecycle::spawn(
                &mut enemy,
                &mut tasks,
                &mut flight,
                &mut body,
                &mut hitbox,
                &mut explosion,
                member.as_deref_mut(),
            ),
            EventCode::EnemyBeginExit => lifecycle::begin_exit(&mut enemy, &mut tasks, &mut flight, &body),
            EventCode::EnemyDestroyed => {
                lifecycle::destroy(
                    &mut enemy,
                    &mut tasks,
                    &mut hitbox,
                    &mut explosion,
                    member.as_deref_mut(),
                );
            }
            _ => {}
        }
    }
}

/// Handle `ENEMY_FIRE_MISSILE`: aim at the player and launch from the pool.
pub fn fire_missiles(
    frame: Res<FrameEvents>,
    tunables: Res<Tunables>,
    player: Res<PlayerPosition>,
    mut shooters: Query<(&Enemy, &ScreenBody, &mut ProjectilePool)>,
    mut slots: ProjectileSlots,
) {
    for ev in frame.iter().filter(|ev| ev.code == EventCode::EnemyFireMissile) {
        let Some(target) = ev.target else { continue; };
        let Ok((enemy, body, mut pool)) = shooters.get_mut(target) else {
            continue;
        };
        if !enemy.active || enemy.aggression != Aggression::Active {
            continue;
        }

        let origin = body.center();
        let shot = Shot {
            origin,
            target: player.0,
            speed: tunables.enemy_projectile_speed,
            rotation: look_at_degrees(origin, player.0) + FACING_OFFSET_DEGREES,
        };

        if pool::fire_from_pool(&mut pool, &mut slots, shot).is_none() {
            debug!("[enemy] {} firing window exhausted, shot skipped", enemy.id);
        }
    }
}

/// Poll every enemy's timers and push what fired.
pub fn tick_enemy_tasks(
    time: Res<Time>,
    mut bus: MessageWriter<GameEvent>,
    mut q: Query<(Entity, &Enemy, &mut EnemyTasks, Option<&mut EchelonMember>)>,
) {
    let dt = time.delta();

    for (entity, enemy, mut tasks, member) in &mut q {
        for _ in 0..tasks.fire_missile.tick(dt) {
            bus.write(GameEvent::to(EventCode::EnemyFireMissile, entity));
        }

        if tasks.exit_timeout.tick(dt) > 0 {
            if let Some(mut member) = member {
                member.state = EchelonState::Solo;
            }
            trace!("[enemy] {} exit timeout", enemy.id);
            bus.write(GameEvent::to(EventCode::EnemyBeginExit, entity));
        }

        if tasks.respawn_timeout.tick(dt) > 0 {
            trace!("[enemy] {} respawn timeout", enemy.id);
            bus.write(GameEvent::to(EventCode::EnemyCompleteExit, entity));
        }
    }
}

/// Move every enemy according to its state.
pub fn advance_enemies(
    time: Res<Time>,
    tunables: Res<Tunables>,
    echelons: Query<&Echelon>,
    mut q: Query<EnemyParts>,
) {
    let dt = time.delta();

    for (mut enemy, mut tasks, mut flight, mut body, mut hitbox, mut explosion, mut member) in &mut q {
        let formation = member
            .as_ref()
            .and_then(|m| m.echelon)
            .and_then(|e| echelons.get(e).ok());

        if let Some(member) = member.as_deref() {
            let slot = echelon::slot_position(formation, member.index);
            match member.state {
                EchelonState::Synced => {
                    body.position = slot;
                    body.rotation = STRAFE_ROTATION;
                    continue;
                }
                EchelonState::Solo if enemy.state == EnemyState::Entering => {
                    flight.entrance.set_final_position(slot);
                }
                EchelonState::Solo => {}
            }
        }

        match enemy.state {
            EnemyState::StrafingLeft => {
                body.rotation = STRAFE_ROTATION;
                if body.position.x > tunables.strafe_left_bound - body.size.x {
                    body.position.x -= enemy.speed * dt.as_secs_f32();
                } else {
                    enemy.state = EnemyState::StrafingRight;
                }
            }
            EnemyState::StrafingRight => {
                body.rotation = STRAFE_ROTATION;
                if body.position.x < tunables.strafe_right_bound {
                    body.position.x += enemy.speed * dt.as_secs_f32();
                } else {
                    enemy.state = EnemyState::StrafingLeft;
                }
            }
            EnemyState::Entering if enemy.kind == EnemyKind::Special => {
                let progress = flight.entrance.update(dt);
                steer(&mut body, progress.position());

                if !is_off_screen(body.rect()) {
                    enemy.entered_screen = true;
                } else if enemy.entered_screen {
                    lifecycle::spawn(
                        &mut enemy,
                        &mut tasks,
                        &mut flight,
                        &mut body,
                        &mut hitbox,
                        &mut explosion,
                        member.as_deref_mut(),
                    );
                } else if progress.just_completed() {
                    trace!("[enemy] {} never entered the screen, staying put", enemy.id);
                }
            }
            EnemyState::Entering => {
                let progress = flight.entrance.update(dt);
                steer(&mut body, progress.position());

                if progress.just_completed() {
                    complete_entrance(&mut enemy, &mut tasks, member.as_deref_mut(), formation);
                }
            }
            EnemyState::Exiting => {
                let progress = flight.exit.update(dt);
                steer(&mut body, progress.position());

                if progress.just_completed() {
                    lifecycle::finish_exit(&mut enemy, &mut tasks, &mut hitbox);
                }
            }
            EnemyState::Destroyed => {
                if explosion.tick(dt) {
                    lifecycle::finish_explosion(&mut enemy, &mut tasks);
                }
            }
            EnemyState::Idle => {}
        }
    }
}

/// Face the next point and move onto it.
fn steer(body: &mut ScreenBody, to: Vec2) {
    if to != body.position {
        body.rotation = look_at_degrees(body.position, to) + FACING_OFFSET_DEGREES;
    }
    body.position = to;
}

fn complete_entrance(
    enemy: &mut Enemy,
    tasks: &mut EnemyTasks,
    member: Option<&mut EchelonMember>,
    formation: Option<&Echelon>,
) {
    match (enemy.kind, member) {
        (EnemyKind::Echelon, Some(member)) => {
            // Engaged later, once the whole formation has synced.
            member.state = EchelonState::Synced;
            trace!("[enemy] {} synced with its echelon", enemy.id);
        }
        (EnemyKind::Drone, Some(member)) => {
            member.state = EchelonState::Synced;
            member.engaged = true;
            let state = formation.map_or(EnemyState::StrafingLeft, Echelon::strafing_state);
            lifecycle::engage(enemy, tasks, state);
        }
        (EnemyKind::Special, _) => {}
        _ => lifecycle::engage(enemy, tasks, EnemyState::StrafingLeft),
    }
}

/// Turn hitbox contacts into destruction. Only the first contact of an active hitbox counts.
pub fn respond_to_contacts(
    mut contacts: MessageReader<HitboxContact>,
    mut q: Query<(&Enemy, &mut Hitbox)>,
    mut bus: MessageWriter<GameEvent>,
    mut user: MessageWriter<UserEvent>,
    mut sounds: MessageWriter<SoundCue>,
) {
    for contact in contacts.read() {
        let Ok((enemy, mut hitbox)) = q.get_mut(contact.entity) else {
            continue;
        };
        if !hitbox.active {
            continue;
        }

        match contact.other_kind {
            HitboxKind::Projectile => {
                hitbox.active = false;
                bus.write(GameEvent::to(EventCode::EnemyDestroyed, contact.entity));
                user.write(UserEvent::IncrementScore);
            }
            HitboxKind::Player => {
                hitbox.active = false;
                sounds.write(SoundCue::ProjectileImpact);
                bus.write(GameEvent::to(EventCode::EnemyDestroyed, contact.entity));
            }
            HitboxKind::Enemy | HitboxKind::EnemyProjectile => continue,
        }

        trace!("[enemy] {} hit by {:?}", enemy.id, contact.other_kind);
    }
}

/// Show active enemies; play the explosion (grow and fade) while destroyed.
pub fn present_enemies(
    mut q: Query<(&Enemy, &Explosion, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    for (enemy, explosion, mut sprite, mut tf, mut vis) in &mut q {
        let exploding = enemy.state == EnemyState::Destroyed && explosion.is_playing();

        vis.set_if_neq(if enemy.active || exploding {
            Visibility::Visible
        } else {
            Visibility::Hidden
        });

        if exploding {
            let t = explosion.progress();
            tf.scale = Vec3::splat(1.0 + t);

            let mut c = Color::srgb(1.0, 0.85, 0.4).to_srgba();
            c.alpha = 1.0 - t;
            sprite.color = c.into();
        } else if tf.scale != Vec3::ONE || sprite.color != enemy.kind.color() {
            tf.scale = Vec3::ONE;
            sprite.color = enemy.kind.color();
        }
    }
}

fn pause_enemy_tasks(mut q: Query<&mut EnemyTasks>, mut roster: ResMut<spawner::Roster>) {
    for mut tasks in &mut q {
        tasks.pause_all();
    }
    roster.pause_all();
}

fn unpause_enemy_tasks(mut q: Query<&mut EnemyTasks>, mut roster: ResMut<spawner::Roster>) {
    for mut tasks in &mut q {
        tasks.unpause_all();
    }
    roster.unpause_all();
}
