//! Player ship: the target enemies aim at.
//!
//! Pipeline:
//! - Update: sample input into `PlayerInput` (fire presses are latched until consumed)
//! - FixedUpdate / Advance: move, fire, tick the respawn timeout, publish `PlayerPosition`
//! - FixedPostUpdate / Respond: enemy or enemy projectile contact destroys the ship
//!
//! Destruction broadcasts `PLAYER_DESTROYED` (enemies turn passive); the respawn timeout
//! broadcasts `PLAYER_COMPLETE_SPAWN` (enemies turn active again).

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::screen::SCREEN_SIZE;
use crate::common::state::{GameState, Simulation};
use crate::common::tunables::Tunables;
use crate::plugins::collider::{sensor_body, Hitbox, HitboxContact, HitboxKind};
use crate::plugins::core::{ContactSet, GameplaySet};
use crate::plugins::events::{EventCode, GameEvent, UserEvent};
use crate::plugins::motion::ScreenBody;
use crate::plugins::projectiles::pool::{self, ProjectileSlots, Shot, PLAYER_POOL_CAPACITY};
use crate::plugins::projectiles::ProjectilePool;
use crate::plugins::tasks::TimedTask;

/// Centre of the ship when it (re)spawns.
pub const PLAYER_SPAWN: Vec2 = Vec2::new(400.0, 540.0);

#[derive(Component, Debug, Clone)]
pub struct Player {
    pub alive: bool,
    respawn: TimedTask,
}

impl Player {
    pub fn new(respawn: Duration) -> Self {
        Self {
            alive: true,
            respawn: TimedTask::timeout(respawn),
        }
    }

    #[inline]
    pub fn respawn_pending(&self) -> bool {
        self.respawn.is_pending()
    }
}

/// Centre of the player ship in screen space. Enemies aim here.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayerPosition(pub Vec2);

impl Default for PlayerPosition {
    fn default() -> Self {
        Self(PLAYER_SPAWN)
    }
}

#[derive(Resource, Default, Debug)]
struct PlayerInput {
    move_axis: Vec2,
    fire: bool,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .init_resource::<PlayerPosition>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, gather_input.run_if(in_state(GameState::InGame)))
        .add_systems(
            FixedUpdate,
            (apply_movement, fire, tick_respawn, publish_position)
                .chain()
                .in_set(GameplaySet::Advance),
        )
        .add_systems(FixedUpdate, present_player.in_set(GameplaySet::Sync))
        .add_systems(FixedPostUpdate, respond_to_contacts.in_set(ContactSet::Respond))
        .add_systems(OnEnter(Simulation::Paused), pause_respawn)
        .add_systems(OnExit(Simulation::Paused), unpause_respawn);
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let size = tunables.player_size;
    let mut hitbox = Hitbox::new(HitboxKind::Player);
    hitbox.active = true;

    let owner = commands
        .spawn((
            Name::new("Player"),
            Player::new(Duration::from_millis(tunables.player_respawn_ms)),
            ScreenBody::new(PLAYER_SPAWN - size * 0.5, size),
            hitbox,
            Sprite {
                color: Color::srgb(0.2, 0.75, 0.9),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 1.0),
            Visibility::Visible,
            sensor_body(size, &hitbox),
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    let pool = pool::spawn_pool(
        &mut commands,
        owner,
        HitboxKind::Projectile,
        PLAYER_POOL_CAPACITY,
        PLAYER_POOL_CAPACITY,
        tunables.projectile_size,
        Color::srgb(0.6, 0.95, 1.0),
    );
    commands.entity(owner).insert(pool);
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else { return; };
    let mut axis = Vec2::ZERO;

    // Screen space: y grows downwards.
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
    if keys.just_pressed(KeyCode::Space) {
        input.fire = true;
    }
}

fn apply_movement(
    time: Res<Time>,
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q: Query<(&Player, &mut ScreenBody)>,
) {
    let Ok((player, mut body)) = q.single_mut() else {
        return;
    };
    if !player.alive {
        return;
    }

    let step = input.move_axis * tunables.player_speed * time.delta_secs();
    let max = SCREEN_SIZE - body.size;
    body.position = (body.position + step).clamp(Vec2::ZERO, max);
}

fn fire(
    tunables: Res<Tunables>,
    mut input: ResMut<PlayerInput>,
    mut q: Query<(&Player, &ScreenBody, &mut ProjectilePool)>,
    mut slots: ProjectileSlots,
) {
    if !std::mem::take(&mut input.fire) {
        return;
    }
    let Ok((player, body, mut pool)) = q.single_mut() else {
        return;
    };
    if !player.alive {
        return;
    }

    let origin = body.center();
    let shot = Shot {
        origin,
        target: Vec2::new(origin.x, -SCREEN_SIZE.y),
        speed: tunables.player_projectile_speed,
        rotation: 0.0,
    };
    if pool::fire_from_pool(&mut pool, &mut slots, shot).is_none() {
        debug!("[player] no projectile available");
    }
}

fn tick_respawn(
    time: Res<Time>,
    mut bus: MessageWriter<GameEvent>,
    mut q: Query<(&mut Player, &mut ScreenBody, &mut Hitbox)>,
) {
    let Ok((mut player, mut body, mut hitbox)) = q.single_mut() else {
        return;
    };
    if player.respawn.tick(time.delta()) == 0 {
        return;
    }

    player.alive = true;
    body.position = PLAYER_SPAWN - body.size * 0.5;
    hitbox.active = true;
    hitbox.track(body.rect());

    info!("[player] respawned");
    bus.write(GameEvent::broadcast(EventCode::PlayerCompleteSpawn));
}

fn publish_position(q: Query<(&Player, &ScreenBody)>, mut position: ResMut<PlayerPosition>) {
    let Ok((player, body)) = q.single() else {
        return;
    };
    if player.alive {
        position.set_if_neq(PlayerPosition(body.center()));
    }
}

fn respond_to_contacts(
    mut contacts: MessageReader<HitboxContact>,
    mut q: Query<(&mut Player, &mut Hitbox)>,
    mut bus: MessageWriter<GameEvent>,
    mut user: MessageWriter<UserEvent>,
) {
    for contact in contacts.read() {
        let Ok((mut player, mut hitbox)) = q.get_mut(contact.entity) else {
            continue;
        };
        if !player.alive || !hitbox.active {
            continue;
        }

        player.alive = false;
        hitbox.active = false;
        player.respawn.start();

        info!("[player] destroyed by {:?}", contact.other_kind);
        bus.write(GameEvent::broadcast(EventCode::PlayerDestroyed));
        user.write(UserEvent::DecrementLife);
    }
}

/// Hide the ship while it waits to respawn.
pub fn present_player(mut q: Query<(&Player, &mut Visibility), Changed<Player>>) {
    for (player, mut vis) in &mut q {
        *vis = if player.alive {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

fn pause_respawn(mut q: Query<&mut Player>) {
    for mut player in &mut q {
        player.respawn.pause();
    }
}

fn unpause_respawn(mut q: Query<&mut Player>) {
    for mut player in &mut q {
        player.respawn.unpause();
    }
}

#[cfg(test)]
mod tests;
