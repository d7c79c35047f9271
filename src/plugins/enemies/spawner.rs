//! The wave roster: who exists, and when each of them first flies in.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use super::components::{
    Echelon, EchelonMember, Enemy, EnemyId, EnemyIds, EnemyKind, EnemyTasks, Explosion, Flight,
};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::collider::{sensor_body, Hitbox, HitboxKind};
use crate::plugins::events::{EventCode, GameEvent};
use crate::plugins::motion::ScreenBody;
use crate::plugins::projectiles::pool::{self, ENEMY_FIRING_WINDOW, ENEMY_POOL_CAPACITY};
use crate::plugins::tasks::TimedTask;

pub const ECHELON_MEMBERS: usize = 5;
pub const DRONE_MEMBERS: usize = 3;
pub const STANDARD_ENEMIES: usize = 2;

const FIRST_SPAWN_MS: u64 = 500;
const SPAWN_STAGGER_MS: u64 = 400;

/// First-spawn timeouts still waiting to fire.
#[derive(Resource, Debug, Default)]
pub struct Roster {
    pending: Vec<(Entity, TimedTask)>,
}

impl Roster {
    /// Schedule `ENEMY_SPAWNED` for `entity` after `delay`.
    pub fn schedule(&mut self, entity: Entity, delay: Duration) {
        let mut task = TimedTask::timeout(delay);
        task.start();
        self.pending.push((entity, task));
    }

    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn pause_all(&mut self) {
        for (_, task) in &mut self.pending {
            task.pause();
        }
    }

    pub fn unpause_all(&mut self) {
        for (_, task) in &mut self.pending {
            task.unpause();
        }
    }
}

/// Build one wave: a five-strong echelon, three drones, two standard enemies and a special.
pub fn spawn_wave(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut ids: ResMut<EnemyIds>,
    mut roster: ResMut<Roster>,
) {
    let t = &*tunables;
    let mut order = Vec::new();

    let echelon = spawn_echelon(&mut commands, t, "Echelon", Vec2::new(250.0, 230.0), ECHELON_MEMBERS);
    for i in 0..ECHELON_MEMBERS {
        let member = EchelonMember::new(echelon, i);
        order.push(spawn_enemy(&mut commands, t, ids.next_id(), EnemyKind::Echelon, Some(member)));
    }

    let drones = spawn_echelon(&mut commands, t, "DroneEchelon", Vec2::new(300.0, 80.0), DRONE_MEMBERS);
    for i in 0..DRONE_MEMBERS {
        let member = EchelonMember::new(drones, i);
        order.push(spawn_enemy(&mut commands, t, ids.next_id(), EnemyKind::Drone, Some(member)));
    }

    for _ in 0..STANDARD_ENEMIES {
        order.push(spawn_enemy(&mut commands, t, ids.next_id(), EnemyKind::Standard, None));
    }
    order.push(spawn_enemy(&mut commands, t, ids.next_id(), EnemyKind::Special, None));

    for (i, entity) in order.into_iter().enumerate() {
        let delay = FIRST_SPAWN_MS + SPAWN_STAGGER_MS * i as u64;
        roster.schedule(entity, Duration::from_millis(delay));
    }

    info!("[spawner] wave ready: {} enemies", roster.pending());
}

fn spawn_echelon(
    commands: &mut Commands,
    t: &Tunables,
    name: &'static str,
    position: Vec2,
    members: usize,
) -> Entity {
    commands
        .spawn((
            Name::new(name),
            Echelon {
                position,
                spacing: t.echelon_spacing,
                speed: t.echelon_speed,
                direction: -1.0,
                members,
                member_width: t.enemy_size.x,
            },
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Spawn an idle, hidden enemy with its projectile pool.
pub fn spawn_enemy(
    commands: &mut Commands,
    t: &Tunables,
    id: EnemyId,
    kind: EnemyKind,
    member: Option<EchelonMember>,
) -> Entity {
    let size = t.enemy_size;
    let hitbox = Hitbox::new(HitboxKind::Enemy);
    let flight = Flight::for_kind(kind, t);
    let start = flight.entrance.start();

    let mut entity = commands.spawn((
        Name::new(id.to_string()),
        Enemy::new(id, kind, t.enemy_speed),
        EnemyTasks::from_tunables(t),
        flight,
        Explosion::new(Duration::from_secs_f32(t.explosion_secs)),
        ScreenBody::new(start, size),
        hitbox,
        Sprite {
            color: kind.color(),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
        Visibility::Hidden,
        sensor_body(size, &hitbox),
        DespawnOnExit(GameState::InGame),
    ));
    if let Some(member) = member {
        entity.insert(member);
    }
    let owner = entity.id();

    let pool = pool::spawn_pool(
        commands,
        owner,
        HitboxKind::EnemyProjectile,
        ENEMY_POOL_CAPACITY,
        ENEMY_FIRING_WINDOW,
        t.projectile_size,
        Color::srgb(1.0, 0.45, 0.3),
    );
    commands.entity(owner).insert(pool);

    owner
}

/// Push `ENEMY_SPAWNED` for every roster entry whose delay ran out.
pub fn tick_roster(time: Res<Time>, mut roster: ResMut<Roster>, mut bus: MessageWriter<GameEvent>) {
    let dt = time.delta();

    for (entity, task) in &mut roster.pending {
        if task.tick(dt) > 0 {
            bus.write(GameEvent::to(EventCode::EnemySpawned, *entity));
        }
    }
    roster.pending.retain(|(_, task)| task.is_pending());
}
