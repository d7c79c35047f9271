//! Fixed-capacity projectile arena.
//!
//! Every slot is spawned once, up front, and recycled forever: firing flips a slot to
//! `fired`, going off-screen or hitting something flips it back. Nothing is spawned or
//! despawned per shot.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use super::components::{Projectile, ProjectilePool};
use crate::common::screen::SCREEN_SIZE;
use crate::common::state::GameState;
use crate::plugins::collider::{sensor_body, Hitbox, HitboxKind};
use crate::plugins::motion::ScreenBody;

pub const ENEMY_POOL_CAPACITY: usize = 50;
pub const ENEMY_FIRING_WINDOW: usize = 25;
pub const PLAYER_POOL_CAPACITY: usize = 16;

/// Projectile slot data, disjoint from any shooter (shooters carry the pool).
pub type ProjectileSlots<'w, 's> = Query<
    'w,
    's,
    (&'static mut Projectile, &'static mut ScreenBody, &'static mut Hitbox),
    Without<ProjectilePool>,
>;

/// Parking spot for idle slots, well outside the screen.
const PARKED: Vec2 = Vec2::new(-SCREEN_SIZE.x, -SCREEN_SIZE.y);

impl ProjectilePool {
    pub fn new(slots: Vec<Entity>, window: usize) -> Self {
        let window = window.min(slots.len());
        Self { slots, window, cursor: 0 }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn window(&self) -> usize {
        self.window
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn slots(&self) -> &[Entity] {
        &self.slots
    }

    /// Claim the next slot that is not in flight.
    ///
    /// Scans the firing window once, starting at the cursor and skipping slots still in
    /// flight. When every slot in the window is in flight nothing changes and `None` is
    /// returned.
    pub fn next_slot(&mut self, mut in_flight: impl FnMut(Entity) -> bool) -> Option<Entity> {
        for step in 0..self.window {
            let i = (self.cursor + step) % self.window;
            let e = self.slots[i];
            if !in_flight(e) {
                self.cursor = (i + 1) % self.window;
                return Some(e);
            }
        }
        None
    }
}

/// Everything a launch needs, in screen space.
#[derive(Debug, Clone, Copy)]
pub struct Shot {
    /// Centre the projectile starts on.
    pub origin: Vec2,
    /// Point it flies towards (and past).
    pub target: Vec2,
    pub speed: f32,
    pub rotation: f32,
}

/// Spawn `capacity` idle slots for `owner` and return the pool to attach to it.
pub fn spawn_pool(
    commands: &mut Commands,
    owner: Entity,
    kind: HitboxKind,
    capacity: usize,
    window: usize,
    size: Vec2,
    color: Color,
) -> ProjectilePool {
    let hitbox = Hitbox::new(kind);
    let slots = (0..capacity)
        .map(|i| {
            commands
                .spawn((
                    Name::new(format!("Projectile(Pooled {i})")),
                    Projectile::idle(owner),
                    ScreenBody::new(PARKED, size),
                    hitbox,
                    Sprite {
                        color,
                        custom_size: Some(size),
                        ..default()
                    },
                    Transform::from_xyz(0.0, 0.0, 2.0),
                    Visibility::Hidden,
                    sensor_body(size, &hitbox),
                    DespawnOnExit(GameState::InGame),
                ))
                .id()
        })
        .collect();

    ProjectilePool::new(slots, window)
}

/// Put an idle slot in flight.
pub fn launch(projectile: &mut Projectile, body: &mut ScreenBody, hitbox: &mut Hitbox, shot: Shot) {
    let dir = (shot.target - shot.origin).try_normalize().unwrap_or(Vec2::Y);

    projectile.fired = true;
    projectile.target = shot.target;
    projectile.velocity = dir * shot.speed;

    body.position = shot.origin - body.size * 0.5;
    body.rotation = shot.rotation;

    hitbox.active = true;
    hitbox.track(body.rect());
}

/// Return a slot to idle.
pub fn ground(projectile: &mut Projectile, hitbox: &mut Hitbox) {
    projectile.fired = false;
    projectile.velocity = Vec2::ZERO;
    hitbox.active = false;
}

/// Fire the next free slot of `pool`. `None` when the firing window is exhausted.
pub fn fire_from_pool(pool: &mut ProjectilePool, slots: &mut ProjectileSlots, shot: Shot) -> Option<Entity> {
    let slot = pool.next_slot(|e| {
        let (projectile, _, _) = slots
            .get(e)
            .expect("ProjectilePool contained an entity missing projectile components");
        projectile.fired
    })?;

    let (mut projectile, mut body, mut hitbox) = slots
        .get_mut(slot)
        .expect("ProjectilePool contained an entity missing projectile components");
    launch(&mut projectile, &mut body, &mut hitbox, shot);

    Some(slot)
}
