use bevy::prelude::*;

/// One reusable shot. Lives in its owner's `ProjectilePool` for the whole game.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub owner: Entity,
    pub fired: bool,
    pub velocity: Vec2,
    pub target: Vec2,
}

impl Projectile {
    pub fn idle(owner: Entity) -> Self {
        Self {
            owner,
            fired: false,
            velocity: Vec2::ZERO,
            target: Vec2::ZERO,
        }
    }
}

/// Pre-spawned projectile slots owned by one shooter.
///
/// Shots are taken from the first `window` slots only, round-robin from `cursor`.
#[derive(Component, Debug, Clone)]
pub struct ProjectilePool {
    pub(super) slots: Vec<Entity>,
    pub(super) window: usize,
    pub(super) cursor: usize,
}
