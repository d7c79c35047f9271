//! Projectiles: pooled shots for enemies and the player.
//!
//! ```text
//!   owner fires ─► fire_from_pool ─► slot.fired = true, hitbox on
//!   Advance:  advance_projectiles   (move; off-screen ─► ground)
//!   Respond:  ground_on_impact      (HitboxContact ─► ground)
//!   Sync:     present_projectiles   (visibility follows `fired`)
//! ```

pub mod components;
pub mod pool;

use bevy::prelude::*;

use crate::common::screen::is_off_screen;
use crate::plugins::collider::{Hitbox, HitboxContact};
use crate::plugins::core::{ContactSet, GameplaySet};
use crate::plugins::motion::ScreenBody;

pub use components::{Projectile, ProjectilePool};

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, advance_projectiles.in_set(GameplaySet::Advance))
        .add_systems(FixedUpdate, present_projectiles.in_set(GameplaySet::Sync))
        .add_systems(FixedPostUpdate, ground_on_impact.in_set(ContactSet::Respond));
}

/// Move fired projectiles; anything that leaves the screen goes back to idle.
pub fn advance_projectiles(
    time: Res<Time>,
    mut q: Query<(&mut Projectile, &mut ScreenBody, &mut Hitbox)>,
) {
    let dt = time.delta_secs();

    for (mut projectile, mut body, mut hitbox) in &mut q {
        if !projectile.fired {
            continue;
        }

        body.position += projectile.velocity * dt;

        if is_off_screen(body.rect()) {
            pool::ground(&mut projectile, &mut hitbox);
        }
    }
}

/// A projectile that hit something is spent.
pub fn ground_on_impact(
    mut contacts: MessageReader<HitboxContact>,
    mut q: Query<(&mut Projectile, &mut Hitbox)>,
) {
    for contact in contacts.read() {
        let Ok((mut projectile, mut hitbox)) = q.get_mut(contact.entity) else {
            continue;
        };
        if !projectile.fired {
            continue;
        }
        trace!("[projectile] {:?} impact with {:?}", contact.entity, contact.other_kind);
        pool::ground(&mut projectile, &mut hitbox);
    }
}

pub fn present_projectiles(mut q: Query<(&Projectile, &mut Visibility), Changed<Projectile>>) {
    for (projectile, mut vis) in &mut q {
        *vis = if projectile.fired {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

#[cfg(test)]
mod tests;
