//! Screen-space placement and the world transform sync.

pub mod spline;

use bevy::prelude::*;

use crate::common::screen::{rect_at, to_world};
use crate::plugins::core::GameplaySet;

/// Where an entity is on the logical screen.
///
/// `position` is the top-left corner of the entity's rectangle, `rotation` is in
/// clockwise screen degrees.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ScreenBody {
    pub position: Vec2,
    pub size: Vec2,
    pub rotation: f32,
}

impl ScreenBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size, rotation: 0.0 }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        rect_at(self.position, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, sync_transforms.in_set(GameplaySet::Sync));
}

/// Copy screen placement into `Transform` (keeps z and scale).
pub fn sync_transforms(mut q: Query<(&ScreenBody, &mut Transform)>) {
    for (body, mut tf) in &mut q {
        let world = to_world(body.center());
        tf.translation.x = world.x;
        tf.translation.y = world.y;
        tf.rotation = Quat::from_rotation_z(-body.rotation.to_radians());
    }
}
