//! Hitboxes: a kind tag plus an `active` switch on top of avian's narrow phase.
//!
//! Avian does the overlap testing (the physics pass). This module decides what an overlap
//! *means*:
//!
//! ```text
//!   FixedPostUpdate
//!   avian ──CollisionStart──► resolve_contacts ──HitboxContact──► owner response systems
//!                              (both active? kinds compatible?)
//! ```
//!
//! Deactivation never changes archetypes: an inactive hitbox keeps its layer membership
//! but its filters are emptied, so avian stops reporting it.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::plugins::core::{ContactSet, GameplaySet};
use crate::plugins::motion::ScreenBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitboxKind {
    Enemy,
    Player,
    /// Fired by the player.
    Projectile,
    EnemyProjectile,
}

impl HitboxKind {
    #[inline]
    pub fn layer(self) -> Layer {
        match self {
            Self::Enemy => Layer::Enemy,
            Self::Player => Layer::Player,
            Self::Projectile => Layer::PlayerProjectile,
            Self::EnemyProjectile => Layer::EnemyProjectile,
        }
    }

    /// Layers this kind reacts to while active.
    fn filters(self) -> LayerMask {
        match self {
            Self::Enemy => LayerMask::from([Layer::Player, Layer::PlayerProjectile]),
            Self::Player => LayerMask::from([Layer::Enemy, Layer::EnemyProjectile]),
            Self::Projectile => LayerMask::from([Layer::Enemy]),
            Self::EnemyProjectile => LayerMask::from([Layer::Player]),
        }
    }

    /// Type compatibility. Symmetric; enemy vs enemy never counts.
    #[inline]
    pub fn interacts_with(self, other: HitboxKind) -> bool {
        self.filters().has_all(other.layer())
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    kind: HitboxKind,
    pub active: bool,
    bounds: Rect,
}

impl Hitbox {
    /// New hitboxes start inactive.
    pub fn new(kind: HitboxKind) -> Self {
        Self {
            kind,
            active: false,
            bounds: Rect::default(),
        }
    }

    #[inline]
    pub fn kind(&self) -> HitboxKind {
        self.kind
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Follow the owner's rectangle. Inactive hitboxes keep their last bounds.
    #[inline]
    pub fn track(&mut self, rect: Rect) {
        if self.active {
            self.bounds = rect;
        }
    }

    pub fn collision_layers(&self) -> CollisionLayers {
        if self.active {
            CollisionLayers::new(self.kind.layer(), self.kind.filters())
        } else {
            CollisionLayers::new(self.kind.layer(), [] as [Layer; 0])
        }
    }
}

/// An active, compatible overlap seen from `entity`'s side.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitboxContact {
    pub entity: Entity,
    pub other: Entity,
    pub other_kind: HitboxKind,
}

pub fn plugin(app: &mut App) {
    app.add_message::<HitboxContact>();

    app.add_systems(FixedUpdate, sync_hitboxes.in_set(GameplaySet::Sync));
    app.add_systems(
        FixedPostUpdate,
        resolve_contacts.in_set(ContactSet::Resolve),
    );
}

/// Physics components shared by everything that owns a hitbox.
///
/// Bodies are dynamic sensors: they never push each other, but avian reports overlaps
/// between any pair of them. Positions are driven from `ScreenBody`.
pub fn sensor_body(size: Vec2, hitbox: &Hitbox) -> impl Bundle {
    (
        RigidBody::Dynamic,
        Sensor,
        SleepingDisabled,
        Collider::rectangle(size.x, size.y),
        CollisionEventsEnabled,
        hitbox.collision_layers(),
    )
}

/// Keep bounds on the owner's rectangle and avian's filters on the `active` switch.
pub fn sync_hitboxes(mut q: Query<(&ScreenBody, &mut Hitbox, &mut CollisionLayers)>) {
    for (body, mut hitbox, mut layers) in &mut q {
        hitbox.track(body.rect());

        let wanted = hitbox.collision_layers();
        if *layers != wanted {
            *layers = wanted;
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

/// Turn raw overlaps into contacts for active, compatible hitbox pairs.
///
/// One `CollisionStart` produces one contact per side.
pub fn resolve_contacts(
    mut started: MessageReader<CollisionStart>,
    q: Query<&Hitbox>,
    mut contacts: MessageWriter<HitboxContact>,
) {
    for ev in started.read() {
        let a = CollisionTarget { collider: ev.collider1, body: ev.body1 }.gameplay_owner();
        let b = CollisionTarget { collider: ev.collider2, body: ev.body2 }.gameplay_owner();

        let (Ok(ha), Ok(hb)) = (q.get(a), q.get(b)) else {
            continue;
        };

        if !(ha.active && hb.active) || !ha.kind.interacts_with(hb.kind) {
            continue;
        }

        contacts.write(HitboxContact { entity: a, other: b, other_kind: hb.kind });
        contacts.write(HitboxContact { entity: b, other: a, other_kind: ha.kind });
    }
}

/// Render-only overlay of active hitbox bounds, toggled with F3.
pub fn debug_plugin(app: &mut App) {
    app.init_resource::<ShowHitboxes>()
        .add_systems(Update, (toggle_hitbox_overlay, draw_hitboxes).chain());
}

#[derive(Resource, Debug, Default)]
struct ShowHitboxes(bool);

fn toggle_hitbox_overlay(keys: Option<Res<ButtonInput<KeyCode>>>, mut show: ResMut<ShowHitboxes>) {
    let Some(keys) = keys else { return; };
    if keys.just_pressed(KeyCode::F3) {
        show.0 = !show.0;
    }
}

fn draw_hitboxes(show: Res<ShowHitboxes>, mut gizmos: Gizmos, q: Query<&Hitbox>) {
    if !show.0 {
        return;
    }
    for hitbox in &q {
        if !hitbox.active {
            continue;
        }
        let bounds = hitbox.bounds();
        let center = crate::common::screen::to_world(bounds.center());
        gizmos.rect_2d(Isometry2d::from_translation(center), bounds.size(), Color::srgb(0.2, 1.0, 0.4));
    }
}
