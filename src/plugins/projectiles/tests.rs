//! Pool tests run on a bare `World`; contacts are written directly as `HitboxContact`.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::pool::{self, ProjectileSlots, Shot, ENEMY_FIRING_WINDOW, ENEMY_POOL_CAPACITY};
use super::*;
use crate::common::layers::Layer;
use crate::common::test_utils::run_system_once;
use crate::plugins::collider::HitboxKind;

fn plain_pool(world: &mut World, capacity: usize, window: usize) -> ProjectilePool {
    let slots = (0..capacity).map(|_| world.spawn_empty().id()).collect();
    ProjectilePool::new(slots, window)
}

fn spawn_enemy_pool(world: &mut World) -> (Entity, ProjectilePool) {
    let owner = world.spawn_empty().id();
    let pool = run_system_once(world, move |mut commands: Commands| {
        pool::spawn_pool(
            &mut commands,
            owner,
            HitboxKind::EnemyProjectile,
            ENEMY_POOL_CAPACITY,
            ENEMY_FIRING_WINDOW,
            Vec2::new(8.0, 16.0),
            Color::WHITE,
        )
    });
    (owner, pool)
}

fn with_delta(world: &mut World, ms: u64) {
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_millis(ms));
    world.insert_resource(time);
}

fn shot_down() -> Shot {
    Shot {
        origin: Vec2::new(400.0, 100.0),
        target: Vec2::new(400.0, 500.0),
        speed: 300.0,
        rotation: 180.0,
    }
}

#[test]
fn next_slot_round_robins_within_the_window() {
    let mut world = World::new();
    let mut pool = plain_pool(&mut world, 50, 25);

    let first = pool.next_slot(|_| false);
    assert_eq!(first, Some(pool.slots()[0]));
    assert_eq!(pool.cursor(), 1);

    for _ in 1..25 {
        pool.next_slot(|_| false);
    }
    // Wrapped back to the start without ever touching slot 25.
    assert_eq!(pool.cursor(), 0);
    assert_eq!(pool.next_slot(|_| false), Some(pool.slots()[0]));
}

#[test]
fn next_slot_skips_slots_in_flight() {
    let mut world = World::new();
    let mut pool = plain_pool(&mut world, 50, 25);
    let busy = [pool.slots()[0], pool.slots()[1]];

    let got = pool.next_slot(|e| busy.contains(&e));
    assert_eq!(got, Some(pool.slots()[2]));
    assert_eq!(pool.cursor(), 3);
}

#[test]
fn full_window_is_a_no_op() {
    let mut world = World::new();
    let mut pool = plain_pool(&mut world, 50, 25);
    pool.next_slot(|_| false);
    pool.next_slot(|_| false);
    let cursor = pool.cursor();

    let window: Vec<Entity> = pool.slots()[..25].to_vec();
    assert_eq!(pool.next_slot(|e| window.contains(&e)), None);
    assert_eq!(pool.cursor(), cursor);
}

#[test]
fn window_is_clamped_to_capacity() {
    let mut world = World::new();
    let pool = plain_pool(&mut world, 4, 25);
    assert_eq!(pool.capacity(), 4);
    assert_eq!(pool.window(), 4);
}

#[test]
fn spawn_pool_creates_idle_hidden_slots() {
    let mut world = World::new();
    let (owner, pool) = spawn_enemy_pool(&mut world);

    assert_eq!(pool.capacity(), ENEMY_POOL_CAPACITY);
    assert_eq!(pool.window(), ENEMY_FIRING_WINDOW);

    for &e in pool.slots() {
        let projectile = world.get::<Projectile>(e).unwrap();
        assert_eq!(*projectile, Projectile::idle(owner));
        assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Hidden);

        let hitbox = world.get::<Hitbox>(e).unwrap();
        assert_eq!(hitbox.kind(), HitboxKind::EnemyProjectile);
        assert!(!hitbox.active);

        let layers = world.get::<CollisionLayers>(e).unwrap();
        assert!(layers.memberships.has_all(Layer::EnemyProjectile));
        assert!(!layers.filters.has_all(Layer::Player));
    }
}

#[test]
fn fire_from_pool_launches_towards_the_target() {
    let mut world = World::new();
    let (_, pool) = spawn_enemy_pool(&mut world);
    let pool_entity = world.spawn(pool).id();

    let fired = run_system_once(
        &mut world,
        move |mut pools: Query<&mut ProjectilePool>, mut slots: ProjectileSlots| {
            let mut pool = pools.get_mut(pool_entity).unwrap();
            pool::fire_from_pool(&mut pool, &mut slots, shot_down())
        },
    )
    .expect("an idle pool always has a free slot");

    let projectile = world.get::<Projectile>(fired).unwrap();
    assert!(projectile.fired);
    assert!((projectile.velocity - Vec2::new(0.0, 300.0)).length() < 1e-3);

    let body = world.get::<ScreenBody>(fired).unwrap();
    assert_eq!(body.center(), Vec2::new(400.0, 100.0));
    assert_eq!(body.rotation, 180.0);

    assert!(world.get::<Hitbox>(fired).unwrap().active);
    assert_eq!(world.get::<ProjectilePool>(pool_entity).unwrap().cursor(), 1);
}

#[test]
fn twenty_sixth_shot_waits_for_a_slot() {
    let mut world = World::new();
    let (_, pool) = spawn_enemy_pool(&mut world);
    let pool_entity = world.spawn(pool).id();

    let shots = run_system_once(
        &mut world,
        move |mut pools: Query<&mut ProjectilePool>, mut slots: ProjectileSlots| {
            let mut pool = pools.get_mut(pool_entity).unwrap();
            (0..26)
                .map(|_| pool::fire_from_pool(&mut pool, &mut slots, shot_down()))
                .collect::<Vec<_>>()
        },
    );

    assert!(shots[..25].iter().all(Option::is_some));
    assert_eq!(shots[25], None);

    let in_flight = world
        .query::<&Projectile>()
        .iter(&world)
        .filter(|p| p.fired)
        .count();
    assert_eq!(in_flight, 25);
}

#[test]
fn advance_moves_and_grounds_off_screen() {
    let mut world = World::new();
    let owner = world.spawn_empty().id();
    let mut hitbox = Hitbox::new(HitboxKind::EnemyProjectile);
    hitbox.active = true;

    let e = world
        .spawn((
            Projectile {
                owner,
                fired: true,
                velocity: Vec2::new(0.0, 300.0),
                target: Vec2::new(400.0, 600.0),
            },
            ScreenBody::new(Vec2::new(400.0, 100.0), Vec2::new(8.0, 16.0)),
            hitbox,
        ))
        .id();

    with_delta(&mut world, 100);
    run_system_once(&mut world, advance_projectiles);
    assert_eq!(world.get::<ScreenBody>(e).unwrap().position, Vec2::new(400.0, 130.0));
    assert!(world.get::<Projectile>(e).unwrap().fired);

    world.get_mut::<ScreenBody>(e).unwrap().position.y = 590.0;
    run_system_once(&mut world, advance_projectiles);

    let projectile = world.get::<Projectile>(e).unwrap();
    assert!(!projectile.fired);
    assert_eq!(projectile.velocity, Vec2::ZERO);
    assert!(!world.get::<Hitbox>(e).unwrap().active);
}

#[test]
fn idle_projectiles_do_not_move() {
    let mut world = World::new();
    let owner = world.spawn_empty().id();
    let e = world
        .spawn((
            Projectile::idle(owner),
            ScreenBody::new(Vec2::new(10.0, 10.0), Vec2::new(8.0, 16.0)),
            Hitbox::new(HitboxKind::Projectile),
        ))
        .id();

    with_delta(&mut world, 100);
    run_system_once(&mut world, advance_projectiles);
    assert_eq!(world.get::<ScreenBody>(e).unwrap().position, Vec2::new(10.0, 10.0));
}

#[test]
fn impact_grounds_the_projectile() {
    let mut world = World::new();
    world.init_resource::<Messages<HitboxContact>>();

    let owner = world.spawn_empty().id();
    let enemy = world.spawn_empty().id();
    let mut hitbox = Hitbox::new(HitboxKind::Projectile);
    hitbox.active = true;
    let e = world
        .spawn((
            Projectile {
                owner,
                fired: true,
                velocity: Vec2::NEG_Y * 600.0,
                target: Vec2::ZERO,
            },
            hitbox,
        ))
        .id();

    world.write_message(HitboxContact {
        entity: e,
        other: enemy,
        other_kind: HitboxKind::Enemy,
    });
    run_system_once(&mut world, ground_on_impact);

    assert!(!world.get::<Projectile>(e).unwrap().fired);
    assert!(!world.get::<Hitbox>(e).unwrap().active);
}

#[test]
fn visibility_follows_fired() {
    let mut world = World::new();
    let owner = world.spawn_empty().id();
    let e = world.spawn((Projectile::idle(owner), Visibility::Hidden)).id();

    world.get_mut::<Projectile>(e).unwrap().fired = true;
    run_system_once(&mut world, present_projectiles);
    assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Visible);

    world.get_mut::<Projectile>(e).unwrap().fired = false;
    run_system_once(&mut world, present_projectiles);
    assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Hidden);
}
