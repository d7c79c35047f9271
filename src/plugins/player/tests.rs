use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::run_system_once;
use crate::plugins::projectiles::Projectile;

fn player_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.init_resource::<PlayerInput>();
    world.init_resource::<PlayerPosition>();
    world.init_resource::<Messages<GameEvent>>();
    world.init_resource::<Messages<UserEvent>>();
    world.init_resource::<Messages<HitboxContact>>();
    world
}

fn with_delta(world: &mut World, ms: u64) {
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_millis(ms));
    world.insert_resource(time);
}

fn player_entity(world: &mut World) -> Entity {
    world
        .query_filtered::<Entity, With<Player>>()
        .single(world)
        .expect("exactly one player")
}

#[test]
fn spawn_creates_player_with_its_own_pool() {
    let mut world = player_world();
    run_system_once(&mut world, super::spawn);

    let e = player_entity(&mut world);
    let body = world.get::<ScreenBody>(e).unwrap();
    assert_eq!(body.center(), PLAYER_SPAWN);
    assert!(world.get::<Hitbox>(e).unwrap().active);

    let pool = world.get::<ProjectilePool>(e).unwrap();
    assert_eq!(pool.capacity(), PLAYER_POOL_CAPACITY);

    let owned = world
        .query::<&Projectile>()
        .iter(&world)
        .filter(|p| p.owner == e)
        .count();
    assert_eq!(owned, PLAYER_POOL_CAPACITY);
}

#[test]
fn movement_is_clamped_to_the_screen() {
    let mut world = player_world();
    run_system_once(&mut world, super::spawn);
    let e = player_entity(&mut world);

    world.resource_mut::<PlayerInput>().move_axis = Vec2::new(1.0, 0.0);
    with_delta(&mut world, 100);
    run_system_once(&mut world, apply_movement);

    let before = PLAYER_SPAWN.x - 24.0;
    assert_eq!(world.get::<ScreenBody>(e).unwrap().position.x, before + 30.0);

    with_delta(&mut world, 10_000);
    run_system_once(&mut world, apply_movement);
    assert_eq!(world.get::<ScreenBody>(e).unwrap().position.x, 800.0 - 48.0);
}

#[test]
fn fire_press_launches_one_shot_upwards() {
    let mut world = player_world();
    run_system_once(&mut world, super::spawn);

    world.resource_mut::<PlayerInput>().fire = true;
    run_system_once(&mut world, super::fire);
    // The press is consumed.
    run_system_once(&mut world, super::fire);

    let fired: Vec<Projectile> = world
        .query::<&Projectile>()
        .iter(&world)
        .filter(|p| p.fired)
        .copied()
        .collect();
    assert_eq!(fired.len(), 1);
    assert!(fired[0].velocity.y < 0.0);
    assert_eq!(fired[0].velocity.x, 0.0);
}

#[test]
fn contact_destroys_then_respawn_restores() {
    let mut world = player_world();
    world.resource_mut::<Tunables>().player_respawn_ms = 300;
    run_system_once(&mut world, super::spawn);
    let e = player_entity(&mut world);
    let enemy = world.spawn_empty().id();

    world.write_message(HitboxContact {
        entity: e,
        other: enemy,
        other_kind: HitboxKind::EnemyProjectile,
    });
    world.write_message(HitboxContact {
        entity: e,
        other: enemy,
        other_kind: HitboxKind::Enemy,
    });
    run_system_once(&mut world, respond_to_contacts);

    let player = world.get::<Player>(e).unwrap();
    assert!(!player.alive);
    assert!(player.respawn_pending());
    assert!(!world.get::<Hitbox>(e).unwrap().active);

    let pushed: Vec<GameEvent> = world.resource_mut::<Messages<GameEvent>>().drain().collect();
    assert_eq!(pushed, vec![GameEvent::broadcast(EventCode::PlayerDestroyed)]);
    let user: Vec<UserEvent> = world.resource_mut::<Messages<UserEvent>>().drain().collect();
    assert_eq!(user, vec![UserEvent::DecrementLife]);

    with_delta(&mut world, 100);
    run_system_once(&mut world, tick_respawn);
    run_system_once(&mut world, tick_respawn);
    assert!(!world.get::<Player>(e).unwrap().alive);

    run_system_once(&mut world, tick_respawn);
    assert!(world.get::<Player>(e).unwrap().alive);
    assert!(world.get::<Hitbox>(e).unwrap().active);

    let pushed: Vec<GameEvent> = world.resource_mut::<Messages<GameEvent>>().drain().collect();
    assert_eq!(pushed, vec![GameEvent::broadcast(EventCode::PlayerCompleteSpawn)]);
}

#[test]
fn position_is_published_while_alive() {
    let mut world = player_world();
    run_system_once(&mut world, super::spawn);
    let e = player_entity(&mut world);

    world.get_mut::<ScreenBody>(e).unwrap().position = Vec2::new(100.0, 200.0);
    run_system_once(&mut world, publish_position);
    assert_eq!(world.resource::<PlayerPosition>().0, Vec2::new(124.0, 224.0));

    world.get_mut::<Player>(e).unwrap().alive = false;
    world.get_mut::<ScreenBody>(e).unwrap().position = Vec2::ZERO;
    run_system_once(&mut world, publish_position);
    assert_eq!(world.resource::<PlayerPosition>().0, Vec2::new(124.0, 224.0));
}
