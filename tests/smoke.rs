mod common;

use bevy::prelude::*;
use echelon_shooter::plugins::enemies::{Echelon, Enemy};
use echelon_shooter::plugins::player::Player;
use echelon_shooter::plugins::projectiles::pool::{ENEMY_POOL_CAPACITY, PLAYER_POOL_CAPACITY};
use echelon_shooter::plugins::projectiles::{Projectile, ProjectilePool};
use echelon_shooter::plugins::scoreboard::{Scoreboard, STARTING_LIVES};

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }
}

#[test]
fn entering_the_game_spawns_the_wave() {
    let mut app = common::app_headless();
    app.update();

    let world = app.world_mut();

    let enemies = world.query::<&Enemy>().iter(world).count();
    assert_eq!(enemies, 11);
    assert_eq!(world.query::<&Echelon>().iter(world).count(), 2);
    assert_eq!(world.query::<&Player>().iter(world).count(), 1);

    for pool in world
        .query_filtered::<&ProjectilePool, With<Enemy>>()
        .iter(world)
    {
        assert_eq!(pool.capacity(), ENEMY_POOL_CAPACITY);
    }

    let projectiles = world.query::<&Projectile>().iter(world).count();
    assert_eq!(projectiles, enemies * ENEMY_POOL_CAPACITY + PLAYER_POOL_CAPACITY);

    let board = world.resource::<Scoreboard>();
    assert_eq!(board.score, 0);
    assert_eq!(board.lives, STARTING_LIVES);
}

#[test]
fn everyone_starts_idle_and_hidden() {
    let mut app = common::app_headless();
    app.update();

    let world = app.world_mut();
    for (enemy, vis) in world.query::<(&Enemy, &Visibility)>().iter(world) {
        assert!(!enemy.active);
        assert_eq!(*vis, Visibility::Hidden);
    }
}
