//! Tunable gameplay constants.
//!
//! Distances are logical screen units (800x600 screen), speeds are units per second
//! and task periods are milliseconds.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,

    pub player_speed: f32,
    pub player_size: Vec2,
    pub player_projectile_speed: f32,
    pub player_respawn_ms: u64,

    pub enemy_size: Vec2,
    pub enemy_speed: f32,
    pub enemy_projectile_speed: f32,
    pub strafe_left_bound: f32,
    pub strafe_right_bound: f32,

    pub fire_missile_interval_ms: u64,
    pub exit_timeout_ms: u64,
    pub respawn_timeout_ms: u64,

    pub entrance_secs: f32,
    pub brief_entrance_secs: f32,
    pub exit_secs: f32,
    pub special_pass_secs: f32,
    pub explosion_secs: f32,

    pub echelon_spacing: f32,
    pub echelon_speed: f32,

    pub projectile_size: Vec2,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,

            player_speed: 300.0,
            player_size: Vec2::splat(48.0),
            player_projectile_speed: 600.0,
            player_respawn_ms: 3000,

            enemy_size: Vec2::splat(48.0),
            enemy_speed: 250.0,
            enemy_projectile_speed: 300.0,
            strafe_left_bound: 100.0,
            strafe_right_bound: 700.0,

            fire_missile_interval_ms: 3000,
            exit_timeout_ms: 12000,
            respawn_timeout_ms: 3000,

            entrance_secs: 2.5,
            brief_entrance_secs: 1.2,
            exit_secs: 2.0,
            special_pass_secs: 6.0,
            explosion_secs: 0.5,

            echelon_spacing: 10.0,
            echelon_speed: 80.0,

            projectile_size: Vec2::new(8.0, 16.0),
        }
    }
}
