//! Lighting (render-only, bevy_firefly).
//!
//! A warm light rides on the player ship and dims while the ship is down. Enemies cast
//! shadows.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::screen::to_world;
use crate::common::state::GameState;
use crate::plugins::enemies::Enemy;
use crate::plugins::motion::ScreenBody;
use crate::plugins::player::Player;

const SHIP_LIGHT_RANGE: f32 = 450.0;
const SHIP_LIGHT_DOWN_RANGE: f32 = 120.0;

#[derive(Component)]
pub struct ShipLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), spawn_ship_light)
        .add_systems(
            Update,
            (track_ship_light, add_enemy_occluders).run_if(in_state(GameState::InGame)),
        );
}

fn spawn_ship_light(mut commands: Commands) {
    commands.spawn((
        Name::new("ShipLight"),
        ShipLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            radius: SHIP_LIGHT_RANGE,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn track_ship_light(
    player: Query<(&Player, &ScreenBody)>,
    mut light: Query<(&mut PointLight2d, &mut Transform), With<ShipLight>>,
) {
    let (Ok((player, body)), Ok((mut point, mut tf))) = (player.single(), light.single_mut()) else {
        return;
    };

    let at = to_world(body.center());
    tf.translation.x = at.x;
    tf.translation.y = at.y;

    let range = if player.alive { SHIP_LIGHT_RANGE } else { SHIP_LIGHT_DOWN_RANGE };
    if point.radius != range {
        point.radius = range;
    }
}

fn add_enemy_occluders(mut commands: Commands, q: Query<(Entity, &ScreenBody), Added<Enemy>>) {
    for (e, body) in &q {
        commands.entity(e).insert(Occluder2d::circle(body.size.x * 0.5));
    }
}
