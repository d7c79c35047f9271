//! Score and lives, tallied from `UserEvent`s after contact response.

use bevy::prelude::*;

use crate::plugins::core::ContactSet;
use crate::plugins::events::UserEvent;

pub const POINTS_PER_KILL: u32 = 10;
pub const STARTING_LIVES: u32 = 3;

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub lives: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
        }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Scoreboard>()
        .add_systems(FixedPostUpdate, tally.in_set(ContactSet::Tally));
}

pub fn tally(mut events: MessageReader<UserEvent>, mut board: ResMut<Scoreboard>) {
    for ev in events.read() {
        match ev {
            UserEvent::IncrementScore => {
                board.score += POINTS_PER_KILL;
                debug!("[score] {}", board.score);
            }
            UserEvent::DecrementLife => {
                board.lives = board.lives.saturating_sub(1);
                info!("[score] lives left: {}", board.lives);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::Messages;

    use super::*;
    use crate::common::test_utils::run_system_once;

    fn board_world() -> World {
        let mut world = World::new();
        world.init_resource::<Scoreboard>();
        world.init_resource::<Messages<UserEvent>>();
        world
    }

    #[test]
    fn kills_add_points() {
        let mut world = board_world();
        world.write_message(UserEvent::IncrementScore);
        world.write_message(UserEvent::IncrementScore);

        run_system_once(&mut world, tally);

        assert_eq!(world.resource::<Scoreboard>().score, 2 * POINTS_PER_KILL);
        assert_eq!(world.resource::<Scoreboard>().lives, STARTING_LIVES);
    }

    #[test]
    fn lives_stop_at_zero() {
        let mut world = board_world();
        for _ in 0..5 {
            world.write_message(UserEvent::DecrementLife);
        }

        run_system_once(&mut world, tally);

        assert_eq!(world.resource::<Scoreboard>().lives, 0);
    }
}
