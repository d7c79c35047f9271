//! Gameplay event bus.
//!
//! Producers (task ticks, contact response, the player) push `GameEvent`s into
//! `Messages<GameEvent>`. Once per fixed tick `drain_event_bus` moves everything pushed so
//! far into `FrameEvents`, which every subscriber then reads in full. Each subscriber
//! filters by code and target itself.
//!
//! ```text
//!   tick N:   push ─► Messages<GameEvent> ──drain──► FrameEvents ─► subscribers
//!                                                                     │ push
//!   tick N+1:          Messages<GameEvent> ◄─────────────────────────┘
//! ```
//!
//! A push made while handling lands back in `Messages<GameEvent>` and is only seen on
//! the next drain. `UserEvent` is the coarse global channel (score, lives) and carries
//! no target.

use bevy::ecs::message::Messages;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCode {
    EnemySpawned,
    EnemyFireMissile,
    EnemyBeginExit,
    EnemyCompleteExit,
    EnemyDestroyed,
    /// Broadcast.
    PlayerDestroyed,
    /// Broadcast.
    PlayerCompleteSpawn,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameEvent {
    pub code: EventCode,
    /// Entity the event is about, `None` for broadcasts.
    pub target: Option<Entity>,
}

impl GameEvent {
    #[inline]
    pub fn to(code: EventCode, target: Entity) -> Self {
        Self { code, target: Some(target) }
    }

    #[inline]
    pub fn broadcast(code: EventCode) -> Self {
        Self { code, target: None }
    }

    #[inline]
    pub fn is_for(&self, code: EventCode, entity: Entity) -> bool {
        self.code == code && self.target == Some(entity)
    }
}

/// Global notifications without a payload.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserEvent {
    IncrementScore,
    DecrementLife,
}

/// Events drained for the current tick, in push order.
#[derive(Resource, Debug, Default)]
pub struct FrameEvents(Vec<GameEvent>);

impl FrameEvents {
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.0.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Codes addressed to `entity`, in push order.
    pub fn addressed_to(&self, entity: Entity) -> impl Iterator<Item = EventCode> + '_ {
        self.0.iter().filter(move |ev| ev.target == Some(entity)).map(|ev| ev.code)
    }

    /// Codes pushed without a target, in push order.
    pub fn broadcasts(&self) -> impl Iterator<Item = EventCode> + '_ {
        self.0.iter().filter(|ev| ev.target.is_none()).map(|ev| ev.code)
    }
}

pub fn plugin(app: &mut App) {
    // The bus is drained by hand every tick, so it is not registered with `add_message`
    // (that would also age it out on frames without a fixed step).
    app.init_resource::<Messages<GameEvent>>();
    app.init_resource::<FrameEvents>();
    app.add_message::<UserEvent>();

    app.add_systems(
        FixedUpdate,
        drain_event_bus.in_set(crate::plugins::core::GameplaySet::Drain),
    );
}

/// Move everything pushed since the last drain into `FrameEvents`.
pub fn drain_event_bus(mut bus: ResMut<Messages<GameEvent>>, mut frame: ResMut<FrameEvents>) {
    frame.0.clear();
    frame.0.extend(bus.drain());

    if !frame.0.is_empty() {
        trace!("[events] drained {} event(s)", frame.0.len());
    }
}
