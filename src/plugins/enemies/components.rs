use std::fmt;
use std::time::Duration;

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::motion::spline::Spline;
use crate::plugins::tasks::TimedTask;

/// Human-readable identity used in logs ("Enemy-3"). Never changes once issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnemyId(String);

impl EnemyId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues `EnemyId`s from a counter that only ever grows.
#[derive(Resource, Debug, Default)]
pub struct EnemyIds {
    issued: u32,
}

impl EnemyIds {
    pub fn next_id(&mut self) -> EnemyId {
        self.issued += 1;
        EnemyId(format!("Enemy-{}", self.issued))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Enters, strafes, fires and leaves on its own.
    Standard,
    /// Flies with an echelon until its exit timeout.
    Echelon,
    /// Echelon member with a short entrance that engages as soon as it arrives.
    Drone,
    /// Crosses the screen on one long curve and loops. Never fires.
    Special,
}

impl EnemyKind {
    pub fn color(self) -> Color {
        match self {
            Self::Standard => Color::srgb(0.9, 0.25, 0.25),
            Self::Echelon => Color::srgb(0.95, 0.55, 0.2),
            Self::Drone => Color::srgb(0.6, 0.4, 0.95),
            Self::Special => Color::srgb(0.95, 0.85, 0.25),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnemyState {
    #[default]
    Idle,
    Entering,
    StrafingLeft,
    StrafingRight,
    Exiting,
    Destroyed,
}

impl EnemyState {
    /// States that can be destroyed or sent away.
    #[inline]
    pub fn is_engaged(self) -> bool {
        matches!(
            self,
            Self::Entering | Self::StrafingLeft | Self::StrafingRight | Self::Exiting
        )
    }
}

/// Whether the enemy may fire. Independent of `EnemyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Aggression {
    #[default]
    Active,
    Passive,
}

#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub state: EnemyState,
    pub aggression: Aggression,
    /// On screen and taking part; false while idle or exploding.
    pub active: bool,
    pub speed: f32,
    /// Seen inside the screen at least once since the last spawn.
    pub entered_screen: bool,
}

impl Enemy {
    pub fn new(id: EnemyId, kind: EnemyKind, speed: f32) -> Self {
        Self {
            id,
            kind,
            state: EnemyState::Idle,
            aggression: Aggression::Active,
            active: false,
            speed,
            entered_screen: false,
        }
    }
}

/// The three timers every enemy owns.
///
/// At most one of `exit_timeout` / `respawn_timeout` is pending at a time.
#[derive(Component, Debug, Clone)]
pub struct EnemyTasks {
    pub fire_missile: TimedTask,
    pub exit_timeout: TimedTask,
    pub respawn_timeout: TimedTask,
}

impl EnemyTasks {
    pub fn from_tunables(t: &Tunables) -> Self {
        Self {
            fire_missile: TimedTask::interval(Duration::from_millis(t.fire_missile_interval_ms)),
            exit_timeout: TimedTask::timeout(Duration::from_millis(t.exit_timeout_ms)),
            respawn_timeout: TimedTask::timeout(Duration::from_millis(t.respawn_timeout_ms)),
        }
    }

    pub fn arm_exit(&mut self) {
        self.respawn_timeout.cancel();
        self.exit_timeout.start();
    }

    pub fn arm_respawn(&mut self) {
        self.exit_timeout.cancel();
        self.respawn_timeout.start();
    }

    pub fn cancel_all(&mut self) {
        self.fire_missile.cancel();
        self.exit_timeout.cancel();
        self.respawn_timeout.cancel();
    }

    pub fn pause_all(&mut self) {
        self.fire_missile.pause();
        self.exit_timeout.pause();
        self.respawn_timeout.pause();
    }

    pub fn unpause_all(&mut self) {
        self.fire_missile.unpause();
        self.exit_timeout.unpause();
        self.respawn_timeout.unpause();
    }
}

/// Entrance and exit curves, reset on every spawn.
#[derive(Component, Debug, Clone)]
pub struct Flight {
    pub entrance: Spline,
    pub exit: Spline,
}

impl Flight {
    pub fn for_kind(kind: EnemyKind, t: &Tunables) -> Self {
        let secs = Duration::from_secs_f32;
        let entrance = match kind {
            EnemyKind::Standard | EnemyKind::Echelon => Spline::enemy_entrance(secs(t.entrance_secs)),
            EnemyKind::Drone => Spline::brief_entrance(secs(t.brief_entrance_secs)),
            EnemyKind::Special => Spline::special_pass(secs(t.special_pass_secs)),
        };
        Self {
            entrance,
            exit: Spline::enemy_exit(secs(t.exit_secs)),
        }
    }
}

/// Destruction animation: a one-shot timer plus a playing flag.
#[derive(Component, Debug, Clone)]
pub struct Explosion {
    timer: Timer,
    playing: bool,
}

impl Explosion {
    pub fn new(duration: Duration) -> Self {
        Self {
            timer: Timer::new(duration, TimerMode::Once),
            playing: false,
        }
    }

    pub fn start(&mut self) {
        self.timer.reset();
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Normalised progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.timer.fraction()
    }

    /// Advance the animation. Returns true on the tick it finishes.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.playing {
            return false;
        }
        self.timer.tick(delta);
        if self.timer.is_finished() {
            self.playing = false;
            return true;
        }
        false
    }
}

/// Formation controller. Members sit side by side to the right of `position`.
#[derive(Component, Debug, Clone)]
pub struct Echelon {
    /// Screen-space top-left of the first slot.
    pub position: Vec2,
    pub spacing: f32,
    pub speed: f32,
    /// -1.0 moving left, 1.0 moving right.
    pub direction: f32,
    pub members: usize,
    pub member_width: f32,
}

impl Echelon {
    /// Horizontal extent of the whole formation.
    pub fn width(&self) -> f32 {
        if self.members == 0 {
            return 0.0;
        }
        let n = self.members as f32;
        n * self.member_width + (n - 1.0) * self.spacing
    }

    /// Top-left of member `index`.
    pub fn slot(&self, index: usize) -> Vec2 {
        let i = index as f32;
        Vec2::new(
            self.position.x + self.member_width * i + self.spacing * i,
            self.position.y,
        )
    }

    /// The strafing state matching the current heading.
    pub fn strafing_state(&self) -> EnemyState {
        if self.direction < 0.0 {
            EnemyState::StrafingLeft
        } else {
            EnemyState::StrafingRight
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EchelonState {
    /// Position driven by the formation.
    Synced,
    /// Flying on its own state machine.
    #[default]
    Solo,
}

/// Link from an `Echelon`/`Drone` enemy to its formation.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct EchelonMember {
    pub echelon: Option<Entity>,
    pub index: usize,
    pub state: EchelonState,
    /// Fire and exit tasks have been started for this pass.
    pub engaged: bool,
}

impl EchelonMember {
    pub fn new(echelon: Entity, index: usize) -> Self {
        Self {
            echelon: Some(echelon),
            index,
            state: EchelonState::Solo,
            engaged: false,
        }
    }
}
