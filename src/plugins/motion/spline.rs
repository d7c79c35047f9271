//! Time-parameterised cubic Bezier motion.
//!
//! A spline maps elapsed time onto a curve through four control points. Owners poll
//! `update` every tick and react to `SplineProgress::Completed`, which is reported
//! exactly once per traversal. `reset` rewinds for reuse (entities respawn, they are
//! not rebuilt).

use std::time::Duration;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplineProgress {
    /// Still travelling.
    Running(Vec2),
    /// Reached the end during this update.
    Completed(Vec2),
    /// Already finished on an earlier update.
    Idle(Vec2),
}

impl SplineProgress {
    #[inline]
    pub fn position(self) -> Vec2 {
        match self {
            Self::Running(p) | Self::Completed(p) | Self::Idle(p) => p,
        }
    }

    #[inline]
    pub fn just_completed(self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    points: [Vec2; 4],
    duration: Duration,
    elapsed: Duration,
    completed: bool,
}

impl Spline {
    pub fn new(points: [Vec2; 4], duration: Duration) -> Self {
        Self {
            points,
            duration,
            elapsed: Duration::ZERO,
            completed: false,
        }
    }

    /// Sweeping entrance from above the screen into the strafing line.
    pub fn enemy_entrance(duration: Duration) -> Self {
        Self::new(
            [
                Vec2::new(400.0, -100.0),
                Vec2::new(-100.0, 200.0),
                Vec2::new(900.0, 350.0),
                Vec2::new(400.0, 150.0),
            ],
            duration,
        )
    }

    /// Short hook from the right edge, used by drones.
    pub fn brief_entrance(duration: Duration) -> Self {
        Self::new(
            [
                Vec2::new(850.0, 80.0),
                Vec2::new(600.0, 0.0),
                Vec2::new(500.0, 250.0),
                Vec2::new(400.0, 150.0),
            ],
            duration,
        )
    }

    /// Dive out through the bottom edge.
    pub fn enemy_exit(duration: Duration) -> Self {
        Self::new(
            [
                Vec2::new(400.0, 150.0),
                Vec2::new(700.0, 300.0),
                Vec2::new(100.0, 450.0),
                Vec2::new(400.0, 700.0),
            ],
            duration,
        )
    }

    /// Single low pass from off-screen left to off-screen right.
    pub fn special_pass(duration: Duration) -> Self {
        Self::new(
            [
                Vec2::new(-100.0, 60.0),
                Vec2::new(250.0, 550.0),
                Vec2::new(550.0, 550.0),
                Vec2::new(900.0, 60.0),
            ],
            duration,
        )
    }

    /// Advance by `delta` and report where the curve is now.
    pub fn update(&mut self, delta: Duration) -> SplineProgress {
        if self.completed {
            return SplineProgress::Idle(self.position());
        }

        self.elapsed = (self.elapsed + delta).min(self.duration);

        if self.elapsed >= self.duration {
            self.completed = true;
            SplineProgress::Completed(self.position())
        } else {
            SplineProgress::Running(self.position())
        }
    }

    /// Point for the current elapsed time.
    pub fn position(&self) -> Vec2 {
        cubic_bezier(&self.points, self.progress())
    }

    /// Normalised traversal progress in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.completed = false;
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.points[0]
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.points[3]
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Move the terminal control point, e.g. onto a formation slot.
    pub fn set_final_position(&mut self, point: Vec2) {
        self.points[3] = point;
    }

    pub fn set_start_position(&mut self, point: Vec2) {
        self.points[0] = point;
    }
}

/// Evaluate a cubic Bezier at `t` (clamped to [0, 1]).
///
/// Exact at both ends: t = 0 gives `p[0]`, t = 1 gives `p[3]`.
pub fn cubic_bezier(p: &[Vec2; 4], t: f32) -> Vec2 {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 {
        return p[0];
    }
    if t == 1.0 {
        return p[3];
    }
    let u = 1.0 - t;
    p[0] * (u * u * u) + p[1] * (3.0 * u * u * t) + p[2] * (3.0 * u * t * t) + p[3] * (t * t * t)
}
