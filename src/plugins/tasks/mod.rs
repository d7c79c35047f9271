//! Timed tasks: one-shot timeouts and repeating intervals.
//!
//! Tasks are plain data polled from the fixed update step. Nothing runs on its own
//! thread and nothing is invoked behind the owner's back: `tick` reports how many times
//! the task fired during that step and the owner decides what to push.
//!
//! ```text
//!   start() ──► running ──tick()──► fired (Timeout: stops, Interval: re-arms)
//!      ▲           │  ▲
//!      │      pause()  unpause()     cancel() from any state ──► idle
//!      └───────────┘
//! ```

use std::time::Duration;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskMode {
    /// Re-arms after every firing until cancelled.
    Interval,
    /// Fires at most once per `start()`.
    Timeout,
}

#[derive(Debug, Clone)]
pub struct TimedTask {
    mode: TaskMode,
    timer: Timer,
    running: bool,
    paused: bool,
}

impl TimedTask {
    pub fn interval(period: Duration) -> Self {
        Self::new(TaskMode::Interval, period)
    }

    pub fn timeout(delay: Duration) -> Self {
        Self::new(TaskMode::Timeout, delay)
    }

    fn new(mode: TaskMode, duration: Duration) -> Self {
        let timer_mode = match mode {
            TaskMode::Interval => TimerMode::Repeating,
            TaskMode::Timeout => TimerMode::Once,
        };
        Self {
            mode,
            timer: Timer::new(duration, timer_mode),
            running: false,
            paused: false,
        }
    }

    #[inline]
    pub fn mode(&self) -> TaskMode {
        self.mode
    }

    /// A started task that has not fired (Timeout) or been cancelled.
    ///
    /// A paused task is still pending.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn remaining(&self) -> Duration {
        self.timer.remaining()
    }

    /// Arm the task. Calling it on a running task re-arms the full period; there is
    /// only ever one countdown per task.
    pub fn start(&mut self) {
        self.timer.reset();
        self.running = true;
    }

    /// Stop the task. Safe to call when it is not running.
    pub fn cancel(&mut self) {
        self.timer.reset();
        self.running = false;
    }

    /// Freeze the countdown without losing elapsed time.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn unpause(&mut self) {
        self.paused = false;
    }

    /// Advance the countdown and return how many times the task fired.
    ///
    /// Timeouts return at most 1 and stop themselves. Intervals can fire more than once
    /// when `delta` spans several periods.
    pub fn tick(&mut self, delta: Duration) -> u32 {
        if !self.running || self.paused {
            return 0;
        }

        self.timer.tick(delta);
        let fired = self.timer.times_finished_this_tick();

        match self.mode {
            TaskMode::Interval => fired,
            TaskMode::Timeout if fired > 0 => {
                self.running = false;
                1
            }
            TaskMode::Timeout => 0,
        }
    }
}
