use std::future;
use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Drives the game tick.
///
/// `schedule` always replaces whatever timer was running, so changing the
/// speed is a cancel followed by a fresh schedule.
pub trait Scheduler {
    /// Start firing every `period`, the first firing one full period from now
    fn schedule(&mut self, period: Duration);

    /// Stop firing until the next `schedule`
    fn cancel(&mut self);
}

/// Tokio-backed scheduler used by the terminal game loop
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    timer: Option<Interval>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self { timer: None }
    }

    /// Current period, if a timer is running
    pub fn period(&self) -> Option<Duration> {
        self.timer.as_ref().map(Interval::period)
    }

    /// Wait for the next firing. Never resolves while cancelled.
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule(&mut self, period: Duration) {
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
    }

    fn cancel(&mut self) {
        self.timer = None;
    }
}

/// Records scheduler calls so state-machine tests can assert on them
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    pub current: Option<Duration>,
    pub history: Vec<Option<Duration>>,
}

#[cfg(test)]
impl Scheduler for RecordingScheduler {
    fn schedule(&mut self, period: Duration) {
        self.current = Some(period);
        self.history.push(Some(period));
    }

    fn cancel(&mut self) {
        self.current = None;
        self.history.push(None);
    }
}
