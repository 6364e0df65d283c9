pub mod scheduler;

#[cfg(test)]
pub use scheduler::RecordingScheduler;
pub use scheduler::{IntervalScheduler, Scheduler};
