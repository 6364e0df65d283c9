//! Core game logic module for Snake
//!
//! This module contains all the grid logic and the session state machine,
//! without any rendering dependencies. Timing goes through the
//! [`Scheduler`](crate::timer::Scheduler) trait.

pub mod action;
pub mod config;
pub mod engine;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use session::{GameOverSummary, Session, StartError, TickOutcome};
pub use state::{GameOverReason, GameState, GameStatus, Position, Snake};
