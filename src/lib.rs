//! Snake TUI - terminal Snake with a local leaderboard and AI commentary
//!
//! This library provides:
//! - Core game logic and the session state machine (game module)
//! - Tick scheduling (timer module)
//! - Leaderboard and player-name persistence (storage module)
//! - Post-game commentary via Gemini (analysis module)
//! - Keyboard mapping, TUI rendering and HUD metrics (input, render, metrics)
//! - Execution modes: play and leaderboard (modes module)

pub mod analysis;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
pub mod timer;
