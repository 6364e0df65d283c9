use std::time::Duration;

use crate::analysis::GameAnalysis;
use crate::game::{GameOverSummary, GameState, GameStatus};
use crate::input::NamePrompt;
use crate::metrics::GameMetrics;
use crate::storage::LeaderboardEntry;

/// What the commentary panel currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisPanel {
    /// No API key configured
    Disabled,
    /// Nothing requested for the current session
    Empty,
    /// Request in flight
    Loading,
    Ready(GameAnalysis),
}

/// Everything one frame needs, borrowed from the play loop
pub struct Hud<'a> {
    pub state: &'a GameState,
    pub status: GameStatus,
    pub player_name: &'a str,
    pub tick_interval: Duration,
    pub metrics: &'a GameMetrics,
    pub leaderboard: &'a [LeaderboardEntry],
    pub analysis: &'a AnalysisPanel,
    pub prompt: &'a NamePrompt,
    pub last_game: Option<&'a GameOverSummary>,
}
