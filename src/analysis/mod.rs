//! Post-game commentary.
//!
//! An [`Analyst`] turns a final score and length into a [`GameAnalysis`]. The
//! [`AnalysisDispatcher`] runs it off the game loop and always delivers
//! something, swapping failures for [`GameAnalysis::fallback`].

pub mod dispatcher;
pub mod gemini;
pub mod grade;

use thiserror::Error;

pub use dispatcher::{AnalysisDispatcher, AnalysisReport};
pub use gemini::{GeminiAnalyst, DEFAULT_MODEL};
pub use grade::{GameAnalysis, Grade};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("commentator returned HTTP {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(#[source] ureq::Error),
    #[error("commentator returned nothing")]
    EmptyResponse,
    #[error("commentator reply is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("commentator handed out an unknown grade `{0}`")]
    UnknownGrade(String),
}

impl From<ureq::Error> for AnalysisError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => AnalysisError::Status(code),
            other => AnalysisError::Transport(other),
        }
    }
}

/// Something that can grade a finished game
pub trait Analyst: Send + Sync {
    fn analyze(&self, score: u32, length: usize) -> Result<GameAnalysis, AnalysisError>;
}
