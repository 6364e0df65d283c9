use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Letter grade handed out by the commentator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    F,
    /// No grade could be produced
    Unavailable,
}

impl Grade {
    /// Grades a model may hand out
    pub const AWARDED: [Grade; 6] = [Grade::S, Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
            Grade::Unavailable => "?",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Grade::AWARDED
            .into_iter()
            .find(|grade| grade.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_string())
    }
}

/// Post-game commentary and grade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameAnalysis {
    pub commentary: String,
    pub grade: Grade,
}

impl GameAnalysis {
    /// Shown whenever the commentator could not be reached
    pub fn fallback() -> Self {
        Self {
            commentary: "The commentator lost the signal. Great run anyway!".to_string(),
            grade: Grade::Unavailable,
        }
    }
}
