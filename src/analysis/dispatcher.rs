use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::warn;

use super::{Analyst, GameAnalysis};

/// Analysis for the session identified by `generation`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub generation: u64,
    pub analysis: GameAnalysis,
}

/// Fire-and-forget analysis requests.
///
/// Each request runs on the blocking pool and posts exactly one report to the
/// channel. Callers compare `generation` against the live session to drop
/// results for sessions that are already gone.
pub struct AnalysisDispatcher {
    analyst: Arc<dyn Analyst>,
    tx: UnboundedSender<AnalysisReport>,
}

impl AnalysisDispatcher {
    pub fn new(analyst: Arc<dyn Analyst>) -> (Self, UnboundedReceiver<AnalysisReport>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { analyst, tx }, rx)
    }

    pub fn request(&self, generation: u64, score: u32, length: usize) -> JoinHandle<()> {
        let analyst = Arc::clone(&self.analyst);
        let tx = self.tx.clone();

        tokio::task::spawn_blocking(move || {
            let analysis = analyst.analyze(score, length).unwrap_or_else(|err| {
                warn!(error = %err, generation, "analysis failed, using fallback");
                GameAnalysis::fallback()
            });

            // A closed channel means the game loop has already exited
            let _ = tx.send(AnalysisReport {
                generation,
                analysis,
            });
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisError, Grade};

    struct FixedAnalyst;

    impl Analyst for FixedAnalyst {
        fn analyze(&self, score: u32, length: usize) -> Result<GameAnalysis, AnalysisError> {
            Ok(GameAnalysis {
                commentary: format!("{score} points, {length} long"),
                grade: Grade::B,
            })
        }
    }

    struct FailingAnalyst;

    impl Analyst for FailingAnalyst {
        fn analyze(&self, _score: u32, _length: usize) -> Result<GameAnalysis, AnalysisError> {
            Err(AnalysisError::Status(503))
        }
    }

    #[tokio::test]
    async fn test_report_carries_generation() {
        let (dispatcher, mut rx) = AnalysisDispatcher::new(Arc::new(FixedAnalyst));

        dispatcher.request(3, 120, 15).await.unwrap();

        let report = rx.recv().await.unwrap();
        assert_eq!(report.generation, 3);
        assert_eq!(report.analysis.commentary, "120 points, 15 long");
        assert_eq!(report.analysis.grade, Grade::B);
    }

    #[tokio::test]
    async fn test_failure_becomes_fallback() {
        let (dispatcher, mut rx) = AnalysisDispatcher::new(Arc::new(FailingAnalyst));

        dispatcher.request(1, 0, 3).await.unwrap();

        let report = rx.recv().await.unwrap();
        assert_eq!(report.analysis, GameAnalysis::fallback());
    }

    #[tokio::test]
    async fn test_closed_channel_is_harmless() {
        let (dispatcher, rx) = AnalysisDispatcher::new(Arc::new(FixedAnalyst));
        drop(rx);

        assert!(dispatcher.request(1, 10, 4).await.is_ok());
    }
}
