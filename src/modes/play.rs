use std::future;
use std::io::{stderr, Stderr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::interval;
use tracing::{debug, info};

use crate::analysis::{AnalysisDispatcher, AnalysisReport, Analyst};
use crate::game::{Command, GameConfig, GameOverSummary, GameStatus, Session, TickOutcome};
use crate::input::{InputHandler, KeyAction, NamePrompt};
use crate::metrics::GameMetrics;
use crate::render::{AnalysisPanel, Hud, Renderer};
use crate::storage::{KeyValueStore, Leaderboard, LeaderboardEntry, PlayerProfile};
use crate::timer::IntervalScheduler;

/// Prompt edits are ignored this long after a game ends, so keys still held
/// from play don't end up in the player's name
const PROMPT_GRACE: Duration = Duration::from_millis(600);

pub struct PlayMode {
    session: Session,
    scheduler: IntervalScheduler,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    leaderboard: Leaderboard,
    profile: PlayerProfile,
    /// Leaderboard as of the last session boundary
    entries: Vec<LeaderboardEntry>,
    dispatcher: Option<AnalysisDispatcher>,
    analysis_rx: Option<UnboundedReceiver<AnalysisReport>>,
    analysis: AnalysisPanel,
    prompt: NamePrompt,
    last_game: Option<GameOverSummary>,
    prompt_locked_until: Option<Instant>,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(
        config: GameConfig,
        store: Arc<dyn KeyValueStore>,
        analyst: Option<Arc<dyn Analyst>>,
        name: Option<String>,
    ) -> Self {
        let leaderboard = Leaderboard::new(Arc::clone(&store));
        let profile = PlayerProfile::new(store);

        let name = name.or_else(|| profile.last_name()).unwrap_or_default();
        let entries = leaderboard.load();

        let (dispatcher, analysis_rx, analysis) = match analyst {
            Some(analyst) => {
                let (dispatcher, rx) = AnalysisDispatcher::new(analyst);
                (Some(dispatcher), Some(rx), AnalysisPanel::Empty)
            }
            None => (None, None, AnalysisPanel::Disabled),
        };

        Self {
            session: Session::new(config),
            scheduler: IntervalScheduler::new(),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            leaderboard,
            profile,
            entries,
            dispatcher,
            analysis_rx,
            analysis,
            prompt: NamePrompt::new(&name),
            last_game: None,
            prompt_locked_until: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!("terminal ready");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick; pending while idle, paused or over
                _ = self.scheduler.tick() => {
                    self.update_game();
                }

                // Commentary for a finished session
                Some(report) = next_report(&mut self.analysis_rx) => {
                    self.apply_report(report);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.hud());
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn hud(&self) -> Hud<'_> {
        Hud {
            state: self.session.state(),
            status: self.session.status(),
            player_name: self.session.player_name(),
            tick_interval: self.session.tick_interval(),
            metrics: &self.metrics,
            leaderboard: &self.entries,
            analysis: &self.analysis,
            prompt: &self.prompt,
            last_game: self.last_game.as_ref(),
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }
            self.handle_key(key);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = match self.session.status() {
            GameStatus::Idle | GameStatus::GameOver => self.input_handler.handle_prompt_key(key),
            GameStatus::Playing | GameStatus::Paused => self.input_handler.handle_key_event(key),
        };

        if self.prompt_locked()
            && matches!(action, KeyAction::Submit | KeyAction::Type(_) | KeyAction::Erase)
        {
            return;
        }

        match action {
            KeyAction::Turn(direction) => {
                // Rejected turns are simply dropped
                self.dispatch(direction.into());
            }
            KeyAction::TogglePause => self.toggle_pause(),
            KeyAction::Submit => self.start_game(),
            KeyAction::Type(c) => self.prompt.push(c),
            KeyAction::Erase => self.prompt.pop(),
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn prompt_locked(&self) -> bool {
        self.prompt_locked_until
            .is_some_and(|until| Instant::now() < until)
    }

    /// Send a command to the session. Returns whether the session changed.
    fn dispatch(&mut self, command: Command) -> bool {
        match self.session.apply(command, &mut self.scheduler) {
            Ok(changed) => changed,
            Err(err) => {
                self.prompt.set_error(err.to_string());
                false
            }
        }
    }

    fn start_game(&mut self) {
        let command = Command::Start(self.prompt.value().to_string());
        if !self.dispatch(command) {
            return;
        }

        self.profile.remember(self.session.player_name());
        self.metrics.on_game_start();
        self.entries = self.leaderboard.load();
        self.last_game = None;
        if self.analysis != AnalysisPanel::Disabled {
            self.analysis = AnalysisPanel::Empty;
        }
    }

    fn toggle_pause(&mut self) {
        if !self.dispatch(Command::TogglePause) {
            return;
        }
        match self.session.status() {
            GameStatus::Paused => self.metrics.on_pause(),
            _ => self.metrics.on_resume(),
        }
    }

    fn update_game(&mut self) {
        if let TickOutcome::GameOver(summary) = self.session.tick(&mut self.scheduler) {
            self.finish_game(summary);
        }
    }

    /// High score, leaderboard, and a commentary request for the session that just ended
    fn finish_game(&mut self, summary: GameOverSummary) {
        if self.metrics.on_game_over(summary.score) {
            info!(score = summary.score, "new session high score");
        }

        self.entries = self.leaderboard.save(&summary.player_name, summary.score);

        if let Some(dispatcher) = &self.dispatcher {
            self.analysis = AnalysisPanel::Loading;
            dispatcher.request(summary.generation, summary.score, summary.length);
        }

        self.prompt = NamePrompt::new(&summary.player_name);
        self.prompt_locked_until = Some(Instant::now() + PROMPT_GRACE);
        self.last_game = Some(summary);
    }

    fn apply_report(&mut self, report: AnalysisReport) {
        if report.generation != self.session.generation() {
            debug!(
                stale = report.generation,
                current = self.session.generation(),
                "discarding stale analysis"
            );
            return;
        }
        self.analysis = AnalysisPanel::Ready(report.analysis);
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Next analysis report, or never when analysis is disabled
async fn next_report(
    rx: &mut Option<UnboundedReceiver<AnalysisReport>>,
) -> Option<AnalysisReport> {
    match rx {
        Some(rx) => rx.recv().await,
        None => future::pending().await,
    }
}
