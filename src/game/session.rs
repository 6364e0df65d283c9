//! Session state machine: Idle → Playing ↔ Paused → GameOver → Playing.
//!
//! The session owns the grid for the length of a play-through and is the only
//! thing that mutates it. Timing is delegated to a [`Scheduler`] so the same
//! code runs under tokio and under tests.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use super::{
    action::{Command, Direction},
    config::GameConfig,
    engine::GameEngine,
    state::{GameOverReason, GameState, GameStatus},
};
use crate::timer::Scheduler;

/// Rejected start request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("enter a player name to start")]
    EmptyName,
    #[error("a game is already in progress")]
    InProgress,
}

/// Everything finalization needs once a session ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverSummary {
    /// Generation of the session that ended
    pub generation: u64,
    pub player_name: String,
    pub score: u32,
    pub length: usize,
    pub reason: GameOverReason,
}

/// What a tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing happened
    Ignored,
    /// The snake advanced one cell
    Moved { ate_food: bool },
    /// The session just ended
    GameOver(GameOverSummary),
}

pub struct Session {
    engine: GameEngine,
    state: GameState,
    status: GameStatus,
    /// Single-slot input buffer, consumed by the next tick
    next_direction: Direction,
    player_name: String,
    generation: u64,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self::with_engine(GameEngine::new(config))
    }

    pub fn with_engine(mut engine: GameEngine) -> Self {
        let state = engine.reset();
        let next_direction = state.snake.direction;

        Self {
            engine,
            state,
            status: GameStatus::Idle,
            next_direction,
            player_name: String::new(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Monotonic counter bumped on every start
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Tick interval for the current score
    pub fn tick_interval(&self) -> Duration {
        self.engine.config().tick_interval(self.state.score)
    }

    /// Route an input command to the matching transition.
    /// Returns whether the session changed.
    pub fn apply<S: Scheduler + ?Sized>(
        &mut self,
        command: Command,
        scheduler: &mut S,
    ) -> Result<bool, StartError> {
        match command {
            Command::Start(name) => self.start(&name, scheduler).map(|()| true),
            Command::Turn(direction) => Ok(self.turn(direction)),
            Command::TogglePause => Ok(self.toggle_pause(scheduler)),
        }
    }

    /// Start a fresh session from Idle or GameOver; restart is the same as start.
    pub fn start<S: Scheduler + ?Sized>(
        &mut self,
        name: &str,
        scheduler: &mut S,
    ) -> Result<(), StartError> {
        if matches!(self.status, GameStatus::Playing | GameStatus::Paused) {
            return Err(StartError::InProgress);
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(StartError::EmptyName);
        }

        self.state = self.engine.reset();
        self.next_direction = self.state.snake.direction;
        self.player_name = name.to_string();
        self.generation += 1;
        self.status = GameStatus::Playing;
        scheduler.schedule(self.tick_interval());

        info!(
            player = %self.player_name,
            generation = self.generation,
            "session started"
        );
        Ok(())
    }

    /// Buffer a direction change. Returns whether it was accepted.
    ///
    /// Only accepted while playing, and never the reverse of the active
    /// direction. A later accepted press overwrites an earlier one.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        if self.state.snake.direction.is_opposite(direction) {
            return false;
        }
        self.next_direction = direction;
        true
    }

    /// Pause or resume. Returns whether the status changed.
    pub fn toggle_pause<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        match self.status {
            GameStatus::Playing => {
                self.status = GameStatus::Paused;
                scheduler.cancel();
                true
            }
            GameStatus::Paused => {
                self.status = GameStatus::Playing;
                scheduler.schedule(self.tick_interval());
                true
            }
            GameStatus::Idle | GameStatus::GameOver => false,
        }
    }

    /// Advance the game by one step
    pub fn tick<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> TickOutcome {
        if self.status != GameStatus::Playing {
            return TickOutcome::Ignored;
        }

        let result = self.engine.step(&mut self.state, self.next_direction);

        if let Some(reason) = result.info.game_over {
            self.status = GameStatus::GameOver;
            scheduler.cancel();

            info!(
                player = %self.player_name,
                score = self.state.score,
                length = self.state.snake.len(),
                %reason,
                "game over"
            );

            return TickOutcome::GameOver(GameOverSummary {
                generation: self.generation,
                player_name: self.player_name.clone(),
                score: self.state.score,
                length: self.state.snake.len(),
                reason,
            });
        }

        if result.info.ate_food {
            debug!(score = self.state.score, "food eaten");
            scheduler.schedule(self.tick_interval());
        }

        TickOutcome::Moved {
            ate_food: result.info.ate_food,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;
    use crate::timer::RecordingScheduler;

    fn session() -> Session {
        Session::with_engine(GameEngine::with_seed(GameConfig::default(), 42))
    }

    fn started() -> (Session, RecordingScheduler) {
        let mut session = session();
        let mut scheduler = RecordingScheduler::default();
        session.start("Alex", &mut scheduler).unwrap();
        (session, scheduler)
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = session();
        assert_eq!(session.status(), GameStatus::Idle);
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn test_start_scenario() {
        let (session, scheduler) = started();

        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(
            session.state().snake.body,
            vec![Position::new(7, 7), Position::new(7, 8), Position::new(7, 9)]
        );
        assert_eq!(session.state().snake.direction.delta(), (0, -1));
        assert!(!session.state().is_occupied_by_snake(session.state().food));
        assert_eq!(session.player_name(), "Alex");
        assert_eq!(scheduler.current, Some(Duration::from_millis(150)));
    }

    #[test]
    fn test_start_rejects_empty_name() {
        let mut session = session();
        let mut scheduler = RecordingScheduler::default();

        assert_eq!(
            session.start("   ", &mut scheduler),
            Err(StartError::EmptyName)
        );
        assert_eq!(session.status(), GameStatus::Idle);
        assert_eq!(session.generation(), 0);
        assert!(scheduler.history.is_empty());
    }

    #[test]
    fn test_start_rejected_while_playing_or_paused() {
        let (mut session, mut scheduler) = started();
        session.state.score = 70;

        assert_eq!(
            session.start("Bob", &mut scheduler),
            Err(StartError::InProgress)
        );
        assert_eq!(session.generation(), 1);
        assert_eq!(session.player_name(), "Alex");
        assert_eq!(session.state().score, 70);

        session.toggle_pause(&mut scheduler);
        assert_eq!(
            session.apply(Command::Start("Cy".to_string()), &mut scheduler),
            Err(StartError::InProgress)
        );
        assert_eq!(session.status(), GameStatus::Paused);
        assert_eq!(session.generation(), 1);
        assert_eq!(session.state().score, 70);
        assert_eq!(scheduler.current, None);
    }

    #[test]
    fn test_apply_reports_changes() {
        let (mut session, mut scheduler) = started();

        assert_eq!(session.apply(Direction::Down.into(), &mut scheduler), Ok(false));
        assert_eq!(session.apply(Direction::Left.into(), &mut scheduler), Ok(true));
        assert_eq!(session.next_direction(), Direction::Left);

        assert_eq!(session.apply(Command::TogglePause, &mut scheduler), Ok(true));
        assert_eq!(session.status(), GameStatus::Paused);
        assert_eq!(session.apply(Direction::Up.into(), &mut scheduler), Ok(false));
    }

    #[test]
    fn test_start_trims_name() {
        let mut session = session();
        let mut scheduler = RecordingScheduler::default();
        session.start("  Sam ", &mut scheduler).unwrap();
        assert_eq!(session.player_name(), "Sam");
    }

    #[test]
    fn test_reverse_turn_rejected() {
        let (mut session, _) = started();

        assert!(!session.turn(Direction::Down));
        assert_eq!(session.next_direction(), Direction::Up);

        assert!(session.turn(Direction::Left));
        assert_eq!(session.next_direction(), Direction::Left);
    }

    #[test]
    fn test_reverse_checked_against_active_not_buffered() {
        let (mut session, _) = started();

        // Active is Up; buffering Left then Right is fine because neither
        // reverses Up. Only the last one survives.
        assert!(session.turn(Direction::Left));
        assert!(session.turn(Direction::Right));
        assert_eq!(session.next_direction(), Direction::Right);
    }

    #[test]
    fn test_one_buffered_change_per_tick() {
        let (mut session, mut scheduler) = started();
        session.state.food = Position::new(0, 0);

        session.turn(Direction::Left);
        session.turn(Direction::Right);
        session.tick(&mut scheduler);

        assert_eq!(session.state().snake.direction, Direction::Right);
        assert_eq!(session.state().snake.head(), Position::new(8, 7));

        // Nothing buffered since: keep going right
        session.tick(&mut scheduler);
        assert_eq!(session.state().snake.head(), Position::new(9, 7));
    }

    #[test]
    fn test_wall_scenario() {
        let (mut session, mut scheduler) = started();
        session.state.snake = crate::game::Snake::new(Position::new(0, 3), Direction::Left, 3);
        session.state.food = Position::new(10, 10);
        session.next_direction = Direction::Left;
        let before = session.state().snake.body.clone();

        let outcome = session.tick(&mut scheduler);

        assert!(matches!(
            outcome,
            TickOutcome::GameOver(GameOverSummary {
                reason: GameOverReason::Wall,
                ..
            })
        ));
        assert_eq!(session.status(), GameStatus::GameOver);
        assert_eq!(session.state().snake.body, before);
        assert_eq!(scheduler.current, None);
    }

    #[test]
    fn test_eating_scores_and_speeds_up() {
        let (mut session, mut scheduler) = started();
        session.state.score = 40;
        session.state.food = Position::new(7, 6);

        let outcome = session.tick(&mut scheduler);

        assert_eq!(outcome, TickOutcome::Moved { ate_food: true });
        assert_eq!(session.state().score, 50);
        assert_eq!(session.state().snake.len(), 4);
        assert_eq!(scheduler.current, Some(Duration::from_millis(145)));
    }

    #[test]
    fn test_pause_and_resume() {
        let (mut session, mut scheduler) = started();
        session.turn(Direction::Left);

        assert!(session.toggle_pause(&mut scheduler));
        assert_eq!(session.status(), GameStatus::Paused);
        assert_eq!(scheduler.current, None);

        // Paused: no movement, no turning
        let head = session.state().snake.head();
        assert_eq!(session.tick(&mut scheduler), TickOutcome::Ignored);
        assert_eq!(session.state().snake.head(), head);
        assert!(!session.turn(Direction::Right));

        assert!(session.toggle_pause(&mut scheduler));
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(scheduler.current, Some(Duration::from_millis(150)));
        assert_eq!(session.next_direction(), Direction::Left);
    }

    #[test]
    fn test_idle_and_game_over_ignore_everything_but_start() {
        let mut session = session();
        let mut scheduler = RecordingScheduler::default();

        assert_eq!(session.tick(&mut scheduler), TickOutcome::Ignored);
        assert!(!session.toggle_pause(&mut scheduler));
        assert!(!session.turn(Direction::Left));

        session.start("Alex", &mut scheduler).unwrap();
        session.status = GameStatus::GameOver;

        assert_eq!(session.tick(&mut scheduler), TickOutcome::Ignored);
        assert!(!session.toggle_pause(&mut scheduler));
        assert_eq!(session.status(), GameStatus::GameOver);
    }

    #[test]
    fn test_restart_bumps_generation_and_resets() {
        let (mut session, mut scheduler) = started();
        session.state.score = 120;
        session.status = GameStatus::GameOver;

        session
            .apply(Command::Start("Alex".to_string()), &mut scheduler)
            .unwrap();

        assert_eq!(session.generation(), 2);
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().snake.len(), 3);
    }

    #[test]
    fn test_game_over_summary() {
        let (mut session, mut scheduler) = started();
        session.state.score = 30;
        session.state.food = Position::new(0, 0);

        let mut outcome = TickOutcome::Ignored;
        for _ in 0..20 {
            outcome = session.tick(&mut scheduler);
            if matches!(outcome, TickOutcome::GameOver(_)) {
                break;
            }
        }

        assert_eq!(
            outcome,
            TickOutcome::GameOver(GameOverSummary {
                generation: 1,
                player_name: "Alex".to_string(),
                score: 30,
                length: 3,
                reason: GameOverReason::Wall,
            })
        );
    }
}
