use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{
    action::Direction,
    config::GameConfig,
    state::{GameOverReason, GameState, Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Why the game ended, if it did
    pub game_over: Option<GameOverReason>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn moved(ate_food: bool) -> Self {
        Self {
            terminated: false,
            info: StepInfo {
                ate_food,
                game_over: None,
            },
        }
    }

    fn ended(ate_food: bool, reason: GameOverReason) -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                ate_food,
                game_over: Some(reason),
            },
        }
    }
}

/// The game engine that handles all grid logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine with a fixed food sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state: snake centred, heading up
    pub fn reset(&mut self) -> GameState {
        let center = (self.config.grid_size / 2) as i32;

        let snake = Snake::new(
            Position::new(center, center),
            Direction::Up,
            self.config.initial_snake_length,
        );

        // A fresh snake always leaves free cells on any sane grid
        let food = self
            .spawn_food_avoid_snake(&snake)
            .unwrap_or(Position::new(0, 0));

        GameState::new(snake, food, self.config.grid_size)
    }

    /// Execute one tick, moving the snake in `direction`
    ///
    /// Direction validity is the caller's concern; reversal is filtered when
    /// input is buffered, not here. On a collision the state is left exactly
    /// as it was before the tick.
    pub fn step(&mut self, state: &mut GameState, direction: Direction) -> StepResult {
        state.snake.direction = direction;

        let new_head = state.snake.head().moved_in_direction(direction);

        if !state.is_in_bounds(new_head) {
            return StepResult::ended(false, GameOverReason::Wall);
        }

        let ate_food = new_head == state.food;

        if state.snake.would_collide(new_head, ate_food) {
            return StepResult::ended(false, GameOverReason::SelfCollision);
        }

        state.snake.advance(new_head, ate_food);

        if !ate_food {
            return StepResult::moved(false);
        }

        state.score += self.config.food_points;
        match self.spawn_food_avoid_snake(&state.snake) {
            Some(food) => {
                state.food = food;
                StepResult::moved(true)
            }
            None => StepResult::ended(true, GameOverReason::BoardFilled),
        }
    }

    /// Spawn food at a uniformly random free cell, or `None` if the board is full
    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Option<Position> {
        let size = self.config.grid_size;
        if snake.len() >= size * size {
            return None;
        }

        loop {
            let x = self.rng.gen_range(0..size) as i32;
            let y = self.rng.gen_range(0..size) as i32;
            let pos = Position::new(x, y);

            if !snake.body.contains(&pos) {
                return Some(pos);
            }
        }
    }
}
