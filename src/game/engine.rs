use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::{debug, info};

use super::{
    config::{ConfigError, GameConfig},
    direction::Direction,
    state::{CollisionKind, Position, Snake},
};

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the food and grew by one segment
    Ate,
    /// The snake collided and the game was reset
    Collided {
        kind: CollisionKind,
        /// Score held when the collision happened
        final_score: usize,
    },
}

/// Complete game state, driven one tick at a time by [`GameState::step`]
#[derive(Debug)]
pub struct GameState<R = StdRng> {
    config: GameConfig,
    grid_width: i32,
    grid_height: i32,
    snake: Snake,
    pending_direction: Option<Direction>,
    food: Position,
    rng: R,
    game_over: bool,
    ticks: u64,
}

impl GameState<StdRng> {
    /// Create a game whose food placement is seeded from the config, or from
    /// entropy when the config carries no seed
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameState<R> {
    /// Create a game at its starting layout with one placed food
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        let snake = Snake::new(config.origin, Direction::default());
        let mut state = Self::from_parts(config, rng, snake, Position::default())?;
        state.place_food();
        Ok(state)
    }

    /// Create a game from an explicit snake and food cell.
    ///
    /// Every cell must lie on the grid and the snake may not cover a cell twice.
    pub fn from_parts(
        config: GameConfig,
        rng: R,
        snake: Snake,
        food: Position,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let state = Self {
            grid_width: config.grid_width() as i32,
            grid_height: config.grid_height() as i32,
            config,
            snake,
            pending_direction: None,
            food,
            rng,
            game_over: false,
            ticks: 0,
        };
        state.check_layout()?;

        Ok(state)
    }

    fn check_layout(&self) -> Result<(), ConfigError> {
        let cells = std::iter::once(("head", self.snake.head()))
            .chain(self.snake.body().iter().map(|&pos| ("body segment", pos)))
            .chain(std::iter::once(("food", self.food)));
        for (part, pos) in cells {
            if !self.is_in_bounds(pos) {
                return Err(ConfigError::CellOutOfBounds {
                    part,
                    x: pos.x,
                    y: pos.y,
                });
            }
        }

        let mut covered = HashSet::new();
        for &pos in std::iter::once(&self.snake.head()).chain(self.snake.body()) {
            if !covered.insert(pos) {
                return Err(ConfigError::OverlappingSnake { x: pos.x, y: pos.y });
            }
        }

        Ok(())
    }

    /// Advance the simulation by exactly one tick
    pub fn step(&mut self) -> StepOutcome {
        self.ticks += 1;

        if let Some(direction) = self.pending_direction.take() {
            self.snake.set_direction(direction);
        }

        self.snake.advance();

        // Compared against the already shifted body
        if let Some(kind) = self.check_collision() {
            let final_score = self.score();
            self.game_over = true;
            info!(
                ?kind,
                final_score,
                tick = self.ticks,
                head = ?self.snake.head(),
                "snake collided; resetting"
            );
            self.reset();
            return StepOutcome::Collided { kind, final_score };
        }

        if self.snake.head() == self.food {
            self.snake.grow();
            self.place_food();
            debug!(score = self.score(), food = ?self.food, "food eaten");
            return StepOutcome::Ate;
        }

        StepOutcome::Moved
    }

    /// Queue a direction for the next tick.
    ///
    /// The reverse of the committed direction is dropped. Between two ticks the
    /// last accepted request wins. Returns whether the request was accepted.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.snake.direction().is_opposite(requested) {
            return false;
        }
        self.pending_direction = Some(requested);
        true
    }

    /// Put the snake back on the origin with an empty body heading right
    pub fn reset(&mut self) {
        self.snake = Snake::new(self.config.origin, Direction::default());
        self.pending_direction = None;
        self.place_food();
        self.game_over = false;
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.grid_width && pos.y >= 0 && pos.y < self.grid_height
    }

    fn check_collision(&self) -> Option<CollisionKind> {
        let head = self.snake.head();

        if !self.is_in_bounds(head) {
            return Some(CollisionKind::Wall);
        }

        if self.snake.collides_with_body(head) {
            return Some(CollisionKind::SelfCollision);
        }

        None
    }

    // Occupied cells are not excluded.
    fn place_food(&mut self) {
        self.food = Position::new(
            self.rng.gen_range(0..self.grid_width),
            self.rng.gen_range(0..self.grid_height),
        );
    }

    pub fn head(&self) -> Position {
        self.snake.head()
    }

    pub fn body(&self) -> &[Position] {
        self.snake.body()
    }

    pub fn food(&self) -> Position {
        self.food
    }

    /// Committed direction of travel
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Number of body segments
    pub fn score(&self) -> usize {
        self.snake.body().len()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn grid_width(&self) -> u32 {
        self.grid_width as u32
    }

    pub fn grid_height(&self) -> u32 {
        self.grid_height as u32
    }

    pub fn tile_size(&self) -> u32 {
        self.config.tile_size
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Ticks since the game was created
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
