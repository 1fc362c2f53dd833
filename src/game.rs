use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::food::{FALLBACK_CELL, spawn_position};
use crate::grid::{Cell, Grid};
use crate::input::{Direction, GameInput};
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    GameOver,
    /// The snake covers every cell of the board.
    Victory,
}

impl GameStatus {
    /// Returns true for the terminal states that wait for restart or quit.
    #[must_use]
    pub fn is_finished(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// What ended the last game.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathReason {
    Wall,
    SelfCollision,
}

/// Whether the driving loop should keep running after a tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Control {
    Continue,
    Quit,
}

/// Read-only view of one frame, handed to the presentation layer.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    pub snake_cells: Vec<Cell>,
    pub head_index: usize,
    pub food: Cell,
    pub score: u32,
    pub state: GameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_reason: Option<DeathReason>,
    pub tick: u64,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct Session {
    pub snake: Snake,
    pub food: Cell,
    pub score: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    grid: Grid,
    rng: StdRng,
}

impl Session {
    /// Creates a session whose food placement is seeded from OS entropy.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self::from_rng(grid, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    #[must_use]
    pub fn with_seed(grid: Grid, seed: u64) -> Self {
        Self::from_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn from_rng(grid: Grid, rng: StdRng) -> Self {
        let start = grid.center();
        let mut session = Self {
            snake: Snake::new(start, Direction::Right),
            food: FALLBACK_CELL,
            score: 0,
            tick_count: 0,
            status: GameStatus::Playing,
            death_reason: None,
            grid,
            rng,
        };
        session.reset();
        session
    }

    /// Starts a new game on the same board.
    pub fn reset(&mut self) {
        self.snake = Snake::new(self.grid.center(), Direction::Right);
        self.score = 0;
        self.tick_count = 0;
        self.status = GameStatus::Playing;
        self.death_reason = None;
        self.food = self.spawn_food();

        // A one-cell board is already full before the first move.
        if self.snake.len() >= self.grid.total_cells() {
            self.status = GameStatus::Victory;
        }

        info!(
            cols = self.grid.cols(),
            rows = self.grid.rows(),
            start = ?self.snake.head(),
            food = ?self.food,
            "new game"
        );
    }

    /// Runs one frame: applies the drained inputs in order, then steps.
    ///
    /// A `Quit` anywhere in the batch ends the frame at once. While playing,
    /// `Restart` is ignored. Once the game has ended, direction inputs are
    /// ignored and a `Restart` starts a fresh game; the rest of that batch is
    /// only scanned for `Quit`, and the new game does not step until the
    /// next frame.
    pub fn tick<I>(&mut self, inputs: I) -> Control
    where
        I: IntoIterator<Item = GameInput>,
    {
        let mut restarted = false;

        for input in inputs {
            if restarted {
                if input == GameInput::Quit {
                    return Control::Quit;
                }
                continue;
            }

            let was_finished = self.status.is_finished();
            if self.apply_input(input) == Control::Quit {
                return Control::Quit;
            }
            restarted = was_finished && !self.status.is_finished();
        }

        if !restarted {
            self.step();
        }
        Control::Continue
    }

    /// Applies one external input event without advancing the simulation.
    pub fn apply_input(&mut self, input: GameInput) -> Control {
        match input {
            GameInput::Quit => return Control::Quit,
            GameInput::Direction(direction) => {
                if self.status == GameStatus::Playing {
                    self.snake.queue_turn(direction);
                }
            }
            GameInput::Restart => {
                if self.status.is_finished() {
                    self.reset();
                }
            }
        }

        Control::Continue
    }

    /// Advances the simulation by one step. No-op once the game has ended.
    pub fn step(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }

        self.tick_count += 1;
        if let Some(direction) = self.snake.apply_next_turn() {
            debug!(?direction, tick = self.tick_count, "turn committed");
        }

        let next_head = self.snake.next_head();
        if !self.grid.in_bounds(next_head) {
            self.end_game(DeathReason::Wall);
            return;
        }

        // The tail still counts as occupied even though it would move away.
        if self.snake.occupies(next_head) {
            self.end_game(DeathReason::SelfCollision);
            return;
        }

        let grow = next_head == self.food;
        self.snake.move_forward(grow);
        if !grow {
            return;
        }

        self.score += 1;
        if self.snake.len() >= self.grid.total_cells() {
            self.status = GameStatus::Victory;
            self.food = FALLBACK_CELL;
            info!(score = self.score, ticks = self.tick_count, "board filled");
            return;
        }

        self.food = self.spawn_food();
    }

    /// Returns a read-only copy of the current frame.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake_cells: self.snake.segments().copied().collect(),
            head_index: 0,
            food: self.food,
            score: self.score,
            state: self.status,
            death_reason: self.death_reason,
            tick: self.tick_count,
        }
    }

    /// Returns the board geometry this session plays on.
    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    fn end_game(&mut self, reason: DeathReason) {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        info!(
            ?reason,
            score = self.score,
            length = self.snake.len(),
            ticks = self.tick_count,
            "game over"
        );
    }

    fn spawn_food(&mut self) -> Cell {
        let food = spawn_position(&mut self.rng, self.grid, &self.snake);
        debug!(?food, "food spawned");
        food
    }
}
