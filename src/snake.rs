use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::grid::Cell;
use crate::input::{Direction, direction_change_is_valid};

/// Mutable snake state and turn-queue arbitration.
///
/// `body` is ordered head first. `occupied` mirrors the same cells as a set
/// and is updated on every move, so membership checks stay O(1) on large
/// boards.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    occupied: HashSet<Cell>,
    direction: Direction,
    pending_turns: VecDeque<Direction>,
}

impl Snake {
    /// Creates a one-cell snake at `start` heading in `direction`.
    #[must_use]
    pub fn new(start: Cell, direction: Direction) -> Self {
        Self::from_segments(vec![start], direction)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Self {
        assert!(
            !segments.is_empty(),
            "snake body must contain at least one segment"
        );

        let occupied = segments.iter().copied().collect();
        Self {
            body: VecDeque::from(segments),
            occupied,
            direction,
            pending_turns: VecDeque::new(),
        }
    }

    /// Queues a requested turn, collapsing repeats of the last queued one.
    ///
    /// Reversals are accepted here and judged in [`Snake::apply_next_turn`]
    /// against the direction in force at that moment.
    pub fn queue_turn(&mut self, direction: Direction) {
        if self.pending_turns.back() != Some(&direction) {
            self.pending_turns.push_back(direction);
        }
    }

    /// Commits at most one queued turn.
    ///
    /// A reversal at the front of the queue is never committed. It is
    /// discarded as soon as another turn is queued behind it, and that turn is
    /// then considered instead; on its own it stays queued.
    pub fn apply_next_turn(&mut self) -> Option<Direction> {
        loop {
            let next = *self.pending_turns.front()?;

            if direction_change_is_valid(self.direction, next) {
                self.pending_turns.pop_front();
                self.direction = next;
                return Some(next);
            }

            trace!(current = ?self.direction, requested = ?next, "reversal suppressed");
            if self.pending_turns.len() == 1 {
                return None;
            }
            self.pending_turns.pop_front();
        }
    }

    /// Returns the cell the head would enter on the next move.
    #[must_use]
    pub fn next_head(&self) -> Cell {
        self.head().step(self.direction)
    }

    /// Advances one cell in the current direction without any bounds check.
    ///
    /// When `grow` is false the tail cell is dropped, keeping the length.
    pub fn move_forward(&mut self, grow: bool) {
        let next_head = self.next_head();

        if !grow {
            if let Some(tail) = self.body.pop_back() {
                self.occupied.remove(&tail);
            }
        }

        debug_assert!(
            !self.occupied.contains(&next_head),
            "snake moved onto itself at {next_head:?}"
        );
        self.body.push_front(next_head);
        self.occupied.insert(next_head);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when the body has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the committed movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Turns still waiting to be applied, oldest first.
    pub fn pending_turns(&self) -> impl Iterator<Item = Direction> + '_ {
        self.pending_turns.iter().copied()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::Cell;
    use crate::input::Direction;

    use super::Snake;

    #[test]
    fn snake_moves_one_cell_per_tick() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);

        snake.move_forward(false);

        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.len(), 1);
        assert!(!snake.occupies(Cell::new(5, 5)));
        assert!(!snake.is_empty());
    }

    #[test]
    fn snake_growth_keeps_previous_tail() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);

        snake.move_forward(true);

        assert_eq!(snake.len(), 2);
        assert_eq!(
            snake.segments().copied().collect::<Vec<_>>(),
            vec![Cell::new(6, 5), Cell::new(5, 5)]
        );
        assert!(snake.occupies(Cell::new(5, 5)));
        assert!(snake.occupies(Cell::new(6, 5)));
    }

    #[test]
    fn move_does_not_check_bounds() {
        let mut snake = Snake::new(Cell::new(0, 0), Direction::Left);

        snake.move_forward(false);

        assert_eq!(snake.head(), Cell::new(-1, 0));
    }

    #[test]
    fn occupancy_tracks_body_through_a_turning_walk() {
        let mut snake = Snake::from_segments(
            vec![Cell::new(3, 3), Cell::new(2, 3), Cell::new(1, 3)],
            Direction::Right,
        );

        for (turn, grow) in [
            (Direction::Down, false),
            (Direction::Left, true),
            (Direction::Up, false),
        ] {
            snake.queue_turn(turn);
            snake.apply_next_turn();
            snake.move_forward(grow);
        }

        let body: Vec<Cell> = snake.segments().copied().collect();
        assert_eq!(
            body,
            vec![
                Cell::new(2, 3),
                Cell::new(2, 4),
                Cell::new(3, 4),
                Cell::new(3, 3)
            ]
        );
        for cell in &body {
            assert!(snake.occupies(*cell));
        }
        assert!(!snake.occupies(Cell::new(1, 3)));
    }

    #[test]
    fn repeated_turn_is_queued_once() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);

        snake.queue_turn(Direction::Up);
        snake.queue_turn(Direction::Up);

        assert_eq!(
            snake.pending_turns().collect::<Vec<_>>(),
            vec![Direction::Up]
        );
    }

    #[test]
    fn non_consecutive_repeats_are_kept() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);

        snake.queue_turn(Direction::Up);
        snake.queue_turn(Direction::Left);
        snake.queue_turn(Direction::Up);

        assert_eq!(snake.pending_turns().count(), 3);
    }

    #[test]
    fn only_one_turn_is_applied_per_call() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);

        snake.queue_turn(Direction::Up);
        snake.queue_turn(Direction::Down);

        assert_eq!(snake.apply_next_turn(), Some(Direction::Up));
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(
            snake.pending_turns().collect::<Vec<_>>(),
            vec![Direction::Down]
        );
    }

    #[test]
    fn lone_reversal_is_suppressed_and_stays_queued() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Up);

        snake.queue_turn(Direction::Down);

        assert_eq!(snake.apply_next_turn(), None);
        assert_eq!(snake.apply_next_turn(), None);
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(
            snake.pending_turns().collect::<Vec<_>>(),
            vec![Direction::Down]
        );

        snake.move_forward(false);
        assert_eq!(snake.head(), Cell::new(5, 4));
    }

    #[test]
    fn reversal_is_discarded_once_another_turn_follows() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Up);

        snake.queue_turn(Direction::Down);
        assert_eq!(snake.apply_next_turn(), None);

        snake.queue_turn(Direction::Left);
        snake.queue_turn(Direction::Up);

        assert_eq!(snake.apply_next_turn(), Some(Direction::Left));
        assert_eq!(
            snake.pending_turns().collect::<Vec<_>>(),
            vec![Direction::Up]
        );
    }

    #[test]
    fn direction_never_reverses_across_a_burst_of_turns() {
        let mut snake = Snake::new(Cell::new(10, 10), Direction::Right);
        let burst = [
            Direction::Left,
            Direction::Up,
            Direction::Down,
            Direction::Right,
            Direction::Left,
            Direction::Down,
        ];

        for direction in burst {
            snake.queue_turn(direction);
        }

        for _ in 0..burst.len() {
            let before = snake.direction();
            snake.apply_next_turn();
            assert_ne!(snake.direction(), before.opposite());
            snake.move_forward(false);
        }
    }

    #[test]
    fn empty_queue_keeps_direction() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Left);

        assert_eq!(snake.apply_next_turn(), None);
        assert_eq!(snake.direction(), Direction::Left);
        assert_eq!(snake.next_head(), Cell::new(4, 5));
    }

    #[test]
    #[should_panic(expected = "at least one segment")]
    fn empty_segments_are_rejected() {
        let _ = Snake::from_segments(Vec::new(), Direction::Right);
    }
}
