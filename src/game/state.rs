use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake: a head plus a chain of trailing segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    head: Position,
    /// Segments ordered by distance from the head, nearest first
    body: Vec<Position>,
    direction: Direction,
}

impl Snake {
    /// A bare head with no body
    pub fn new(head: Position, direction: Direction) -> Self {
        Self::with_body(head, Vec::new(), direction)
    }

    pub fn with_body(head: Position, body: Vec<Position>, direction: Direction) -> Self {
        Self {
            head,
            body,
            direction,
        }
    }

    /// A straight snake with `segments` body cells laid out behind the head
    pub fn with_length(head: Position, direction: Direction, segments: usize) -> Self {
        let back = direction.reverse();
        let body = std::iter::successors(Some(head), |pos| Some(pos.moved_in_direction(back)))
            .skip(1)
            .take(segments)
            .collect();

        Self::with_body(head, body, direction)
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Check if position collides with a body segment (the head excluded)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Shift every segment one place toward the head, then move the head.
    ///
    /// The segment nearest the head lands on the head's old cell, so the
    /// shift has to happen before the head moves.
    pub fn advance(&mut self) {
        if !self.body.is_empty() {
            self.body.rotate_right(1);
            self.body[0] = self.head;
        }
        self.head = self.head.moved_in_direction(self.direction);
    }

    /// Append a segment on the head's cell. It trails off on the next advance.
    pub fn grow(&mut self) {
        self.body.push(self.head);
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Head left the grid
    Wall,
    /// Head ran into a body segment
    SelfCollision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::with_length(Position::new(5, 5), Direction::Right, 2);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body(), &[Position::new(4, 5), Position::new(3, 5)]);

        let bare = Snake::new(Position::new(1, 1), Direction::Up);
        assert!(bare.body().is_empty());
    }

    #[test]
    fn test_advance_propagates_from_old_head() {
        let mut snake = Snake::with_length(Position::new(5, 5), Direction::Right, 3);
        snake.set_direction(Direction::Down);
        snake.advance();

        assert_eq!(snake.head(), Position::new(5, 6));
        assert_eq!(
            snake.body(),
            &[Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]
        );
    }

    #[test]
    fn test_advance_without_body() {
        let mut snake = Snake::new(Position::new(0, 0), Direction::Right);
        snake.advance();
        assert_eq!(snake.head(), Position::new(1, 0));
        assert!(snake.body().is_empty());
    }

    #[test]
    fn test_grown_segment_trails_next_advance() {
        let mut snake = Snake::with_length(Position::new(5, 5), Direction::Right, 1);
        snake.grow();
        assert_eq!(snake.body(), &[Position::new(4, 5), Position::new(5, 5)]);

        snake.advance();
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.body(), &[Position::new(5, 5), Position::new(4, 5)]);
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::with_length(Position::new(5, 5), Direction::Right, 2);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
    }
}
