use std::collections::VecDeque;

use super::config::GameConfig;
use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// The snake in the game
///
/// The body is never empty; index 0 is the head.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    /// Direction applied on the last advance
    pub direction: Direction,
    /// Direction the next advance will commit
    pub pending_direction: Direction,
    grew: bool,
    start: Position,
}

impl Snake {
    /// Create a one-segment idle snake at `start`
    pub fn new(start: Position) -> Self {
        Self {
            body: VecDeque::from([start]),
            direction: Direction::Idle,
            pending_direction: Direction::Idle,
            grew: false,
            start,
        }
    }

    /// Build a snake from explicit segments, head first, already moving in `direction`
    ///
    /// Falls back to a single segment at the origin when `segments` is empty.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Self {
        let mut body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            body.push_back(Position::new(0, 0));
        }
        let start = body[0];
        Self {
            body,
            direction,
            pending_direction: direction,
            grew: false,
            start,
        }
    }

    /// Back to a single idle segment on the start cell
    pub fn reset(&mut self) {
        self.body.clear();
        self.body.push_back(self.start);
        self.direction = Direction::Idle;
        self.pending_direction = Direction::Idle;
        self.grew = false;
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All segments, head first
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Body segments excluding the head
    pub fn body_segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter().skip(1)
    }

    /// Queue a direction change for the next advance
    ///
    /// `Idle` and a reversal of the committed direction are rejected and leave the
    /// pending direction untouched. Only `reset` puts the snake back to rest.
    /// Returns whether the change was accepted.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction.is_idle() || self.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    /// Commit the pending direction and move one cell
    pub fn advance(&mut self) {
        self.direction = self.pending_direction;
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.push_front(new_head);

        if !self.grew {
            self.body.pop_back();
        }
        self.grew = false;
    }

    /// Grow by one cell on the next advance
    pub fn grow(&mut self) {
        self.grew = true;
    }

    pub fn has_pending_growth(&self) -> bool {
        self.grew
    }

    /// Wall check for the head; wraps it onto the grid when `wall_pass` is set
    ///
    /// Returns true on a collision, which can only happen with `wall_pass` off.
    pub fn check_collision_walls(&mut self, width: usize, height: usize, wall_pass: bool) -> bool {
        let (w, h) = (width as i32, height as i32);
        let head = &mut self.body[0];

        if wall_pass {
            head.x = head.x.rem_euclid(w);
            head.y = head.y.rem_euclid(h);
            return false;
        }

        head.x < 0 || head.x >= w || head.y < 0 || head.y >= h
    }

    /// Check if the head sits on any other segment
    pub fn check_collision_self(&self) -> bool {
        let head = self.head();
        self.body_segments().any(|segment| *segment == head)
    }

    /// Walls first (which may wrap the head), then self
    pub fn check_collision(
        &mut self,
        width: usize,
        height: usize,
        wall_pass: bool,
    ) -> Option<CollisionType> {
        if self.check_collision_walls(width, height, wall_pass) {
            return Some(CollisionType::Wall);
        }
        if self.check_collision_self() {
            return Some(CollisionType::SelfCollision);
        }
        None
    }

    /// Check if position is occupied by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub config: GameConfig,
    pub score: u32,
    pub steps: u32,
    pub running: bool,
}

impl GameState {
    /// Fresh, stopped state: snake on the grid centre, food at three quarters
    pub fn new(config: GameConfig) -> Self {
        let start = Position::new(
            (config.grid_width / 2) as i32,
            (config.grid_height / 2) as i32,
        );
        let food = Position::new(
            (config.grid_width * 3 / 4) as i32,
            (config.grid_height * 3 / 4) as i32,
        );

        Self {
            snake: Snake::new(start),
            food,
            config,
            score: 0,
            steps: 0,
            running: false,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.config.grid_width as i32
            && pos.y >= 0
            && pos.y < self.config.grid_height as i32
    }
}
