use serde::{Deserialize, Serialize};

/// Direction the snake can be steered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn velocity(&self) -> Velocity {
        let (dx, dy) = self.delta();
        Velocity { dx, dy }
    }
}

/// Per-tick displacement of the snake head.
///
/// Only constructible from a [`Direction`] or as [`Velocity::STILL`], so at
/// most one axis is ever non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Velocity {
    dx: i32,
    dy: i32,
}

impl Velocity {
    /// The idle velocity, used before the first move and after game over
    pub const STILL: Velocity = Velocity { dx: 0, dy: 0 };

    pub fn dx(&self) -> i32 {
        self.dx
    }

    pub fn dy(&self) -> i32 {
        self.dy
    }

    pub fn is_still(&self) -> bool {
        *self == Self::STILL
    }

    /// Returns true if `candidate` would turn the snake straight back onto
    /// the cell it just left.
    ///
    /// Against [`Velocity::STILL`] only `STILL` itself counts as a reversal,
    /// so any real direction is accepted before the first move.
    pub fn reverses(&self, candidate: Velocity) -> bool {
        self.dx + candidate.dx == 0 && self.dy + candidate.dy == 0
    }
}

impl From<Direction> for Velocity {
    fn from(direction: Direction) -> Self {
        direction.velocity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_opposite_velocities_reverse() {
        let up = Velocity::from(Direction::Up);
        let down = Velocity::from(Direction::Down);
        let left = Velocity::from(Direction::Left);
        let right = Velocity::from(Direction::Right);

        assert!(up.reverses(down));
        assert!(down.reverses(up));
        assert!(left.reverses(right));
        assert!(right.reverses(left));

        assert!(!up.reverses(left));
        assert!(!up.reverses(right));
        assert!(!up.reverses(up));
    }

    #[test]
    fn test_still_accepts_any_direction() {
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert!(!Velocity::STILL.reverses(direction.into()));
        }
        assert!(Velocity::STILL.reverses(Velocity::STILL));
    }
}
