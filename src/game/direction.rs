use super::board::{self, Position};
use crate::consts::{X_STEP, Y_STEP};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Step once from `pos` in this direction, wrapping around the edges of
    /// the board
    pub(crate) fn advance(self, pos: Position) -> Position {
        let Position { x, y } = pos;
        match self {
            Direction::North => Position::new(x, board::wrap_y(y - Y_STEP)),
            Direction::East => Position::new(board::wrap_x(x + X_STEP), y),
            Direction::South => Position::new(x, board::wrap_y(y + Y_STEP)),
            Direction::West => Position::new(board::wrap_x(x - X_STEP), y),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}
