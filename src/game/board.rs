//! Geometry of the fixed playing field.
//!
//! Coordinates are display cells relative to the top-left corner of the
//! display area, so the board's frame sits at
//! ([`LEFT_X`][consts::LEFT_X], [`LEFT_Y`][consts::LEFT_Y]).  The snake only
//! ever occupies interior cells on columns aligned to
//! [`X_STEP`][consts::X_STEP].  Food is placed on the same cells except for
//! the bottom row.
use crate::consts::{self, X_STEP, Y_STEP};
use ratatui::layout::Rect;

/// Leftmost playable column
pub(crate) const MIN_X: i32 = consts::LEFT_X + 1 + X_STEP;

/// Rightmost playable column
pub(crate) const MAX_X: i32 = consts::RIGHT_X - X_STEP;

/// Topmost playable row
pub(crate) const MIN_Y: i32 = consts::LEFT_Y + Y_STEP;

/// Bottommost row the snake can reach
pub(crate) const MAX_Y: i32 = consts::RIGHT_Y;

/// Bottommost row that food is placed on
pub(crate) const MAX_FOOD_Y: i32 = MAX_Y - Y_STEP;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Position {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Position {
    pub(crate) const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }
}

/// Wrap a column that has stepped past the left or right side of the
/// playable area around to the opposite side
pub(crate) fn wrap_x(x: i32) -> i32 {
    if x < MIN_X {
        MAX_X
    } else if x > MAX_X {
        MIN_X
    } else {
        x
    }
}

/// Wrap a row that has stepped past the top or bottom of the playable area
/// around to the opposite side
pub(crate) fn wrap_y(y: i32) -> i32 {
    if y < MIN_Y {
        MAX_Y
    } else if y > MAX_Y {
        MIN_Y
    } else {
        y
    }
}

/// Returns `true` if `pos` is a cell that the snake can occupy
pub(crate) fn contains(pos: Position) -> bool {
    (MIN_X..=MAX_X).contains(&pos.x)
        && (pos.x - MIN_X) % X_STEP == 0
        && (MIN_Y..=MAX_Y).contains(&pos.y)
}

/// Returns `true` if food can be placed on `pos`
pub(crate) fn holds_food(pos: Position) -> bool {
    contains(pos) && pos.y <= MAX_FOOD_Y
}

/// Iterate over every cell that can hold food, row by row
pub(crate) fn food_positions() -> impl Iterator<Item = Position> {
    (MIN_Y..=MAX_FOOD_Y)
        .flat_map(|y| (MIN_X..=MAX_X).map(move |x| Position::new(x, y)))
        .filter(|&p| holds_food(p))
}

/// The number of cells that can hold food
pub(crate) fn food_capacity() -> usize {
    food_positions().count()
}

/// Where the head of a new snake is placed
pub(crate) fn center() -> Position {
    Position::new(consts::RIGHT_X / 2, consts::RIGHT_Y / 2)
}

/// The area covered by the board's frame, relative to the display area
pub(crate) fn frame() -> Rect {
    let x = u16::try_from(consts::LEFT_X).unwrap_or_default();
    let y = u16::try_from(consts::LEFT_Y).unwrap_or_default();
    let right = u16::try_from(consts::RIGHT_X).unwrap_or_default();
    // The bottom edge is drawn one row beneath `RIGHT_Y`.
    let bottom = u16::try_from(consts::RIGHT_Y + 1).unwrap_or_default();
    Rect::new(x, y, right - x + 1, bottom - y + 1)
}
