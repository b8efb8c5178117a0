//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Column of the left edge of the board's frame
pub(crate) const LEFT_X: i32 = 1;

/// Row of the top edge of the board's frame
pub(crate) const LEFT_Y: i32 = 1;

/// Column of the right edge of the board's frame
pub(crate) const RIGHT_X: i32 = 60;

/// Row of the last line above the bottom edge of the board's frame
pub(crate) const RIGHT_Y: i32 = 20;

/// How far the snake moves horizontally per tick.  Terminal cells are about
/// twice as tall as they are wide, so this keeps movement looking square.
pub(crate) const X_STEP: i32 = 2;

/// How far the snake moves vertically per tick
pub(crate) const Y_STEP: i32 = 1;

/// Number of segments in a freshly-placed snake
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// Time between movements of the snake before the first level's speed-up is
/// applied
pub(crate) const INITIAL_TICK_PERIOD: Duration = Duration::from_millis(250);

/// Amount by which the tick period shrinks at the start of each level
pub(crate) const TICK_PERIOD_STEP: Duration = Duration::from_millis(20);

/// The tick period never drops below this
pub(crate) const MIN_TICK_PERIOD: Duration = Duration::from_millis(10);

/// Number of food items placed at the start of each level
pub(crate) const FOOD_PER_LEVEL: usize = 15;

/// Points awarded per food item eaten
pub(crate) const SCORE_WEIGHT: u32 = 10;

/// Number of levels in a complete game
pub(crate) const MAX_LEVEL: u32 = 10;

/// Glyph for the snake's head
pub(crate) const SNAKE_HEAD_SYMBOL: char = '@';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '*';

/// Glyph for food
pub(crate) const FOOD_SYMBOL: char = '♥';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for the snake's head once it has run into itself
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for the end-of-game banner
pub(crate) const BANNER_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

/// Message shown when every level has been cleared
pub(crate) const WIN_MESSAGE: &str = "You Won the Game!";

/// Message shown when the snake runs into itself
pub(crate) const LOSE_MESSAGE: &str = "Game Over!";

/// Help line shown beneath the board
pub(crate) const EXIT_HINT: &str = "Press ESC to exit the game";
