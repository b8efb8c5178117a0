pub(crate) mod board;
mod direction;
mod food;
mod snake;
pub(crate) use self::direction::Direction;
use self::board::Position;
use self::food::FoodSet;
use self::snake::Snake;
use crate::config::GameSettings;
use crate::consts;
use crate::util::get_display_area;
use log::{debug, info};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    settings: GameSettings,
    score: u32,
    level: u32,
    speed: Duration,
    snake: Snake,
    food: FoodSet,
    phase: Phase,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(settings: GameSettings) -> Self {
        Game::new_with_rng(settings, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    /// Create a game that is waiting for its first level to start
    pub(crate) fn new_with_rng(settings: GameSettings, rng: R) -> Game<R> {
        Game {
            rng,
            settings,
            score: 0,
            level: 0,
            speed: settings.initial_speed,
            snake: Snake::new(
                board::center(),
                Direction::East,
                consts::INITIAL_SNAKE_LENGTH,
            ),
            food: FoodSet::default(),
            phase: Phase::LevelStart,
        }
    }

    /// Set up the next level: place a fresh snake & fresh food and speed up
    /// the clock.  Does nothing unless the game is at a level start.
    pub(crate) fn start_level(&mut self) {
        if self.phase != Phase::LevelStart {
            return;
        }
        self.snake = Snake::new(
            board::center(),
            Direction::East,
            consts::INITIAL_SNAKE_LENGTH,
        );
        self.food = FoodSet::spawn(self.settings.food_per_level, &mut self.rng, &self.snake);
        self.speed = self
            .speed
            .saturating_sub(self.settings.speed_step)
            .max(consts::MIN_TICK_PERIOD);
        self.level += 1;
        self.phase = Phase::Running;
        info!(
            "Level {} started with {} food items; tick period {:?}",
            self.level,
            self.food.len(),
            self.speed
        );
    }
}

impl<R> Game<R> {
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    /// The current time between ticks
    pub(crate) fn speed(&self) -> Duration {
        self.speed
    }

    /// Point the snake in `direction`, unless that would reverse it.  Ignored
    /// outside of a running level.
    pub(crate) fn turn(&mut self, direction: Direction) {
        if self.phase == Phase::Running && !self.snake.turn(direction) {
            debug!(
                "Ignoring turn to {direction:?} while heading {:?}",
                self.snake.heading()
            );
        }
    }

    /// Advance the simulation by one step
    pub(crate) fn tick(&mut self) -> Outcome {
        if self.phase != Phase::Running {
            return Outcome::InProgress;
        }
        self.snake.advance();
        if self.food.consume(self.snake.head()) {
            self.score = self.score.saturating_add(consts::SCORE_WEIGHT);
            self.snake.grow();
            debug!(
                "Ate food at {:?}; {} left",
                self.snake.head(),
                self.food.len()
            );
        } else if self.snake.is_self_intersecting() {
            info!(
                "Snake ran into itself at {:?} on level {}",
                self.snake.head(),
                self.level
            );
            self.phase = Phase::GameLost;
            return Outcome::Lose;
        }
        if self.food.is_empty() {
            info!("Level {} cleared with score {}", self.level, self.score);
            self.phase = Phase::LevelWon;
            return Outcome::Win;
        }
        Outcome::InProgress
    }

    /// Move on from a cleared level, either to the start of the next level
    /// or, after the last level, to the end of the game
    pub(crate) fn advance_level(&mut self) {
        if self.phase != Phase::LevelWon {
            return;
        }
        self.phase = if self.level < self.settings.max_level {
            Phase::LevelStart
        } else {
            Phase::GameComplete
        };
    }

    fn banner(&self) -> Option<&'static str> {
        match self.phase {
            Phase::GameComplete => Some(consts::WIN_MESSAGE),
            Phase::GameLost => Some(consts::LOSE_MESSAGE),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    /// A new snake & new food are about to be placed
    LevelStart,
    Running,
    /// All food on the level has been eaten
    LevelWon,
    /// The snake ran into itself
    GameLost,
    /// The last level has been won
    GameComplete,
}

/// What a single tick did to the game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    InProgress,
    Win,
    Lose,
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let frame = board::frame();
        let frame = Rect {
            x: display.x.saturating_add(frame.x),
            y: display.y.saturating_add(frame.y),
            ..frame
        }
        .intersection(display);
        Block::bordered().render(frame, buf);

        let mut canvas = Canvas { area: display, buf };
        canvas.draw_text(
            Position::new(consts::LEFT_X + 1, consts::LEFT_Y - 1),
            &format!("Level: {}", self.level),
            Style::new(),
        );
        canvas.draw_text(
            Position::new(consts::RIGHT_X - 11, consts::LEFT_Y - 1),
            &format!("Score: {}", self.score),
            Style::new(),
        );
        canvas.draw_text(
            Position::new(consts::LEFT_X + 1, consts::RIGHT_Y + 2),
            consts::EXIT_HINT,
            Style::new(),
        );
        for pos in self.food.iter() {
            canvas.draw_cell(pos, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        for &pos in self.snake.body() {
            canvas.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        let head_style = if self.phase == Phase::GameLost {
            consts::COLLISION_STYLE
        } else {
            consts::SNAKE_STYLE
        };
        canvas.draw_cell(self.snake.head(), consts::SNAKE_HEAD_SYMBOL, head_style);

        if let Some(msg) = self.banner() {
            let y = frame
                .y
                .saturating_add(u16::try_from(board::center().y - consts::LEFT_Y).unwrap_or(0));
            Line::from(Span::styled(msg, consts::BANNER_STYLE))
                .centered()
                .render(
                    Rect {
                        y,
                        height: 1,
                        ..frame
                    },
                    buf,
                );
        }
    }
}

/// Draws at board coordinates within the display area
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn locate(&self, pos: Position) -> Option<(u16, u16)> {
        let x = self.area.x.checked_add(u16::try_from(pos.x).ok()?)?;
        let y = self.area.y.checked_add(u16::try_from(pos.y).ok()?)?;
        (x < self.area.right() && y < self.area.bottom()).then_some((x, y))
    }

    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(xy) = self.locate(pos) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut(xy) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }

    fn draw_text(&mut self, pos: Position, text: &str, style: Style) {
        let Some((x, y)) = self.locate(pos) else {
            return;
        };
        let width = usize::from(self.area.right() - x);
        let _ = self.buf.set_stringn(x, y, text, width, style);
    }
}

#[cfg(test)]
impl<R> Game<R> {
    /// Replace the snake & food and mark the level as running
    pub(crate) fn stage<I, J>(&mut self, segments: I, heading: Direction, food: J)
    where
        I: IntoIterator<Item = Position>,
        J: IntoIterator<Item = Position>,
    {
        self.snake = Snake::from_segments(segments, Some(heading));
        self.food = food.into_iter().collect();
        self.phase = Phase::Running;
    }

    pub(crate) fn heading(&self) -> Option<Direction> {
        self.snake.heading()
    }

    pub(crate) fn head(&self) -> Position {
        self.snake.head()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game(settings: GameSettings) -> Game<ChaCha12Rng> {
        Game::new_with_rng(settings, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn started_game() -> Game<ChaCha12Rng> {
        let mut game = new_game(GameSettings::default());
        game.start_level();
        game
    }

    fn segments(game: &Game<ChaCha12Rng>) -> Vec<Position> {
        game.snake.segments().collect()
    }

    #[test]
    fn start_first_level() {
        let game = started_game();
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.level(), 1);
        assert_eq!(game.score(), 0);
        assert_eq!(game.speed(), Duration::from_millis(230));
        assert_eq!(
            segments(&game),
            [
                Position::new(30, 10),
                Position::new(28, 10),
                Position::new(26, 10)
            ]
        );
        assert_eq!(game.heading(), Some(Direction::East));
        assert_eq!(game.food.len(), consts::FOOD_PER_LEVEL);
        assert!(game.food.iter().all(board::holds_food));
        assert!(!game.food.iter().any(|p| segments(&game).contains(&p)));
    }

    #[test]
    fn start_level_only_at_level_start() {
        let mut game = started_game();
        let before = game.clone();
        game.start_level();
        assert_eq!(game, before);
    }

    #[test]
    fn speed_floor() {
        let mut game = new_game(GameSettings {
            initial_speed: Duration::from_millis(50),
            speed_step: Duration::from_millis(30),
            food_per_level: 1,
            max_level: 5,
        });
        let mut speeds = Vec::new();
        for _ in 0..3 {
            game.start_level();
            speeds.push(game.speed());
            game.phase = Phase::LevelWon;
            game.advance_level();
        }
        assert_eq!(
            speeds,
            [
                Duration::from_millis(20),
                consts::MIN_TICK_PERIOD,
                consts::MIN_TICK_PERIOD
            ]
        );
        assert_eq!(game.level(), 3);
    }

    #[test]
    fn tick_moves_snake() {
        let mut game = started_game();
        game.stage(
            [
                Position::new(30, 10),
                Position::new(28, 10),
                Position::new(26, 10),
            ],
            Direction::East,
            [Position::new(10, 4)],
        );
        assert_eq!(game.tick(), Outcome::InProgress);
        assert_eq!(
            segments(&game),
            [
                Position::new(32, 10),
                Position::new(30, 10),
                Position::new(28, 10)
            ]
        );
        assert_eq!(game.score(), 0);
        assert_eq!(game.phase(), Phase::Running);
    }

    #[test]
    fn tick_wraps_across_right_edge() {
        let mut game = started_game();
        game.stage(
            [
                Position::new(board::MAX_X, 10),
                Position::new(board::MAX_X - 2, 10),
                Position::new(board::MAX_X - 4, 10),
            ],
            Direction::East,
            [Position::new(10, 4)],
        );
        assert_eq!(game.tick(), Outcome::InProgress);
        assert_eq!(
            segments(&game),
            [
                Position::new(board::MIN_X, 10),
                Position::new(board::MAX_X, 10),
                Position::new(board::MAX_X - 2, 10)
            ]
        );
    }

    #[test]
    fn eat_last_food_wins() {
        let mut game = started_game();
        game.stage(
            [
                Position::new(30, 10),
                Position::new(28, 10),
                Position::new(26, 10),
            ],
            Direction::East,
            [Position::new(32, 10)],
        );
        assert_eq!(game.tick(), Outcome::Win);
        assert_eq!(game.score(), consts::SCORE_WEIGHT);
        assert_eq!(game.snake.len(), 4);
        assert!(game.food.is_empty());
        assert_eq!(game.phase(), Phase::LevelWon);
        assert_eq!(
            segments(&game),
            [
                Position::new(32, 10),
                Position::new(30, 10),
                Position::new(28, 10),
                Position::new(26, 10),
            ]
        );
    }

    #[test]
    fn eat_food_keeps_running() {
        let mut game = started_game();
        game.stage(
            [Position::new(30, 10), Position::new(28, 10)],
            Direction::East,
            [Position::new(32, 10), Position::new(40, 10)],
        );
        assert_eq!(game.tick(), Outcome::InProgress);
        assert_eq!(game.score(), consts::SCORE_WEIGHT);
        assert_eq!(game.snake.len(), 3);
        assert_eq!(game.food.len(), 1);
        assert_eq!(game.phase(), Phase::Running);
    }

    #[test]
    fn coil_into_self_loses() {
        let mut game = started_game();
        game.stage(
            [
                Position::new(30, 10),
                Position::new(28, 10),
                Position::new(26, 10),
                Position::new(24, 10),
                Position::new(22, 10),
            ],
            Direction::East,
            [Position::new(10, 4)],
        );
        game.turn(Direction::North);
        assert_eq!(game.tick(), Outcome::InProgress);
        game.turn(Direction::West);
        assert_eq!(game.tick(), Outcome::InProgress);
        game.turn(Direction::South);
        assert_eq!(game.tick(), Outcome::Lose);
        assert_eq!(game.phase(), Phase::GameLost);
        assert_eq!(game.head(), Position::new(28, 10));
        // The game is over, so nothing moves anymore
        assert_eq!(game.tick(), Outcome::InProgress);
        assert_eq!(game.head(), Position::new(28, 10));
    }

    #[test]
    fn reversal_is_ignored() {
        let mut game = started_game();
        game.turn(Direction::West);
        assert_eq!(game.heading(), Some(Direction::East));
        game.tick();
        assert_eq!(game.head(), Position::new(32, 10));
    }

    #[test]
    fn turn_ignored_after_loss() {
        let mut game = started_game();
        game.phase = Phase::GameLost;
        game.turn(Direction::North);
        assert_eq!(game.heading(), Some(Direction::East));
    }

    #[test]
    fn win_before_max_level_restarts() {
        let mut game = started_game();
        game.phase = Phase::LevelWon;
        game.advance_level();
        assert_eq!(game.phase(), Phase::LevelStart);
        game.start_level();
        assert_eq!(game.level(), 2);
        assert_eq!(game.speed(), Duration::from_millis(210));
        assert_eq!(game.food.len(), consts::FOOD_PER_LEVEL);
    }

    #[test]
    fn win_at_max_level_completes() {
        let mut game = new_game(GameSettings {
            max_level: 2,
            ..GameSettings::default()
        });
        game.start_level();
        game.phase = Phase::LevelWon;
        game.advance_level();
        game.start_level();
        assert_eq!(game.level(), 2);
        game.stage(
            [Position::new(30, 10), Position::new(28, 10)],
            Direction::East,
            [Position::new(32, 10)],
        );
        assert_eq!(game.tick(), Outcome::Win);
        game.advance_level();
        assert_eq!(game.phase(), Phase::GameComplete);
        game.start_level();
        assert_eq!(game.level(), 2);
        assert_eq!(game.phase(), Phase::GameComplete);
    }

    #[test]
    fn advance_level_only_after_win() {
        let mut game = started_game();
        game.advance_level();
        assert_eq!(game.phase(), Phase::Running);
    }

    #[test]
    fn draw_running() {
        let mut game = started_game();
        game.stage(
            [
                Position::new(30, 10),
                Position::new(28, 10),
                Position::new(26, 10),
            ],
            Direction::East,
            [Position::new(10, 4), Position::new(50, 15)],
        );
        game.score = 120;
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "  Level: 1                                       Score: 120                     ",
            " ┌──────────────────────────────────────────────────────────┐                   ",
            " │                                                          │                   ",
            " │                                                          │                   ",
            " │        ♥                                                 │                   ",
            " │                                                          │                   ",
            " │                                                          │                   ",
            " │                                                          │                   ",
            " │                                                          │                   ",
            " │                                                          │                   ",
            " │                        * * @                             │                   ",
            " │                                                          │                   ",
            " │                                                          │                   ",
            " │                                                          │                   ",
            " │                                                          │                   ",
            " │                                                ♥         │                   ",
            " │                                                          │                   ",
            " │                                                          │                   ",
            " │                                                          │                   ",
            " │                                                          │                   ",
            " │                                                          │                   ",
            " └──────────────────────────────────────────────────────────┘                   ",
            "  Press ESC to exit the game                                                    ",
            "                                                                                ",
        ]);
        expected.set_style(Rect::new(10, 4, 1, 1), consts::FOOD_STYLE);
        expected.set_style(Rect::new(50, 15, 1, 1), consts::FOOD_STYLE);
        expected.set_style(Rect::new(26, 10, 1, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(28, 10, 1, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(30, 10, 1, 1), consts::SNAKE_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn draw_game_over() {
        let mut game = started_game();
        game.stage(
            [Position::new(30, 10), Position::new(28, 10)],
            Direction::East,
            [Position::new(10, 4)],
        );
        game.phase = Phase::GameLost;
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let row = (0..80)
            .map(|x| buffer[(x, 10)].symbol())
            .collect::<String>();
        assert_eq!(
            row,
            " │                        Game Over!                        │                   "
        );
    }

    #[test]
    fn draw_game_won() {
        let mut game = started_game();
        game.stage(
            [Position::new(30, 10), Position::new(28, 10)],
            Direction::East,
            [Position::new(10, 4)],
        );
        game.phase = Phase::GameComplete;
        let area = Rect::new(0, 0, 100, 30);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let row = (10..90)
            .map(|x| buffer[(x, 13)].symbol())
            .collect::<String>();
        assert_eq!(
            row,
            " │                    You Won the Game!                     │                   "
        );
    }
}
