use super::board::{self, Position};
use super::snake::Snake;
use crate::consts;
use rand::Rng;
use std::collections::HashSet;

/// The food items waiting to be eaten on the current level
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct FoodSet(HashSet<Position>);

impl FoodSet {
    /// Scatter `count` food items over the board, avoiding `snake`.
    ///
    /// Candidate cells are drawn uniformly from the whole frame and discarded
    /// unless they can hold food and are free of the snake.  Repeats land on
    /// an existing item and are absorbed by the set.
    ///
    /// # Panics
    ///
    /// Panics if there are fewer than `count` free cells on the board.
    pub(super) fn spawn<R: Rng>(count: usize, rng: &mut R, snake: &Snake) -> FoodSet {
        let occupied = snake.segments().collect::<HashSet<_>>();
        let free = board::food_positions()
            .filter(|p| !occupied.contains(p))
            .count();
        assert!(
            count <= free,
            "cannot place {count} food items on a board with {free} free cells"
        );
        let mut food = HashSet::with_capacity(count);
        while food.len() < count {
            let pos = Position::new(
                rng.random_range(consts::LEFT_X..=consts::RIGHT_X),
                rng.random_range(consts::LEFT_Y..=consts::RIGHT_Y),
            );
            if board::holds_food(pos) && !occupied.contains(&pos) {
                food.insert(pos);
            }
        }
        FoodSet(food)
    }

    /// If there is a food item at `pos`, remove it and return `true`
    pub(super) fn consume(&mut self, pos: Position) -> bool {
        self.0.remove(&pos)
    }

    pub(super) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(super) fn len(&self) -> usize {
        self.0.len()
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Position> for FoodSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> FoodSet {
        FoodSet(iter.into_iter().collect())
    }
}
