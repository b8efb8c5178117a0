use super::board::Position;
use super::direction::Direction;
use std::collections::{HashSet, VecDeque};

/// Snake state.  Snate.
///
/// The head is stored apart from the body so that a snake can never be
/// empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    head: Position,

    /// The positions of the cells in the snake's body, starting with the one
    /// right behind the head
    body: VecDeque<Position>,

    /// The direction in which the snake will move on the next tick; `None`
    /// if it is sitting still
    heading: Option<Direction>,

    /// The cell given up by the tail on the most recent call to `advance()`
    vacated: Option<Position>,
}

impl Snake {
    /// Create a snake `length` cells long (at least one) with its head at
    /// `head`, facing in `heading`, and its body trailing straight out
    /// behind it
    pub(super) fn new(head: Position, heading: Direction, length: usize) -> Snake {
        let behind = heading.reverse();
        let body = std::iter::successors(Some(head), |&p| Some(behind.advance(p)))
            .skip(1)
            .take(length.saturating_sub(1))
            .collect();
        Snake {
            head,
            body,
            heading: Some(heading),
            vacated: None,
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.head
    }

    /// Return the positions of the cells in the snake's body, not counting
    /// the head
    pub(super) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Iterate over every segment of the snake from head to tail
    pub(super) fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub(super) fn len(&self) -> usize {
        self.body.len() + 1
    }

    pub(super) fn heading(&self) -> Option<Direction> {
        self.heading
    }

    /// Change the snake's heading to `direction` unless that would make it
    /// turn straight back on itself.  Returns `true` if the heading was
    /// accepted.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if self.heading.is_some_and(|h| h.reverse() == direction) {
            false
        } else {
            self.heading = Some(direction);
            true
        }
    }

    /// Move the head one cell in the current heading and drag each body
    /// segment into the cell in front of it.  Does nothing if the snake has
    /// no heading.
    pub(super) fn advance(&mut self) {
        let Some(direction) = self.heading else {
            return;
        };
        self.body.push_front(self.head);
        self.head = direction.advance(self.head);
        self.vacated = self.body.pop_back();
    }

    /// Lengthen the snake by one segment, placed in the cell that the tail
    /// most recently left
    pub(super) fn grow(&mut self) {
        let tail = self
            .vacated
            .take()
            .or_else(|| self.body.back().copied())
            .unwrap_or(self.head);
        self.body.push_back(tail);
    }

    /// Returns `true` if any two segments of the snake occupy the same cell
    pub(super) fn is_self_intersecting(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.len());
        !self.segments().all(|p| seen.insert(p))
    }

    #[cfg(test)]
    pub(super) fn from_segments<I: IntoIterator<Item = Position>>(
        segments: I,
        heading: Option<Direction>,
    ) -> Snake {
        let mut body = segments.into_iter().collect::<VecDeque<_>>();
        let head = body
            .pop_front()
            .expect("a snake should have at least one segment");
        Snake {
            head,
            body,
            heading,
            vacated: None,
        }
    }
}
