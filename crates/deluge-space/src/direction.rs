//! Compass directions on a 4-connected grid and a compact set of them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four grid-neighbour directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    /// Row - 1.
    Up = 0,
    /// Row + 1.
    Down = 1,
    /// Column - 1.
    Left = 2,
    /// Column + 1.
    Right = 3,
}

/// `(row_delta, col_delta)` per direction, indexed by discriminant.
const OFFSETS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl Direction {
    /// All directions in canonical scan order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the `(row_offset, col_offset)` for this direction.
    pub fn offset(self) -> (i8, i8) {
        OFFSETS[self as usize]
    }

    /// The direction pointing back.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Whether this direction moves along the row axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// A set of directions stored as a 4-bit mask.
///
/// Iteration always follows [`Direction::ALL`] order, independent of
/// insertion order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DirectionSet {
    bits: u8,
}

impl DirectionSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// All four directions.
    pub const fn all() -> Self {
        Self { bits: 0b1111 }
    }

    /// Insert a direction.
    pub fn insert(&mut self, dir: Direction) {
        self.bits |= dir.bit();
    }

    /// Remove a direction.
    pub fn remove(&mut self, dir: Direction) {
        self.bits &= !dir.bit();
    }

    /// Whether the set contains `dir`.
    pub fn contains(self, dir: Direction) -> bool {
        self.bits & dir.bit() != 0
    }

    /// Number of directions in the set.
    pub fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Whether the set is empty.
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Directions in `self` but not in `other`.
    pub fn difference(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// Whether every direction of `self` is also in `other`.
    pub fn is_subset(self, other: Self) -> bool {
        self.bits & !other.bits == 0
    }

    /// Iterate in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Self::empty();
        for d in iter {
            set.insert(d);
        }
        set
    }
}

impl fmt::Debug for DirectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_axis_convention() {
        assert_eq!(Direction::Up.offset(), (-1, 0));
        assert_eq!(Direction::Down.offset(), (1, 0));
        assert_eq!(Direction::Left.offset(), (0, -1));
        assert_eq!(Direction::Right.offset(), (0, 1));
    }

    #[test]
    fn opposite_negates_offset() {
        for d in Direction::ALL {
            let (dr, dc) = d.offset();
            assert_eq!(d.opposite().offset(), (-dr, -dc));
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn set_iterates_in_canonical_order() {
        let set: DirectionSet = [Direction::Right, Direction::Up, Direction::Right]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Direction::Up, Direction::Right]);
    }

    #[test]
    fn set_algebra() {
        let all = DirectionSet::all();
        let mut some = DirectionSet::empty();
        assert!(some.is_empty());
        some.insert(Direction::Left);
        some.insert(Direction::Down);
        assert!(some.is_subset(all));
        assert!(!all.is_subset(some));
        let rest = all.difference(some);
        assert_eq!(rest.iter().collect::<Vec<_>>(), vec![Direction::Up, Direction::Right]);
        some.remove(Direction::Left);
        assert!(!some.contains(Direction::Left));
        assert_eq!(format!("{some:?}"), "{Down}");
    }

    #[test]
    fn display_names_and_axes() {
        assert_eq!(Direction::Left.to_string(), "left");
        assert!(Direction::Up.is_vertical());
        assert!(!Direction::Right.is_vertical());
    }
}
