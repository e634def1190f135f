//! Adjacency relations used to count a cell's neighbours.
//!
//! Only four offsets are checked. This is not a Moore neighbourhood: the
//! cells below (negative y) and the diagonals other than (+1, +1) never count.
//! The labels are historical and do not match compass directions; the
//! offsets are what matter.

use std::collections::HashMap;

use super::Position;

/// One adjacency check, expressed as the offset `other - self`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Relation {
    /// (0, +1)
    North,
    /// (+1, +1)
    NorthEast,
    /// (-1, 0)
    West,
    /// (+1, 0)
    East,
}

impl Relation {
    /// All relations in the order they are checked
    pub const ALL: [Relation; 4] = [
        Relation::North,
        Relation::NorthEast,
        Relation::West,
        Relation::East,
    ];

    pub const fn offset(self) -> (i64, i64) {
        match self {
            Relation::North => (0, 1),
            Relation::NorthEast => (1, 1),
            Relation::West => (-1, 0),
            Relation::East => (1, 0),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Relation::North => "north",
            Relation::NorthEast => "north east",
            Relation::West => "west",
            Relation::East => "east",
        }
    }

    /// Does `to` sit at this relation's offset from `from`?
    pub const fn holds(self, from: Position, to: Position) -> bool {
        let (dx, dy) = self.offset();
        match from.checked_offset(dx, dy) {
            Some(target) => target.x == to.x && target.y == to.y,
            None => false,
        }
    }
}

/// Every relation `to` satisfies with respect to `from`, in check order.
/// Nothing is deduplicated.
pub fn relations_between(from: Position, to: Position) -> impl Iterator<Item = Relation> {
    Relation::ALL
        .into_iter()
        .filter(move |relation| relation.holds(from, to))
}

/// Occupancy of a frozen population, keyed by coordinate.
///
/// Several cells may share a coordinate, so each entry is a multiplicity.
/// Counting through the census gives the same answer as scanning the
/// population against every relation, without the quadratic scan.
#[derive(Debug, Default)]
pub struct Census {
    occupancy: HashMap<Position, usize>,
}

impl Census {
    pub fn new(positions: impl IntoIterator<Item = Position>) -> Self {
        let mut occupancy = HashMap::new();
        for position in positions {
            *occupancy.entry(position).or_insert(0) += 1;
        }
        Self { occupancy }
    }

    /// Number of cells at exactly `position`
    pub fn at(&self, position: Position) -> usize {
        self.occupancy.get(&position).copied().unwrap_or(0)
    }

    /// Neighbour count of `position`.
    /// A population member is counted once per relation it satisfies.
    pub fn count(&self, position: Position) -> usize {
        Relation::ALL
            .iter()
            .map(|relation| {
                let (dx, dy) = relation.offset();
                position
                    .checked_offset(dx, dy)
                    .map_or(0, |target| self.at(target))
            })
            .sum()
    }
}
