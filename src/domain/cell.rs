use std::sync::atomic::{AtomicU64, Ordering};

use super::neighbourhood::relations_between;
use super::world::Member;
use super::{Position, World, WorldRef};

static NEXT_CELL_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a cell. Ids are unique for the life of the process and never
/// reused, so a dead cell cannot come back under its old identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct CellId(u64);

impl CellId {
    pub(crate) fn next() -> Self {
        Self(NEXT_CELL_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Cell is a handle to one live unit of population.
///
/// Whether the cell is alive is never stored: it is alive exactly while its
/// world's population contains its id. Clones share the identity, and
/// equality compares identity, not coordinates.
#[derive(Clone, Debug)]
pub struct Cell {
    id: CellId,
    position: Position,
    world: WorldRef,
}

impl Cell {
    /// Create a live cell at the origin of `world`
    pub fn new(world: &World) -> Self {
        Self::at(world, 0, 0)
    }

    /// Create a live cell at (x, y). Sharing a coordinate is allowed.
    pub fn at(world: &World, x: i64, y: i64) -> Self {
        world.spawn(Position::new(x, y))
    }

    pub(crate) fn from_member(member: Member, world: WorldRef) -> Self {
        Self {
            id: member.id,
            position: member.position,
            world,
        }
    }

    pub const fn id(&self) -> CellId {
        self.id
    }

    pub const fn x(&self) -> i64 {
        self.position.x
    }

    pub const fn y(&self) -> i64 {
        self.position.y
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    /// The world this cell was created in
    pub fn world(&self) -> WorldRef {
        self.world.clone()
    }

    /// Create a new live cell in the same world at absolute (x, y)
    pub fn spawn_at(&self, x: i64, y: i64) -> Cell {
        self.world.register(Position::new(x, y))
    }

    /// Remove this cell from its world. Dying twice is harmless.
    pub fn die(&self) {
        let removed = self
            .world
            .with_population_mut(|population| population.remove(self.id))
            .unwrap_or(false);
        if removed {
            tracing::trace!(id = self.id.get(), x = self.x(), y = self.y(), "cell removed");
        }
    }

    pub fn is_alive(&self) -> bool {
        self.world
            .with_population(|population| population.contains(self.id))
            .unwrap_or(false)
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    /// Live cells standing in one of the four neighbour relations to this one.
    ///
    /// Computed fresh from the current population on every call, in
    /// population order. A cell is listed once per relation it satisfies.
    /// Works for dead cells too: the answer depends only on the coordinate.
    pub fn neighbours(&self) -> Vec<Cell> {
        self.world
            .with_population(|population| {
                population
                    .members()
                    .flat_map(|member| {
                        relations_between(self.position, member.position).map(move |_| member)
                    })
                    .map(|member| Cell::from_member(member, self.world.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn neighbour_count(&self) -> usize {
        self.neighbours().len()
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Cell {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_alive_at_origin() {
        let world = World::new();
        let cell = Cell::new(&world);
        assert!(cell.is_alive());
        assert!(!cell.is_dead());
        assert_eq!((cell.x(), cell.y()), (0, 0));
        assert!(world.contains(&cell));
    }

    #[test]
    fn test_spawn_at() {
        let world = World::new();
        let cell = Cell::new(&world);
        let spawned = cell.spawn_at(3, 5);
        assert_eq!(spawned.x(), 3);
        assert_eq!(spawned.y(), 5);
        assert_eq!(spawned.world(), cell.world());
        assert!(spawned.is_alive());
        assert_eq!(cell.position(), Position::ORIGIN);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_die() {
        let world = World::new();
        let cell = Cell::new(&world);
        cell.die();
        assert!(cell.is_dead());
        assert!(!cell.is_alive());
        assert!(!world.cells().contains(&cell));
    }

    #[test]
    fn test_die_twice() {
        let world = World::new();
        let cell = Cell::new(&world);
        cell.die();
        cell.die();
        assert!(cell.is_dead());
        assert!(world.is_empty());
    }

    #[test]
    fn test_die_removes_by_identity() {
        let world = World::new();
        let first = Cell::at(&world, 2, 2);
        let twin = Cell::at(&world, 2, 2);
        assert_ne!(first, twin);
        first.die();
        assert!(first.is_dead());
        assert!(twin.is_alive());
    }

    #[test]
    fn test_clone_shares_identity() {
        let world = World::new();
        let cell = Cell::new(&world);
        let alias = cell.clone();
        alias.die();
        assert!(cell.is_dead());
        assert_eq!(alias, cell);
    }

    #[test]
    fn test_detects_neighbour_to_the_north() {
        let world = World::new();
        let cell = Cell::new(&world);
        cell.spawn_at(0, 1);
        assert_eq!(cell.neighbours().len(), 1);
    }

    #[test]
    fn test_detects_neighbour_to_the_north_east() {
        let world = World::new();
        let cell = Cell::new(&world);
        cell.spawn_at(1, 1);
        assert_eq!(cell.neighbours().len(), 1);
    }

    #[test]
    fn test_detects_neighbour_to_the_left() {
        let world = World::new();
        let cell = Cell::new(&world);
        cell.spawn_at(-1, 0);
        assert_eq!(cell.neighbours().len(), 1);
    }

    #[test]
    fn test_detects_neighbour_to_the_right() {
        let world = World::new();
        let cell = Cell::new(&world);
        cell.spawn_at(1, 0);
        assert_eq!(cell.neighbours().len(), 1);
    }

    #[test]
    fn test_far_cell_is_not_a_neighbour() {
        let world = World::new();
        let cell = Cell::new(&world);
        cell.spawn_at(5, 5);
        assert!(cell.neighbours().is_empty());
    }

    #[test]
    fn test_neighbours_in_population_order() {
        let world = World::new();
        let cell = Cell::new(&world);
        let east = cell.spawn_at(1, 0);
        cell.spawn_at(9, 9);
        let north = cell.spawn_at(0, 1);
        let west = cell.spawn_at(-1, 0);
        assert_eq!(cell.neighbours(), vec![east, north, west]);
        assert_eq!(cell.neighbour_count(), 3);
    }

    #[test]
    fn test_stacked_neighbours_each_count() {
        let world = World::new();
        let cell = Cell::new(&world);
        cell.spawn_at(1, 0);
        cell.spawn_at(1, 0);
        assert_eq!(cell.neighbours().len(), 2);
    }

    #[test]
    fn test_dead_cell_still_answers_neighbours() {
        let world = World::new();
        let cell = Cell::new(&world);
        let north = cell.spawn_at(0, 1);
        cell.die();
        assert_eq!(cell.neighbours(), vec![north]);
    }

    #[test]
    fn test_cell_outlives_world() {
        let world = World::new();
        let cell = Cell::new(&world);
        cell.spawn_at(1, 0);
        drop(world);
        assert!(cell.is_dead());
        assert!(cell.neighbours().is_empty());
        cell.die();
        let orphan = cell.spawn_at(0, 1);
        assert!(orphan.is_dead());
        assert_eq!(orphan.world(), cell.world());
    }
}
