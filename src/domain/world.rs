use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use super::neighbourhood::Census;
use super::rules::{SurvivalRule, Underpopulation};
use super::{Cell, CellId, Position};

/// A registered live cell: identity plus where it sits.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Member {
    pub(crate) id: CellId,
    pub(crate) position: Position,
}

/// The live-cell population shared between a world and its cell handles.
///
/// Keyed by identity. Ids only grow and a world never leaves its thread, so
/// id order is insertion order and iteration stays deterministic.
#[derive(Debug, Default)]
pub(crate) struct Population {
    members: BTreeMap<CellId, Position>,
    generation: u64,
}

impl Population {
    /// Live members in insertion order
    pub(crate) fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.members
            .iter()
            .map(|(&id, &position)| Member { id, position })
    }

    pub(crate) fn len(&self) -> usize {
        self.members.len()
    }

    pub(crate) fn insert(&mut self, member: Member) {
        self.members.insert(member.id, member.position);
    }

    pub(crate) fn contains(&self, id: CellId) -> bool {
        self.members.contains_key(&id)
    }

    /// Remove by identity. Other cells on the same coordinate are untouched.
    pub(crate) fn remove(&mut self, id: CellId) -> bool {
        self.members.remove(&id).is_some()
    }
}

/// Outcome of one generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Generation number reached by this tick (first tick is 1)
    pub generation: u64,
    /// Cells alive when the tick started
    pub evaluated: usize,
    pub died: usize,
    pub survivors: usize,
}

impl TickReport {
    /// Nothing died, so every further tick is a no-op as well.
    pub const fn is_stable(&self) -> bool {
        self.died == 0
    }
}

/// World owns the set of live cells on an unbounded grid.
///
/// Cells hold only a [`WorldRef`] back to it, so dropping the world ends the
/// population; surviving cell handles then report themselves dead.
#[derive(Debug, Default)]
pub struct World {
    population: Rc<RefCell<Population>>,
}

impl World {
    /// Create an empty world at generation 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-owning handle to this world
    pub fn handle(&self) -> WorldRef {
        WorldRef(Rc::downgrade(&self.population))
    }

    /// Snapshot of the live cells in insertion order
    pub fn cells(&self) -> Vec<Cell> {
        self.handle().cells()
    }

    pub fn len(&self) -> usize {
        self.population.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of ticks applied so far
    pub fn generation(&self) -> u64 {
        self.population.borrow().generation
    }

    /// Is this exact cell (by identity) alive here?
    pub fn contains(&self, cell: &Cell) -> bool {
        self.population.borrow().contains(cell.id())
    }

    /// Register a new live cell at `position`
    pub fn spawn(&self, position: Position) -> Cell {
        self.handle().register(position)
    }

    /// Advance one generation under the default under-population rule
    pub fn tick(&self) -> TickReport {
        self.tick_with(&Underpopulation::default())
    }

    /// Advance one generation under `rule`.
    ///
    /// Every count is taken against the population as it stood before the
    /// tick; deaths are applied together once all decisions are made.
    pub fn tick_with(&self, rule: &dyn SurvivalRule) -> TickReport {
        let generation = self.generation() + 1;
        let _span = tracing::debug_span!("tick", generation, rule = rule.name()).entered();

        let counts: Vec<(Member, usize)> = {
            let population = self.population.borrow();
            let census = Census::new(population.members().map(|member| member.position));
            population
                .members()
                .map(|member| (member, census.count(member.position)))
                .collect()
        };

        // The population is not borrowed while the rule runs
        let doomed: Vec<CellId> = counts
            .iter()
            .filter(|&&(_, neighbours)| !rule.survives(neighbours))
            .inspect(|(member, neighbours)| {
                tracing::debug!(
                    id = member.id.get(),
                    x = member.position.x,
                    y = member.position.y,
                    neighbours,
                    "cell dies"
                );
            })
            .map(|(member, _)| member.id)
            .collect();

        let mut population = self.population.borrow_mut();
        let died = doomed.iter().filter(|&&id| population.remove(id)).count();
        population.generation = generation;

        let report = TickReport {
            generation,
            evaluated: counts.len(),
            died,
            survivors: population.len(),
        };
        tracing::trace!(
            evaluated = report.evaluated,
            died = report.died,
            survivors = report.survivors,
            "tick complete"
        );
        report
    }
}

/// Non-owning reference from a cell back to its world.
///
/// Two refs are equal when they point at the same world. Once the world is
/// dropped every query answers as for an empty world.
#[derive(Clone, Debug)]
pub struct WorldRef(Weak<RefCell<Population>>);

impl WorldRef {
    /// Is the referenced world still around?
    pub fn exists(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Snapshot of the live cells, empty once the world is gone
    pub fn cells(&self) -> Vec<Cell> {
        self.with_population(|population| {
            population
                .members()
                .map(|member| Cell::from_member(member, self.clone()))
                .collect()
        })
        .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.with_population(|population| population.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Does this ref point at `world`?
    pub fn is(&self, world: &World) -> bool {
        std::ptr::eq(self.0.as_ptr(), Rc::as_ptr(&world.population))
    }

    /// Give `position` a fresh identity and add it to the population.
    /// With the world gone the cell is created already dead.
    pub(crate) fn register(&self, position: Position) -> Cell {
        let member = Member {
            id: CellId::next(),
            position,
        };
        if let Some(shared) = self.0.upgrade() {
            shared.borrow_mut().insert(member);
        }
        Cell::from_member(member, self.clone())
    }

    pub(crate) fn with_population<R>(&self, f: impl FnOnce(&Population) -> R) -> Option<R> {
        let shared = self.0.upgrade()?;
        let population = shared.borrow();
        Some(f(&population))
    }

    pub(crate) fn with_population_mut<R>(
        &self,
        f: impl FnOnce(&mut Population) -> R,
    ) -> Option<R> {
        let shared = self.0.upgrade()?;
        let mut population = shared.borrow_mut();
        Some(f(&mut population))
    }
}

impl PartialEq for WorldRef {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for WorldRef {}

impl PartialEq<World> for WorldRef {
    fn eq(&self, other: &World) -> bool {
        self.is(other)
    }
}
