/// Trait for survival rules.
/// A rule only decides whether a live cell stays alive; nothing is ever born.
/// It is consulted after every count is taken, so it may touch the world.
pub trait SurvivalRule {
    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Short description
    fn description(&self) -> &'static str;

    /// Does a live cell with this many neighbours survive the tick?
    fn survives(&self, neighbours: usize) -> bool;
}

/// Under-population: a cell with fewer than `min_neighbours` neighbours dies.
/// There is no upper limit, so crowded cells always survive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Underpopulation {
    pub min_neighbours: usize,
}

impl Underpopulation {
    pub const fn new(min_neighbours: usize) -> Self {
        Self { min_neighbours }
    }
}

impl Default for Underpopulation {
    fn default() -> Self {
        Self::new(2)
    }
}

impl SurvivalRule for Underpopulation {
    fn name(&self) -> &'static str {
        "Underpopulation"
    }

    fn description(&self) -> &'static str {
        "Dies with too few neighbours, never born"
    }

    fn survives(&self, neighbours: usize) -> bool {
        neighbours >= self.min_neighbours
    }
}

/// Get default rule (fewer than two neighbours dies)
pub fn default_rule() -> Box<dyn SurvivalRule> {
    Box::new(Underpopulation::default())
}
