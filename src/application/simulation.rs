use std::time::Duration;

use crate::domain::{Cell, Pattern, Position, SurvivalRule, TickReport, World, default_rule};

/// Simulation orchestrates a world run.
/// This is the application layer that coordinates domain logic.
pub struct Simulation {
    world: World,
    rule: Box<dyn SurvivalRule>,
    history: Vec<TickReport>,
    last_step_time: Duration,
}

impl Simulation {
    /// Create a simulation over an empty world with the default rule
    pub fn new() -> Self {
        Self {
            world: World::new(),
            rule: default_rule(),
            history: Vec::new(),
            last_step_time: Duration::ZERO,
        }
    }

    /// Replace the survival rule (builder pattern)
    pub fn with_rule(mut self, rule: Box<dyn SurvivalRule>) -> Self {
        self.rule = rule;
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn rule(&self) -> &dyn SurvivalRule {
        self.rule.as_ref()
    }

    /// Reports of every tick taken so far, oldest first
    pub fn history(&self) -> &[TickReport] {
        &self.history
    }

    /// Wall time spent in the most recent tick
    pub fn last_step_time(&self) -> Duration {
        self.last_step_time
    }

    /// Place a pattern with its origin at `origin`
    pub fn seed(&self, pattern: &Pattern, origin: Position) -> Vec<Cell> {
        tracing::info!(
            pattern = pattern.name,
            cells = pattern.cells.len(),
            x = origin.x,
            y = origin.y,
            "seeding world"
        );
        pattern.place_on(&self.world, origin)
    }

    /// Advance one generation
    pub fn step(&mut self) -> TickReport {
        let start = std::time::Instant::now();
        let report = self.world.tick_with(self.rule.as_ref());
        self.last_step_time = start.elapsed();
        self.history.push(report);
        report
    }

    /// Tick up to `max_ticks` times, stopping early once the population is
    /// empty or a tick kills nothing (death-only rules cannot change after that).
    pub fn run(&mut self, max_ticks: u64) -> &[TickReport] {
        let first = self.history.len();
        for _ in 0..max_ticks {
            if self.world.is_empty() {
                tracing::info!(generation = self.world.generation(), "population extinct");
                break;
            }
            let report = self.step();
            if report.is_stable() {
                tracing::info!(generation = report.generation, "population stable");
                break;
            }
        }
        &self.history[first..]
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
