// Domain layer - cells, world, neighbour geometry and survival rules
pub mod domain;

// Application layer - running a world over many generations
pub mod application;

// Re-exports for convenience
pub use domain::{Cell, CellId, Pattern, Position, TickReport, World, WorldRef, presets};
pub use application::Simulation;
