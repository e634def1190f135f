mod position;
mod cell;
mod world;
mod rules;
mod patterns;
pub mod neighbourhood;

pub use position::Position;
pub use cell::{Cell, CellId};
pub use world::{World, WorldRef, TickReport};
pub use rules::{SurvivalRule, Underpopulation, default_rule};
pub use neighbourhood::{Relation, Census};
pub use patterns::{Pattern, presets};
