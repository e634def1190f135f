use rand::Rng;

use super::{Cell, Position, World};

/// Represents a pattern that can be placed in a world
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub cells: Vec<Position>, // Relative coordinates of live cells
}

impl Pattern {
    /// Create a new pattern from live cell coordinates
    pub fn new(name: &'static str, description: &'static str, cells: &[(i64, i64)]) -> Self {
        Self {
            name,
            description,
            cells: cells.iter().copied().map(Position::from).collect(),
        }
    }

    /// Random soup filling a width x height box anchored at the origin.
    /// Each coordinate is live with probability `density`.
    pub fn random(rng: &mut impl Rng, width: u32, height: u32, density: f64) -> Self {
        let density = density.clamp(0.0, 1.0);
        let cells = (0..i64::from(height))
            .flat_map(|y| (0..i64::from(width)).map(move |x| Position::new(x, y)))
            .filter(|_| rng.random_bool(density))
            .collect();
        Self {
            name: "Soup",
            description: "Random fill",
            cells,
        }
    }

    /// Bounding box size as (width, height); (0, 0) for an empty pattern
    pub fn dimensions(&self) -> (i64, i64) {
        let span = |coord: fn(&Position) -> i64| {
            let min = self.cells.iter().map(coord).min();
            let max = self.cells.iter().map(coord).max();
            match (min, max) {
                (Some(min), Some(max)) => max.saturating_sub(min).saturating_add(1),
                _ => 0,
            }
        };
        (span(|p| p.x), span(|p| p.y))
    }

    /// Spawn the pattern into `world` with its origin at `origin`.
    /// Cells that would land past the edge of the i64 grid are skipped.
    pub fn place_on(&self, world: &World, origin: Position) -> Vec<Cell> {
        self.cells
            .iter()
            .filter_map(|p| {
                let target = origin.checked_offset(p.x, p.y);
                if target.is_none() {
                    tracing::debug!(pattern = self.name, dx = p.x, dy = p.y, "cell off the grid");
                }
                target
            })
            .map(|position| world.spawn(position))
            .collect()
    }
}

/// Classic Game of Life patterns library.
/// Under a death-only rule they erode rather than oscillate or travel.
pub mod presets {
    use super::*;

    /// Glider - simplest spaceship
    pub fn glider() -> Pattern {
        Pattern::new(
            "Glider",
            "Spaceship seed",
            &[
                (1, 0),
                (2, 1),
                (0, 2), (1, 2), (2, 2),
            ],
        )
    }

    /// Blinker - three in a row
    pub fn blinker() -> Pattern {
        Pattern::new(
            "Blinker",
            "Three in a row",
            &[(0, 1), (1, 1), (2, 1)],
        )
    }

    pub fn toad() -> Pattern {
        Pattern::new(
            "Toad",
            "Two offset rows of three",
            &[
                (1, 0), (2, 0), (3, 0),
                (0, 1), (1, 1), (2, 1),
            ],
        )
    }

    pub fn beacon() -> Pattern {
        Pattern::new(
            "Beacon",
            "Two diagonal blocks",
            &[
                (0, 0), (1, 0),
                (0, 1),
                (3, 2),
                (2, 3), (3, 3),
            ],
        )
    }

    /// Block - 2x2 square
    pub fn block() -> Pattern {
        Pattern::new(
            "Block",
            "2x2 square",
            &[
                (0, 0), (1, 0),
                (0, 1), (1, 1),
            ],
        )
    }

    pub fn r_pentomino() -> Pattern {
        Pattern::new(
            "R-pentomino",
            "Five-cell methuselah",
            &[
                (1, 0), (2, 0),
                (0, 1), (1, 1),
                (1, 2),
            ],
        )
    }

    pub fn acorn() -> Pattern {
        Pattern::new(
            "Acorn",
            "Seven-cell methuselah",
            &[
                (1, 0),
                (3, 1),
                (0, 2), (1, 2), (4, 2), (5, 2), (6, 2),
            ],
        )
    }

    /// Get all available patterns
    pub fn all_patterns() -> Vec<Pattern> {
        vec![
            glider(),
            blinker(),
            toad(),
            beacon(),
            block(),
            r_pentomino(),
            acorn(),
        ]
    }

    /// Look a preset up by name, ignoring case
    pub fn find(name: &str) -> Option<Pattern> {
        all_patterns()
            .into_iter()
            .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_place_on_offsets_cells() {
        let world = World::new();
        let cells = presets::blinker().place_on(&world, Position::new(10, -4));
        let positions: Vec<_> = cells.iter().map(Cell::position).collect();
        assert_eq!(
            positions,
            vec![Position::new(10, -3), Position::new(11, -3), Position::new(12, -3)]
        );
        assert!(cells.iter().all(Cell::is_alive));
    }

    #[test]
    fn test_place_on_skips_cells_past_the_edge() {
        let world = World::new();
        let cells = presets::blinker().place_on(&world, Position::new(i64::MAX - 1, i64::MAX - 1));
        let positions: Vec<_> = cells.iter().map(Cell::position).collect();
        assert_eq!(
            positions,
            vec![Position::new(i64::MAX - 1, i64::MAX), Position::new(i64::MAX, i64::MAX)]
        );
        assert_eq!(world.len(), 2);

        let corner = presets::blinker().place_on(&world, Position::new(i64::MAX, i64::MAX));
        assert!(corner.is_empty());
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_block_survives_one_tick_partially() {
        // (0,0) sees three and (1,0) two; the top row sees one each
        let world = World::new();
        let cells = presets::block().place_on(&world, Position::ORIGIN);
        world.tick();
        let alive: Vec<bool> = cells.iter().map(Cell::is_alive).collect();
        assert_eq!(alive, vec![true, true, false, false]);
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(presets::acorn().dimensions(), (7, 3));
        assert_eq!(Pattern::new("Empty", "", &[]).dimensions(), (0, 0));
        let wide = Pattern::new("Wide", "", &[(i64::MIN, 0), (i64::MAX, 0)]);
        assert_eq!(wide.dimensions(), (i64::MAX, 1));
    }

    #[test]
    fn test_find_ignores_case() {
        assert_eq!(presets::find("gLiDeR").map(|p| p.name), Some("Glider"));
        assert!(presets::find("gosper").is_none());
    }

    #[test]
    fn test_names_are_unique() {
        let names: Vec<_> = presets::all_patterns().iter().map(|p| p.name).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = Pattern::random(&mut StdRng::seed_from_u64(7), 20, 20, 0.3);
        let b = Pattern::random(&mut StdRng::seed_from_u64(7), 20, 20, 0.3);
        assert_eq!(a.cells, b.cells);
    }

    #[test]
    fn test_random_density_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Pattern::random(&mut rng, 8, 8, 0.0).cells.is_empty());
        assert_eq!(Pattern::random(&mut rng, 8, 8, 1.0).cells.len(), 64);
    }
}
