//! Tick throughput on random soups of increasing size

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use sparse_life::{Pattern, Position, World};

const DENSITY: f64 = 0.5;

/// One independent trial: build a soup, time a single tick.
/// Each trial owns its world, so trials can run on separate threads while
/// every tick stays single-threaded.
fn benchmark_tick(size: u32, seed: u64) -> (usize, f64) {
    let soup = Pattern::random(&mut StdRng::seed_from_u64(seed), size, size, DENSITY);
    let world = World::new();
    soup.place_on(&world, Position::ORIGIN);
    let population = world.len();

    let start = Instant::now();
    world.tick();
    (population, start.elapsed().as_secs_f64() * 1000.0)
}

fn main() {
    println!("=== Sparse Life Tick Benchmark ===\n");

    let sizes = [16, 64, 128, 256, 512, 1024];
    let trials = 8u64;

    println!(
        "{:>10} {:>12} {:>12} {:>14}",
        "Size", "Cells", "ms/tick", "Mcells/sec"
    );
    println!("{:-<52}", "");

    for size in sizes {
        let results: Vec<(usize, f64)> = (0..trials)
            .into_par_iter()
            .map(|seed| benchmark_tick(size, seed))
            .collect();

        let cells = results.iter().map(|(n, _)| *n).sum::<usize>() as f64 / trials as f64;
        let ms = results.iter().map(|(_, ms)| *ms).sum::<f64>() / trials as f64;

        println!(
            "{:>10} {:>12.0} {:>12.3} {:>14.2}",
            format!("{}x{}", size, size),
            cells,
            ms,
            cells / (ms / 1000.0) / 1_000_000.0
        );
    }
}
