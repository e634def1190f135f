use std::time::Instant;

use anyhow::{Context, ensure};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sparse_life::domain::{Relation, Underpopulation};
use sparse_life::{Pattern, Position, Simulation, presets};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sparse_life", about = "Sparse Game of Life with an under-population rule")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List preset patterns and the neighbour offsets
    Patterns,
    /// Seed a world and advance it generation by generation
    Run {
        /// Preset name; a random soup is used when omitted
        #[arg(short, long)]
        pattern: Option<String>,
        /// Maximum number of ticks to simulate
        #[arg(short, long, default_value = "10")]
        ticks: u64,
        /// RNG seed for the random soup
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Probability that a soup coordinate starts alive
        #[arg(short, long, default_value = "0.3")]
        density: f64,
        /// Soup width
        #[arg(long, default_value = "32")]
        width: u32,
        /// Soup height
        #[arg(long, default_value = "32")]
        height: u32,
        /// Cells with fewer neighbours than this die
        #[arg(short, long, default_value = "2")]
        min_neighbours: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Patterns => {
            for pattern in presets::all_patterns() {
                let (w, h) = pattern.dimensions();
                println!("{:<12} {:>2}x{:<2} {}", pattern.name, w, h, pattern.description);
            }
            println!();
            for relation in Relation::ALL {
                let (dx, dy) = relation.offset();
                println!("{:<12} ({dx:+}, {dy:+})", relation.label());
            }
        }
        Commands::Run {
            pattern,
            ticks,
            seed,
            density,
            width,
            height,
            min_neighbours,
        } => {
            let pattern = match pattern {
                Some(name) => presets::find(&name)
                    .with_context(|| format!("unknown pattern '{name}', see `patterns`"))?,
                None => {
                    ensure!(
                        (0.0..=1.0).contains(&density),
                        "density must be within [0, 1], got {density}"
                    );
                    Pattern::random(&mut StdRng::seed_from_u64(seed), width, height, density)
                }
            };

            let mut sim =
                Simulation::new().with_rule(Box::new(Underpopulation::new(min_neighbours)));
            sim.seed(&pattern, Position::ORIGIN);

            println!("{:>10} {:>10} {:>10}", "Generation", "Alive", "Died");
            println!("{:-<32}", "");
            println!("{:>10} {:>10} {:>10}", 0, sim.world().len(), "-");

            let start = Instant::now();
            for report in sim.run(ticks) {
                println!(
                    "{:>10} {:>10} {:>10}",
                    report.generation, report.survivors, report.died
                );
            }
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
            tracing::info!(
                generation = sim.world().generation(),
                alive = sim.world().len(),
                elapsed_ms,
                "run finished"
            );
        }
    }

    Ok(())
}
