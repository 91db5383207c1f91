//! Route Solver - Command Line Interface
//!
//! Optimizes the visiting order of a set of places from a JSON problem file
//! carrying the place list and the precomputed travel matrices.

use clap::{Parser, Subcommand};
use route_solver::heuristics::GaConfig;
use route_solver::{optimize, Endpoints, Itinerary, Strategy, Tuning, Waypoint};
use serde::Deserialize;

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "route-solver")]
#[command(version = "0.3")]
#[command(about = "Optimize the visiting order of a set of places from precomputed travel matrices")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize a problem with one strategy
    Solve {
        /// JSON problem file with places, distances, and durations
        #[arg(short, long)]
        problem: PathBuf,

        /// Strategy to use: nn, 2opt, or genetic
        #[arg(short, long, default_value = "2opt")]
        algorithm: String,

        /// Index of a fixed first place
        #[arg(long)]
        start: Option<usize>,

        /// Index of a fixed last place
        #[arg(long)]
        end: Option<usize>,

        /// Close the tour back to its first place
        #[arg(long)]
        return_to_start: bool,

        /// Maximum 2-opt scan passes
        #[arg(long, default_value = "50")]
        max_passes: usize,

        /// Genetic population size
        #[arg(long, default_value = "100")]
        population_size: usize,

        /// Genetic generation count
        #[arg(long, default_value = "500")]
        generations: usize,

        /// Genetic mutation probability
        #[arg(long, default_value = "0.2")]
        mutation_rate: f64,

        /// Fraction of the population carried over unchanged
        #[arg(long, default_value = "0.1")]
        elite_frac: f64,

        /// Random seed for the genetic strategy
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Write the itinerary as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run all three strategies on one problem and compare totals
    Compare {
        /// JSON problem file with places, distances, and durations
        #[arg(short, long)]
        problem: PathBuf,

        /// Index of a fixed first place
        #[arg(long)]
        start: Option<usize>,

        /// Index of a fixed last place
        #[arg(long)]
        end: Option<usize>,

        /// Close the tour back to its first place
        #[arg(long)]
        return_to_start: bool,

        /// Write the comparison as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// On-disk problem description. Place order must match the matrix rows.
#[derive(Deserialize)]
struct ProblemFile {
    places: Vec<Waypoint>,
    distances: Vec<Vec<f64>>,
    durations: Vec<Vec<f64>>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Solve {
            problem,
            algorithm,
            start,
            end,
            return_to_start,
            max_passes,
            population_size,
            generations,
            mutation_rate,
            elite_frac,
            seed,
            output,
        } => {
            let endpoints = Endpoints {
                start,
                end,
                return_to_start,
            };
            let tuning = Tuning {
                max_passes,
                ga: GaConfig {
                    population_size,
                    generations,
                    mutation_rate,
                    elite_frac,
                    seed,
                },
            };
            solve(&problem, &algorithm, &endpoints, &tuning, output.as_deref())
        }

        Commands::Compare {
            problem,
            start,
            end,
            return_to_start,
            output,
        } => {
            let endpoints = Endpoints {
                start,
                end,
                return_to_start,
            };
            compare(&problem, &endpoints, output.as_deref())
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load_problem(path: &Path) -> Result<ProblemFile, Box<dyn Error>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn solve(
    path: &Path,
    algorithm: &str,
    endpoints: &Endpoints,
    tuning: &Tuning,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let strategy: Strategy = algorithm.parse()?;
    let problem = load_problem(path)?;

    let itinerary = optimize(
        &problem.places,
        problem.distances,
        problem.durations,
        endpoints,
        strategy,
        tuning,
    )?;

    print_itinerary(strategy, &itinerary);

    if let Some(out) = output {
        serde_json::to_writer_pretty(File::create(out)?, &itinerary)?;
        println!("Itinerary written to {}", out.display());
    }

    Ok(())
}

fn compare(path: &Path, endpoints: &Endpoints, output: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let problem = load_problem(path)?;
    let tuning = Tuning::default();

    let mut rows = Vec::with_capacity(Strategy::ALL.len());
    for strategy in Strategy::ALL {
        let itinerary = optimize(
            &problem.places,
            problem.distances.clone(),
            problem.durations.clone(),
            endpoints,
            strategy,
            &tuning,
        )?;
        rows.push((strategy, itinerary));
    }

    println!(
        "{:<10} {:>6} {:>16} {:>16}",
        "strategy", "stops", "total_distance", "total_duration"
    );
    for (strategy, itinerary) in &rows {
        println!(
            "{:<10} {:>6} {:>16} {:>16}",
            strategy.as_str(),
            itinerary.visiting_order.len(),
            itinerary.total_distance,
            itinerary.total_duration
        );
    }

    if let Some(out) = output {
        let mut writer = csv::Writer::from_path(out)?;
        writer.write_record(["strategy", "stops", "total_distance", "total_duration", "order"])?;
        for (strategy, itinerary) in &rows {
            let order = itinerary
                .visiting_order
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writer.write_record([
                strategy.as_str().to_string(),
                itinerary.visiting_order.len().to_string(),
                itinerary.total_distance.to_string(),
                itinerary.total_duration.to_string(),
                order,
            ])?;
        }
        writer.flush()?;
        println!("Comparison written to {}", out.display());
    }

    Ok(())
}

fn print_itinerary(strategy: Strategy, itinerary: &Itinerary) {
    println!("Strategy: {}", strategy.as_str());
    print!("{itinerary}");
}
