//! Command-line front end: random cities in, annealed tour out.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::{fmt::Formatter, Builder, Target};
use log::{info, Level, LevelFilter};

use tsp_anneal::geometry::random_points;
use tsp_anneal::neighbor::{MoveKind, NeighborConfig, Perturbation};
use tsp_anneal::random::rng_from_seed;
use tsp_anneal::sa::{Acceptance, AnnealConfig, AnnealRunner, Cooling, LogReporter, ProgressReporter};
use tsp_anneal::tour::Tour;

#[derive(Parser, Debug)]
#[command(name = "tsp-anneal")]
#[command(author, version, about = "Approximate a short closed tour with simulated annealing", long_about = None)]
struct Cli {
    /// Number of cities. Read from stdin when omitted.
    #[arg(short = 'n', long)]
    cities: Option<usize>,

    /// Cities are drawn uniformly from [0, extent) x [0, extent).
    #[arg(long, default_value_t = 100.0)]
    extent: f64,

    /// Seed for coordinates, initial tour and the search.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Starting temperature.
    #[arg(long, default_value_t = 100.0)]
    initial_temperature: f64,

    /// Temperature decay rule.
    #[arg(long, value_enum, default_value_t = CoolingArg::Geometric)]
    cooling: CoolingArg,

    /// Geometric decay factor in (0, 1).
    #[arg(long, default_value_t = 0.999)]
    decay_factor: f64,

    /// Amount subtracted per iteration under linear cooling.
    #[arg(long, default_value_t = 0.01)]
    linear_step: f64,

    /// Lundy-Mees cooling parameter.
    #[arg(long, default_value_t = 0.001)]
    beta: f64,

    /// Stop once the temperature is at or below this value.
    #[arg(long, default_value_t = 0.01)]
    min_temperature: f64,

    /// Hard iteration cap.
    #[arg(long, default_value_t = 100_000)]
    max_iterations: usize,

    /// Candidate acceptance rule.
    #[arg(long, value_enum, default_value_t = AcceptanceArg::Metropolis)]
    acceptance: AcceptanceArg,

    /// Elementary move used to build candidates.
    #[arg(long = "move", value_enum, default_value_t = MoveArg::Swap)]
    move_kind: MoveArg,

    /// Temperature that buys one extra move per candidate.
    #[arg(long, default_value_t = 10.0)]
    temperature_per_move: f64,

    /// Upper bound on moves per candidate (1 disables scaling).
    #[arg(long, default_value_t = 1)]
    max_moves: usize,

    /// Print a progress line every N iterations (0 = off).
    #[arg(long, default_value_t = 0)]
    progress_every: usize,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LevelFilter,
}

/// Best energies within this of the final energy are not reported separately.
const ENERGY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CoolingArg {
    Geometric,
    Linear,
    LundyMees,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AcceptanceArg {
    Metropolis,
    Strict,
}

impl From<AcceptanceArg> for Acceptance {
    fn from(arg: AcceptanceArg) -> Self {
        match arg {
            AcceptanceArg::Metropolis => Acceptance::Metropolis,
            AcceptanceArg::Strict => Acceptance::StrictImprovement,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MoveArg {
    Swap,
    Insert,
    Reverse,
}

impl From<MoveArg> for MoveKind {
    fn from(arg: MoveArg) -> Self {
        match arg {
            MoveArg::Swap => MoveKind::Swap,
            MoveArg::Insert => MoveKind::Insert,
            MoveArg::Reverse => MoveKind::Reverse,
        }
    }
}

impl Cli {
    fn anneal_config(&self) -> AnnealConfig {
        let neighbor = NeighborConfig::default()
            .with_kind(self.move_kind.into())
            .with_temperature_scaling(self.temperature_per_move, self.max_moves);
        let config = AnnealConfig::default()
            .with_initial_temperature(self.initial_temperature)
            .with_cooling(self.cooling_rule())
            .with_min_temperature(self.min_temperature)
            .with_max_iterations(self.max_iterations)
            .with_acceptance(self.acceptance.into())
            .with_neighbor(neighbor);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    fn cooling_rule(&self) -> Cooling {
        match self.cooling {
            CoolingArg::Geometric => Cooling::Geometric {
                alpha: self.decay_factor,
            },
            CoolingArg::Linear => Cooling::Linear {
                step: self.linear_step,
            },
            CoolingArg::LundyMees => Cooling::LundyMees { beta: self.beta },
        }
    }
}

/// Prints `epoch i: temperature=.. energy=..` to stdout at a fixed interval.
struct StdoutReporter {
    every: usize,
}

impl ProgressReporter for StdoutReporter {
    fn report(&mut self, iteration: usize, temperature: f64, energy: f64) {
        if iteration.is_multiple_of(self.every) {
            println!("epoch {iteration}: temperature={temperature:.6} energy={energy:.6}");
        }
    }
}

/// Stdout lines when `--progress-every` is set, otherwise per-iteration `trace!`.
enum Progress {
    Stdout(StdoutReporter),
    Log(LogReporter),
}

impl Progress {
    fn from_interval(every: usize) -> Self {
        if every > 0 {
            Progress::Stdout(StdoutReporter { every })
        } else {
            Progress::Log(LogReporter::new(1))
        }
    }
}

impl ProgressReporter for Progress {
    fn report(&mut self, iteration: usize, temperature: f64, energy: f64) {
        match self {
            Progress::Stdout(r) => r.report(iteration, temperature, energy),
            Progress::Log(r) => r.report(iteration, temperature, energy),
        }
    }
}

fn strictly_better(best: f64, last: f64) -> bool {
    best < last - ENERGY_TOLERANCE
}

fn init_logger(level: LevelFilter) -> Result<()> {
    Builder::new()
        .filter_level(level)
        .write_style(env_logger::WriteStyle::Never)
        .format(|buf: &mut Formatter, record| {
            writeln!(buf, "{} {}", level_tag(record.level()), record.args())
        })
        .target(Target::Stderr)
        .try_init()
        .context("logger init failed")
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

fn read_city_count() -> Result<usize> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read city count from stdin")?;
    line.trim()
        .parse()
        .with_context(|| format!("expected a city count, got {:?}", line.trim()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level)?;

    let n = match cli.cities {
        Some(n) => n,
        None => read_city_count()?,
    };
    if !cli.extent.is_finite() || cli.extent <= 0.0 {
        bail!("extent must be positive and finite, got {}", cli.extent);
    }

    let config = cli.anneal_config();
    let mut rng = rng_from_seed(cli.seed);
    let cities = random_points(n, cli.extent, &mut rng);
    let initial = Tour::random(n, &mut rng);

    println!("City coordinates:");
    for (i, city) in cities.iter().enumerate() {
        println!("{i:>5}: {city}");
    }
    println!("Initial path: {initial}");

    info!("config: {config:?}");

    let mut reporter = Progress::from_interval(cli.progress_every);
    let generator = Perturbation::new(config.neighbor);
    let result =
        AnnealRunner::run_with(initial, &cities, &config, &generator, &mut reporter, None)?;

    println!("Final path: {}", result.tour);
    println!("Final energy: {:.6}", result.energy);
    if strictly_better(result.best_energy, result.energy) {
        println!("Best path: {}", result.best_tour);
        println!("Best energy: {:.6}", result.best_energy);
    }
    println!(
        "Iterations: {} ({:?}), accepted {} / improving {}",
        result.iterations, result.termination, result.accepted_moves, result.improving_moves
    );

    Ok(())
}
