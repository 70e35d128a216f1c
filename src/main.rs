//! `distparade`: type a parade of distribution histograms onto the terminal.
//!
//! Run with: `cargo run --release -- --delay 0.02`

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use distparade::catalog::{DEFAULT_BINS, DEFAULT_SAMPLES};
use distparade::render::DEFAULT_WIDTH;
use distparade::{
    DEFAULT_DELAY, DEFAULT_POOL_SIZE, DEFAULT_SPREAD_RATIO, DelayPool, NoPause, Parade, Pause,
    ThreadSleep, Typewriter,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Distribution Visualizer
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Mean delay between characters, in seconds. Non-positive values fall back to the default.
    #[arg(long, default_value_t = DEFAULT_DELAY)]
    delay: f64,

    /// Seed for a reproducible parade.
    #[arg(long)]
    seed: Option<u64>,

    /// Histogram bins per distribution.
    #[arg(long, default_value_t = DEFAULT_BINS)]
    bins: usize,

    /// Width of the longest bar, in characters.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Samples drawn per distribution.
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    samples: usize,

    /// Print everything at once instead of typing it out.
    #[arg(long)]
    instant: bool,
}

impl Args {
    fn mean_delay(&self) -> f64 {
        if self.delay.is_finite() && self.delay > 0.0 {
            self.delay
        } else {
            DEFAULT_DELAY
        }
    }
}

#[cfg(feature = "tracing")]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

#[cfg(not(feature = "tracing"))]
fn init_logging() {}

fn parade<W: Write, P: Pause>(
    args: &Args,
    typewriter: &mut Typewriter<W, P>,
) -> distparade::Result<()> {
    let mut rng = args
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    let delay = args.mean_delay();
    let pool = DelayPool::generate(
        delay,
        delay * DEFAULT_SPREAD_RATIO,
        DEFAULT_POOL_SIZE,
        &mut rng,
    )?;

    let mut builder = Parade::builder()
        .samples(args.samples)
        .bins(args.bins)
        .width(args.width);
    if args.instant {
        builder = builder.line_pause(core::time::Duration::ZERO);
    }
    builder.build().run(&pool, typewriter, &mut rng)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    let stdout = io::stdout().lock();
    let result = if args.instant {
        parade(&args, &mut Typewriter::new(stdout, NoPause))
    } else {
        parade(&args, &mut Typewriter::new(stdout, ThreadSleep))
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
