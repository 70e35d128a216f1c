#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Animated ASCII histograms of parametric probability distributions.
//!
//! Each histogram bar is typed onto the terminal one character at a time,
//! with a small random delay before every character, like a typewriter. The
//! pipeline runs strictly forward:
//!
//! | Stage | Item | Role |
//! |------|------|------|
//! | Sample | [`sample`](distribution::sample) | Draw `n` values from a [`DistributionSpec`]. |
//! | Bin | [`Histogram::build`] | Equal-width bins, counts, and range. |
//! | Pace | [`DelayPool::generate`] | Truncated-normal jitter, generated once per run. |
//! | Render | [`render`](render::render) | Type the bars onto a [`Typewriter`]. |
//! | Parade | [`Parade::run`] | Walk the catalog, printing a header per entry. |
//!
//! Randomness is injected as any [`rand::Rng`], so a seeded `StdRng` gives a
//! reproducible parade. Pacing goes through the [`Pause`] trait: use
//! [`ThreadSleep`] for the animation and [`NoPause`] for instant output.
//!
//! # Getting Started
//!
//! ```
//! use distparade::prelude::*;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let data = distparade::distribution::sample(&DistributionSpec::normal(0.0, 1.0), 500, &mut rng)?;
//! let histogram = Histogram::build(&data, 10)?;
//! let pool = DelayPool::generate(0.01, 0.005, 50, &mut rng)?;
//!
//! let mut out = Typewriter::new(Vec::new(), NoPause);
//! distparade::render::render(&histogram, &pool, &RenderConfig::new().width(30), &mut out, &mut rng)?;
//! assert!(String::from_utf8(out.into_inner()).unwrap().contains("Bin size:"));
//! # Ok::<(), distparade::Error>(())
//! ```
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on specs, catalog entries, histograms, and delay pools | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing); the binary logs to stderr filtered by `RUST_LOG` | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod catalog;
pub mod delay;
pub mod distribution;
mod error;
pub mod histogram;
pub mod render;

pub use catalog::{CatalogEntry, Parade, ParadeBuilder, default_catalog};
pub use delay::DelayPool;
pub use distribution::DistributionSpec;
pub use error::{Error, Result};
pub use histogram::Histogram;
pub use render::{NoPause, Pause, RenderConfig, ThreadSleep, Typewriter};

/// Mean inter-character delay in seconds when none is configured.
pub const DEFAULT_DELAY: f64 = 0.01;

/// Number of jitter values in the shared delay pool.
pub const DEFAULT_POOL_SIZE: usize = 50;

/// Spread of the delay pool relative to its mean.
pub const DEFAULT_SPREAD_RATIO: f64 = 0.5;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use distparade::prelude::*;
/// ```
pub mod prelude {
    pub use crate::catalog::{CatalogEntry, Parade, ParadeBuilder, default_catalog};
    pub use crate::delay::DelayPool;
    pub use crate::distribution::DistributionSpec;
    pub use crate::error::{Error, Result};
    pub use crate::histogram::Histogram;
    pub use crate::render::{NoPause, Pause, RenderConfig, ThreadSleep, Typewriter};
}
