//! Jittered per-character delays.
//!
//! The renderer never samples a distribution in its hot loop. Instead a small
//! [`DelayPool`] of truncated-normal values is generated once per run and the
//! renderer picks from it uniformly for every character.

use core::time::Duration;

use rand::Rng;
use rand::distr::Distribution;
use rand_distr::Normal;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Attempts per value before a truncated-normal draw gives up and falls back to zero.
pub const MAX_REDRAWS: usize = 1000;

/// Longest single delay, in seconds, a pool may hold.
pub const MAX_DELAY: f64 = 3600.0;

/// A fixed, read-only pool of non-negative delays in seconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DelayPool {
    delays: Vec<f64>,
}

impl DelayPool {
    /// Draw `k` delays from Normal(`mu`, `sigma`) truncated to `[0, MAX_DELAY]`.
    ///
    /// Out-of-range draws are rejected and redrawn, never clamped, so the pool
    /// follows the truncated shape. A value that keeps landing outside the
    /// range for [`MAX_REDRAWS`] attempts becomes `0.0`. With `sigma == 0`
    /// the pool is `k` exact copies of `mu`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `mu` or `sigma` is negative,
    /// non-finite, or above [`MAX_DELAY`], or if `k` is zero.
    pub fn generate<R: Rng + ?Sized>(mu: f64, sigma: f64, k: usize, rng: &mut R) -> Result<Self> {
        if !(mu.is_finite() && mu >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "mu",
                value: mu,
                reason: "delay mean must be finite and non-negative",
            });
        }
        if mu > MAX_DELAY {
            return Err(Error::InvalidParameter {
                name: "mu",
                value: mu,
                reason: "delay mean exceeds the longest allowed delay",
            });
        }
        if !(sigma.is_finite() && sigma >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "sigma",
                value: sigma,
                reason: "delay spread must be finite and non-negative",
            });
        }
        if sigma > MAX_DELAY {
            return Err(Error::InvalidParameter {
                name: "sigma",
                value: sigma,
                reason: "delay spread exceeds the longest allowed delay",
            });
        }
        if k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                value: 0.0,
                reason: "delay pool needs at least one value",
            });
        }

        if sigma <= 0.0 {
            return Ok(Self {
                delays: vec![mu; k],
            });
        }

        let normal = Normal::new(mu, sigma).map_err(|_| Error::InvalidParameter {
            name: "sigma",
            value: sigma,
            reason: "rejected by the normal sampler",
        })?;

        let mut fallbacks = 0_usize;
        let delays = (0..k)
            .map(|_| {
                (0..MAX_REDRAWS)
                    .map(|_| normal.sample(rng))
                    .find(|d| (0.0..=MAX_DELAY).contains(d))
                    .unwrap_or_else(|| {
                        fallbacks += 1;
                        0.0
                    })
            })
            .collect();

        if fallbacks > 0 {
            trace_debug!(fallbacks, mu, sigma, "truncated normal fell back to zero");
        }
        let pool = Self { delays };
        trace_debug!(k, mean = pool.mean(), "generated delay pool");
        Ok(pool)
    }

    /// Build a pool from explicit delays in seconds.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `delays` is empty or holds a
    /// negative, non-finite, or longer than [`MAX_DELAY`] value.
    pub fn from_delays(delays: Vec<f64>) -> Result<Self> {
        if delays.is_empty() {
            return Err(Error::InvalidParameter {
                name: "k",
                value: 0.0,
                reason: "delay pool needs at least one value",
            });
        }
        if let Some(&d) = delays.iter().find(|d| !(d.is_finite() && **d >= 0.0)) {
            return Err(Error::InvalidParameter {
                name: "delay",
                value: d,
                reason: "delays must be finite and non-negative",
            });
        }
        if let Some(&d) = delays.iter().find(|d| **d > MAX_DELAY) {
            return Err(Error::InvalidParameter {
                name: "delay",
                value: d,
                reason: "delay exceeds the longest allowed delay",
            });
        }
        Ok(Self { delays })
    }

    /// Pick one delay uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let secs = self.delays[rng.random_range(0..self.delays.len())];
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
    }

    /// The delays, in seconds.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.delays
    }

    /// Number of delays in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.delays.len()
    }

    /// Always `false`: construction rejects empty pools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    /// Mean delay in seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> f64 {
        self.delays.iter().sum::<f64>() / self.delays.len() as f64
    }
}
