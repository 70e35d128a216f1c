//! Parametric distribution families and the sampler behind them.
//!
//! A [`DistributionSpec`] is plain data. [`sample`] validates it up front,
//! compiles it into `rand_distr` samplers, and draws from them, so an invalid
//! spec never consumes any randomness.

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand_distr::{Gamma, Normal};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A distribution family together with its parameters.
///
/// Mixtures hold their components inline. Exactly one level of nesting is
/// allowed: a mixture component must be `Normal` or `Gamma`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "family", rename_all = "lowercase"))]
pub enum DistributionSpec {
    /// Gaussian with mean `mu` and standard deviation `sigma`.
    Normal {
        /// Mean.
        mu: f64,
        /// Standard deviation, strictly positive.
        sigma: f64,
    },
    /// Gamma with shape `alpha` and rate `beta`.
    Gamma {
        /// Shape, strictly positive.
        alpha: f64,
        /// Rate (inverse scale), strictly positive.
        beta: f64,
    },
    /// Weighted mixture of component distributions.
    Mixture {
        /// Non-negative relative weights, one per component. Need not sum to 1.
        weights: Vec<f64>,
        /// Component distributions.
        components: Vec<DistributionSpec>,
    },
}

impl DistributionSpec {
    /// Normal distribution with mean `mu` and standard deviation `sigma`.
    #[must_use]
    pub const fn normal(mu: f64, sigma: f64) -> Self {
        Self::Normal { mu, sigma }
    }

    /// Gamma distribution with shape `alpha` and rate `beta`.
    #[must_use]
    pub const fn gamma(alpha: f64, beta: f64) -> Self {
        Self::Gamma { alpha, beta }
    }

    /// Mixture picking `components[i]` with probability proportional to `weights[i]`.
    #[must_use]
    pub fn mixture(weights: Vec<f64>, components: Vec<DistributionSpec>) -> Self {
        Self::Mixture {
            weights,
            components,
        }
    }

    /// Family name used in catalog titles.
    #[must_use]
    pub fn family(&self) -> &'static str {
        match self {
            Self::Normal { .. } => "Normal",
            Self::Gamma { .. } => "Gamma",
            Self::Mixture { .. } => "Mixture",
        }
    }

    /// One-line parameter summary shown under a catalog header.
    ///
    /// Normal parameters always print a decimal point (`mu 0.0 and sigma 1.0`).
    /// Mixtures have no summary line.
    #[must_use]
    pub fn describe(&self) -> Option<String> {
        match self {
            Self::Normal { mu, sigma } => Some(format!("mu {mu:?} and sigma {sigma:?}")),
            Self::Gamma { alpha, beta } => Some(format!("alpha {alpha} and beta {beta}")),
            Self::Mixture { .. } => None,
        }
    }

    /// Check every parameter without drawing anything.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` for a non-positive or non-finite
    /// `sigma`, `alpha`, or `beta`, a non-finite `mu`, or mixture weights that
    /// are negative, non-finite, or all zero.
    /// Returns `Error::ShapeMismatch` for an empty mixture, a weight/component
    /// length mismatch, or a mixture nested inside another mixture.
    pub fn validate(&self) -> Result<()> {
        self.validate_at(0)
    }

    fn validate_at(&self, depth: usize) -> Result<()> {
        match self {
            Self::Normal { mu, sigma } => {
                if !mu.is_finite() {
                    return Err(invalid("mu", *mu, "must be finite"));
                }
                positive("sigma", *sigma)
            }
            Self::Gamma { alpha, beta } => {
                positive("alpha", *alpha)?;
                positive("beta", *beta)
            }
            Self::Mixture {
                weights,
                components,
            } => {
                if depth > 0 {
                    return Err(Error::ShapeMismatch(
                        "mixture nested inside another mixture".into(),
                    ));
                }
                if components.is_empty() {
                    return Err(Error::ShapeMismatch("mixture has no components".into()));
                }
                if weights.len() != components.len() {
                    return Err(Error::ShapeMismatch(format!(
                        "{} weights for {} components",
                        weights.len(),
                        components.len()
                    )));
                }
                if let Some(&w) = weights.iter().find(|w| !(w.is_finite() && **w >= 0.0)) {
                    return Err(invalid("weights", w, "must be finite and non-negative"));
                }
                if weights.iter().sum::<f64>() <= 0.0 {
                    return Err(invalid("weights", 0.0, "must not all be zero"));
                }
                components
                    .iter()
                    .try_for_each(|component| component.validate_at(depth + 1))
            }
        }
    }

    fn compile(&self) -> Result<Sampler> {
        match self {
            Self::Normal { mu, sigma } => Normal::new(*mu, *sigma)
                .map(Sampler::Normal)
                .map_err(|_| invalid("sigma", *sigma, "rejected by the normal sampler")),
            Self::Gamma { alpha, beta } => Gamma::new(*alpha, beta.recip())
                .map(Sampler::Gamma)
                .map_err(|_| invalid("beta", *beta, "rejected by the gamma sampler")),
            Self::Mixture {
                weights,
                components,
            } => {
                let index = WeightedIndex::new(weights)
                    .map_err(|_| invalid("weights", 0.0, "rejected by the weighted index"))?;
                let components = components
                    .iter()
                    .map(Self::compile)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Sampler::Mixture { index, components })
            }
        }
    }
}

/// Draw `n` independent samples from `spec`.
///
/// The spec is validated before any randomness is consumed.
///
/// # Errors
///
/// Returns the errors of [`DistributionSpec::validate`].
pub fn sample<R: Rng + ?Sized>(spec: &DistributionSpec, n: usize, rng: &mut R) -> Result<Vec<f64>> {
    spec.validate()?;
    let sampler = spec.compile()?;
    trace_debug!(family = spec.family(), n, "drawing samples");
    Ok((0..n).map(|_| sampler.sample(rng)).collect())
}

/// A validated spec, compiled into ready-to-draw samplers.
#[derive(Debug)]
enum Sampler {
    Normal(Normal<f64>),
    Gamma(Gamma<f64>),
    Mixture {
        index: WeightedIndex<f64>,
        components: Vec<Sampler>,
    },
}

impl Distribution<f64> for Sampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Sampler::Normal(d) => d.sample(rng),
            Sampler::Gamma(d) => d.sample(rng),
            Sampler::Mixture { index, components } => components[index.sample(rng)].sample(rng),
        }
    }
}

fn invalid(name: &'static str, value: f64, reason: &'static str) -> Error {
    Error::InvalidParameter {
        name,
        value,
        reason,
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value, "must be finite and positive"))
    }
}
