//! Equal-width histogram binning.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Span of the synthetic bin used when every sample has the same value.
const DEGENERATE_SPAN: f64 = 1.0;

/// Equal-width bin counts over a sample set.
///
/// Bin `i` counts the samples in `[bin_edges[i], bin_edges[i + 1])`; the last
/// bin is closed on the right so the maximum sample is counted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Histogram {
    bin_edges: Vec<f64>,
    counts: Vec<usize>,
    min_value: f64,
    max_value: f64,
    bin_width: f64,
    max_count: usize,
}

impl Histogram {
    /// Bin `data` into `bins` equal-width intervals spanning its range.
    ///
    /// When every sample is identical the range is degenerate and the result
    /// is a single bin of width 1 centred on that value, holding every sample.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyInput` if `data` is empty.
    /// Returns `Error::InvalidParameter` if `bins` is zero or a sample is
    /// NaN or infinite.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn build(data: &[f64], bins: usize) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        if bins == 0 {
            return Err(Error::InvalidParameter {
                name: "bins",
                value: 0.0,
                reason: "histogram needs at least one bin",
            });
        }
        if let Some(&x) = data.iter().find(|x| !x.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "data",
                value: x,
                reason: "samples must be finite",
            });
        }

        let lo = data.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if lo >= hi {
            let half = DEGENERATE_SPAN / 2.0;
            trace_debug!(value = lo, n = data.len(), "degenerate range, single bin");
            return Ok(Self {
                bin_edges: vec![lo - half, lo + half],
                counts: vec![data.len()],
                min_value: lo,
                max_value: hi,
                bin_width: DEGENERATE_SPAN,
                max_count: data.len(),
            });
        }

        let bin_width = (hi - lo) / bins as f64;
        let mut bin_edges: Vec<f64> = (0..bins).map(|i| lo + i as f64 * bin_width).collect();
        bin_edges.push(hi);

        let mut counts = vec![0_usize; bins];
        for &x in data {
            let mut idx = (((x - lo) / bin_width).floor() as usize).min(bins - 1);
            // Rounding in the division can disagree with the stored edges by one bin.
            while idx > 0 && x < bin_edges[idx] {
                idx -= 1;
            }
            while idx + 1 < bins && x >= bin_edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += 1;
        }

        let max_count = counts.iter().copied().max().unwrap_or(0);
        trace_debug!(bins, lo, hi, max_count, "built histogram");

        Ok(Self {
            bin_edges,
            counts,
            min_value: lo,
            max_value: hi,
            bin_width,
            max_count,
        })
    }

    /// The `n_bins() + 1` bin boundaries, in increasing order.
    #[must_use]
    pub fn bin_edges(&self) -> &[f64] {
        &self.bin_edges
    }

    /// Sample count per bin.
    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    #[must_use]
    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    /// Total number of binned samples.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Largest bin count; the bar scale.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Smallest sample.
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// Largest sample.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    #[must_use]
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }
}
