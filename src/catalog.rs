//! The catalog of distributions and the loop that parades through it.

use core::time::Duration;
use std::io::Write;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::delay::DelayPool;
use crate::distribution::{self, DistributionSpec};
use crate::error::{Error, Result};
use crate::histogram::Histogram;
use crate::render::{self, Pause, RenderConfig, Typewriter};

/// Samples drawn per catalog entry.
pub const DEFAULT_SAMPLES: usize = 1000;

/// Histogram bins per catalog entry.
pub const DEFAULT_BINS: usize = 20;

/// Banner printed once before the first entry.
pub const BANNER: &str = "== A Parade of Distributions ==";

/// One named distribution in the catalog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CatalogEntry {
    /// Display name, e.g. `Normal Distribution`.
    pub name: String,
    /// The distribution to sample.
    pub spec: DistributionSpec,
}

impl CatalogEntry {
    /// Entry named after the spec's family, e.g. `Gamma Distribution`.
    #[must_use]
    pub fn new(spec: DistributionSpec) -> Self {
        Self {
            name: format!("{} Distribution", spec.family()),
            spec,
        }
    }

    /// Entry with an explicit display name.
    #[must_use]
    pub fn named(name: impl Into<String>, spec: DistributionSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }
}

/// The built-in catalog: three normals, a gamma, and a two-component mixture.
#[must_use]
pub fn default_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(DistributionSpec::normal(0.0, 1.0)),
        CatalogEntry::new(DistributionSpec::normal(0.0, 5.0)),
        CatalogEntry::new(DistributionSpec::normal(0.0, 0.1)),
        CatalogEntry::new(DistributionSpec::gamma(2.0, 1.0)),
        CatalogEntry::new(DistributionSpec::mixture(
            vec![0.3, 0.7],
            vec![
                DistributionSpec::normal(-1.0, 1.0),
                DistributionSpec::normal(1.0, 0.5),
            ],
        )),
    ]
}

/// An ordered catalog of distributions, rendered one after another.
///
/// # Examples
///
/// ```
/// use distparade::prelude::*;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let parade = Parade::builder().samples(200).bins(5).width(10).build();
/// let mut rng = StdRng::seed_from_u64(42);
/// let pool = DelayPool::generate(0.0, 0.0, 1, &mut rng).unwrap();
/// let mut out = Typewriter::new(Vec::new(), NoPause);
///
/// parade.run(&pool, &mut out, &mut rng).unwrap();
///
/// let text = String::from_utf8(out.into_inner()).unwrap();
/// assert!(text.contains("(5) Mixture Distribution"));
/// ```
#[derive(Clone, Debug)]
pub struct Parade {
    entries: Vec<CatalogEntry>,
    samples: usize,
    bins: usize,
    render: RenderConfig,
}

impl Default for Parade {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Parade {
    /// The built-in catalog with default sizes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a [`ParadeBuilder`].
    #[must_use]
    pub fn builder() -> ParadeBuilder {
        ParadeBuilder::new()
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    /// Sample, bin, and render every entry in order, sharing one delay pool.
    ///
    /// Entries are numbered from 1 across the whole catalog. The first
    /// failure stops the run; later entries are not attempted.
    ///
    /// # Errors
    ///
    /// Returns `Error::IoFailure` if the banner or trailer cannot be written,
    /// and `Error::Entry` wrapping the failure of the first entry that fails.
    pub fn run<W: Write, P: Pause, R: Rng + ?Sized>(
        &self,
        pool: &DelayPool,
        typewriter: &mut Typewriter<W, P>,
        rng: &mut R,
    ) -> Result<()> {
        trace_info!(
            entries = self.entries.len(),
            samples = self.samples,
            bins = self.bins,
            "parade started"
        );
        typewriter.type_str(&format!("\n{BANNER}\n"))?;

        for (i, entry) in self.entries.iter().enumerate() {
            let title = format!("({}) {}", i + 1, entry.name);
            trace_info!(title = %title, "rendering entry");
            self.run_entry(&title, entry, pool, typewriter, rng)
                .map_err(|source| Error::Entry {
                    title,
                    source: Box::new(source),
                })?;
        }

        typewriter.type_str("\n\n")?;
        trace_info!("parade finished");
        Ok(())
    }

    fn run_entry<W: Write, P: Pause, R: Rng + ?Sized>(
        &self,
        title: &str,
        entry: &CatalogEntry,
        pool: &DelayPool,
        typewriter: &mut Typewriter<W, P>,
        rng: &mut R,
    ) -> Result<()> {
        typewriter.type_str(&header(title, entry.spec.describe().as_deref()))?;

        let data = distribution::sample(&entry.spec, self.samples, rng)?;
        let histogram = Histogram::build(&data, self.bins)?;
        render::render(&histogram, pool, &self.render, typewriter, rng)
    }
}

/// Blank line, the title, a `=` rule under it, the optional parameter line, then a blank line.
fn header(title: &str, params: Option<&str>) -> String {
    let rule = "=".repeat(title.chars().count());
    match params {
        Some(params) => format!("\n{title}\n{rule}\n{params}\n\n"),
        None => format!("\n{title}\n{rule}\n\n"),
    }
}

/// A builder for [`Parade`] with a fluent API.
///
/// # Defaults
///
/// - Catalog: [`default_catalog`]
/// - Samples per entry: [`DEFAULT_SAMPLES`]
/// - Bins: [`DEFAULT_BINS`]
/// - Rendering: [`RenderConfig::default`]
#[derive(Clone, Debug)]
pub struct ParadeBuilder {
    entries: Option<Vec<CatalogEntry>>,
    samples: usize,
    bins: usize,
    render: RenderConfig,
}

impl ParadeBuilder {
    fn new() -> Self {
        Self {
            entries: None,
            samples: DEFAULT_SAMPLES,
            bins: DEFAULT_BINS,
            render: RenderConfig::default(),
        }
    }

    /// Replace the built-in catalog.
    #[must_use]
    pub fn entries(mut self, entries: Vec<CatalogEntry>) -> Self {
        self.entries = Some(entries);
        self
    }

    /// Append one entry, starting from an empty catalog if none was set.
    #[must_use]
    pub fn entry(mut self, entry: CatalogEntry) -> Self {
        self.entries.get_or_insert_with(Vec::new).push(entry);
        self
    }

    #[must_use]
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    #[must_use]
    pub fn bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.render = self.render.width(width);
        self
    }

    #[must_use]
    pub fn line_pause(mut self, line_pause: Duration) -> Self {
        self.render = self.render.line_pause(line_pause);
        self
    }

    /// Replace the whole render configuration.
    #[must_use]
    pub fn render_config(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    #[must_use]
    pub fn build(self) -> Parade {
        Parade {
            entries: self.entries.unwrap_or_else(default_catalog),
            samples: self.samples,
            bins: self.bins,
            render: self.render,
        }
    }
}
