//! Typewriter-style ASCII histogram rendering.
//!
//! Every bar is typed one marker at a time with a delay picked from a
//! [`DelayPool`] before each character. The text itself depends only on the
//! histogram and the [`RenderConfig`]; only the pacing is random.
//!
//! ```text
//!  -2.95 | ###                                                |  12
//!  -2.64 | ##########                                         |  41
//!        +--------------------------------------------------+
//!        0                                                 131
//! Min: -2.95, Max: 3.21, Bin size: 0.308
//! ```

use core::time::Duration;
use std::io::Write;

use rand::Rng;

use crate::delay::DelayPool;
use crate::error::{Error, Result};
use crate::histogram::Histogram;

/// Default bar width in characters.
pub const DEFAULT_WIDTH: usize = 50;

/// Widest bar the renderer accepts, in characters.
pub const MAX_WIDTH: usize = 10_000;

/// Default pause before each bar and after each line.
pub const DEFAULT_LINE_PAUSE: Duration = Duration::from_millis(10);

/// Default bar marker.
pub const DEFAULT_BAR_MARK: char = '#';

/// Indent that lines the footer up with the `{:6.2} |` label column.
const GUTTER: &str = "       ";

/// How the renderer waits between characters.
///
/// Implementations decide what a pause means: [`ThreadSleep`] blocks the
/// thread, [`NoPause`] returns immediately.
pub trait Pause {
    /// Wait for `duration`.
    fn pause(&mut self, duration: Duration);
}

/// Blocks the current thread for each pause.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleep;

impl Pause for ThreadSleep {
    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Skips every pause.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPause;

impl Pause for NoPause {
    fn pause(&mut self, _duration: Duration) {}
}

/// An output sink that flushes after every write, paired with a [`Pause`].
///
/// Writes are never batched, so each character is visible as soon as it is
/// typed.
#[derive(Debug)]
pub struct Typewriter<W, P = ThreadSleep> {
    out: W,
    pause: P,
}

impl<W: Write, P: Pause> Typewriter<W, P> {
    /// Wrap `out`, pacing with `pause`.
    #[must_use]
    pub fn new(out: W, pause: P) -> Self {
        Self { out, pause }
    }

    /// Write `text` and flush it.
    ///
    /// # Errors
    ///
    /// Returns `Error::IoFailure` if the sink rejects the write or the flush.
    pub fn type_str(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    /// Write a single character and flush it.
    ///
    /// # Errors
    ///
    /// Returns `Error::IoFailure` if the sink rejects the write or the flush.
    pub fn type_char(&mut self, c: char) -> Result<()> {
        let mut buf = [0_u8; 4];
        self.type_str(c.encode_utf8(&mut buf))
    }

    /// Wait for `duration` using the configured [`Pause`].
    pub fn pause(&mut self, duration: Duration) {
        self.pause.pause(duration);
    }

    /// Recover the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Layout and pacing of a rendered histogram.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    width: usize,
    bar_mark: char,
    line_pause: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            bar_mark: DEFAULT_BAR_MARK,
            line_pause: DEFAULT_LINE_PAUSE,
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the width of a full-length bar (the tallest bin).
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the character a bar is drawn with.
    #[must_use]
    pub fn bar_mark(mut self, bar_mark: char) -> Self {
        self.bar_mark = bar_mark;
        self
    }

    /// Set the fixed pause before each bar and after each line.
    #[must_use]
    pub fn line_pause(mut self, line_pause: Duration) -> Self {
        self.line_pause = line_pause;
        self
    }

    #[must_use]
    pub fn get_width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn get_bar_mark(&self) -> char {
        self.bar_mark
    }

    #[must_use]
    pub fn get_line_pause(&self) -> Duration {
        self.line_pause
    }
}

/// Type `histogram` onto `typewriter`, one bar character at a time.
///
/// Before each bar character the renderer pauses for a delay picked
/// uniformly from `pool`. Output already written stays written if the sink
/// fails part-way.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if the configured width is zero or
/// above [`MAX_WIDTH`].
/// Returns `Error::IoFailure` as soon as a write or flush fails; nothing is retried.
#[allow(clippy::cast_precision_loss)]
pub fn render<W: Write, P: Pause, R: Rng + ?Sized>(
    histogram: &Histogram,
    pool: &DelayPool,
    config: &RenderConfig,
    typewriter: &mut Typewriter<W, P>,
    rng: &mut R,
) -> Result<()> {
    let width = config.width;
    if width == 0 {
        return Err(Error::InvalidParameter {
            name: "width",
            value: 0.0,
            reason: "bar width must be at least one character",
        });
    }
    if width > MAX_WIDTH {
        return Err(Error::InvalidParameter {
            name: "width",
            value: width as f64,
            reason: "bar width exceeds the widest allowed bar",
        });
    }
    let max_count = histogram.max_count().max(1);

    for (&edge, &count) in histogram.bin_edges().iter().zip(histogram.counts()) {
        let bar_width = scaled_width(width, count, max_count);

        typewriter.type_str(&format!("{edge:6.2} | "))?;
        typewriter.pause(config.line_pause);

        for _ in 0..bar_width {
            typewriter.pause(pool.pick(rng));
            typewriter.type_char(config.bar_mark)?;
        }

        typewriter.type_str(&format!(
            "{:pad$} | {count:3}\n",
            "",
            pad = width - bar_width
        ))?;
        typewriter.pause(config.line_pause);
    }

    typewriter.type_str(&footer(histogram, width))
}

/// `floor(width * count / max_count)`, computed without overflow.
#[allow(clippy::cast_possible_truncation)]
fn scaled_width(width: usize, count: usize, max_count: usize) -> usize {
    // count <= max_count, so the quotient never exceeds width.
    (width as u128 * count as u128 / max_count as u128) as usize
}

fn footer(histogram: &Histogram, width: usize) -> String {
    format!(
        "{GUTTER}+{dashes}+\n{GUTTER}0{blank}{max:4}\nMin: {min:.2}, Max: {hi:.2}, Bin size: {bin:.3}\n",
        dashes = "-".repeat(width),
        blank = " ".repeat(width.saturating_sub(2)),
        max = histogram.max_count(),
        min = histogram.min_value(),
        hi = histogram.max_value(),
        bin = histogram.bin_width(),
    )
}
