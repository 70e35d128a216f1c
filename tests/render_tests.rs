use core::time::Duration;
use std::io::{self, Write};

use distparade::render::render;
use distparade::{DelayPool, Error, Histogram, NoPause, Pause, RenderConfig, Typewriter};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Records every requested pause instead of sleeping.
#[derive(Default)]
struct Recorder {
    pauses: Vec<Duration>,
}

impl Pause for &mut Recorder {
    fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }
}

/// Accepts `budget` bytes, then reports a closed pipe.
struct ClosingSink {
    written: Vec<u8>,
    budget: usize,
}

impl Write for ClosingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written.len() >= self.budget {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        let n = buf.len().min(self.budget - self.written.len());
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn sample_histogram() -> Histogram {
    let data: Vec<f64> = (0..200).map(|i| f64::from(i % 37) * 0.25 - 3.0).collect();
    Histogram::build(&data, 12).unwrap()
}

fn render_text(h: &Histogram, pool: &DelayPool, seed: u64) -> String {
    let mut tw = Typewriter::new(Vec::new(), NoPause);
    let mut rng = StdRng::seed_from_u64(seed);
    render(h, pool, &RenderConfig::new(), &mut tw, &mut rng).unwrap();
    String::from_utf8(tw.into_inner()).unwrap()
}

#[test]
fn content_ignores_timing() {
    let h = sample_histogram();
    let fast = DelayPool::from_delays(vec![0.0]).unwrap();
    let jittery = DelayPool::from_delays(vec![0.001, 0.002, 0.5, 0.0]).unwrap();
    let a = render_text(&h, &fast, 1);
    let b = render_text(&h, &jittery, 99);
    assert_eq!(a, b);
}

#[test]
fn one_line_per_bin_plus_footer() {
    let h = sample_histogram();
    let text = render_text(&h, &DelayPool::from_delays(vec![0.0]).unwrap(), 0);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), h.n_bins() + 3);

    for (line, &count) in lines.iter().zip(h.counts()) {
        let bar = line.split(" | ").nth(1).unwrap();
        assert_eq!(bar.len(), 50, "bar is padded to full width");
        assert_eq!(bar.trim_end().len(), 50 * count / h.max_count());
        assert!(line.ends_with(&format!("{count:3}")));
    }
    assert!(lines[h.n_bins()].starts_with("       +"));
    assert!(lines[h.n_bins() + 2].starts_with("Min: "));
}

#[test]
fn tallest_bar_fills_width() {
    let h = sample_histogram();
    let text = render_text(&h, &DelayPool::from_delays(vec![0.0]).unwrap(), 0);
    assert!(text.contains(&"#".repeat(50)));
    assert!(!text.contains(&"#".repeat(51)));
}

#[test]
fn pauses_come_from_pool_and_line_pause() {
    let h = sample_histogram();
    let pool = DelayPool::from_delays(vec![0.003, 0.007]).unwrap();
    let config = RenderConfig::new().width(20).line_pause(Duration::from_millis(4));
    let mut recorder = Recorder::default();
    let mut rng = StdRng::seed_from_u64(3);

    {
        let mut tw = Typewriter::new(Vec::new(), &mut recorder);
        render(&h, &pool, &config, &mut tw, &mut rng).unwrap();
    }

    let bar_chars: usize = h.counts().iter().map(|c| 20 * c / h.max_count()).sum();
    assert_eq!(recorder.pauses.len(), bar_chars + 2 * h.n_bins());

    let line_pauses = recorder
        .pauses
        .iter()
        .filter(|d| **d == Duration::from_millis(4))
        .count();
    assert_eq!(line_pauses, 2 * h.n_bins());

    let allowed = [Duration::from_secs_f64(0.003), Duration::from_secs_f64(0.007)];
    assert!(
        recorder
            .pauses
            .iter()
            .filter(|d| **d != Duration::from_millis(4))
            .all(|d| allowed.contains(d))
    );
}

#[test]
fn closed_sink_is_io_failure_and_keeps_partial_output() {
    let h = sample_histogram();
    let pool = DelayPool::from_delays(vec![0.0]).unwrap();
    let mut tw = Typewriter::new(
        ClosingSink {
            written: Vec::new(),
            budget: 40,
        },
        NoPause,
    );
    let mut rng = StdRng::seed_from_u64(0);

    let err = render(&h, &pool, &RenderConfig::new(), &mut tw, &mut rng).unwrap_err();
    assert!(matches!(err, Error::IoFailure(_)));
    assert_eq!(tw.into_inner().written.len(), 40);
}
