use std::collections::VecDeque;
use std::time::{Duration, Instant};

use roadscape_render::FrameStats;

/// Time source for the frame loop, in milliseconds.
///
/// Live clocks report time since construction. Frozen clocks always report
/// the same value, which pins the renderer to a static frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    frozen: Option<f64>,
}

impl FrameClock {
    pub fn live() -> Self {
        Self {
            start: Instant::now(),
            frozen: None,
        }
    }

    pub fn frozen(ms: f64) -> Self {
        Self {
            start: Instant::now(),
            frozen: Some(ms),
        }
    }

    /// Freeze at `seconds`; zero means live.
    pub fn from_freeze_seconds(seconds: u64) -> Self {
        if seconds == 0 {
            Self::live()
        } else {
            Self::frozen(seconds as f64 * 1000.0)
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    pub fn now_ms(&self) -> f64 {
        match self.frozen {
            Some(ms) => ms,
            None => self.start.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::live()
    }
}

/// One timed frame: how long `render` took and what it drew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    pub duration: Duration,
    pub stats: FrameStats,
}

/// Rolling window over the most recent rendered frames.
#[derive(Debug)]
pub struct FrameTimer {
    window: usize,
    samples: VecDeque<FrameSample>,
}

impl FrameTimer {
    /// Keep the last `window` frames (at least one).
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            samples: VecDeque::with_capacity(window),
        }
    }

    pub fn record(&mut self, duration: Duration, stats: FrameStats) {
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(FrameSample { duration, stats });
    }

    /// Time a frame produced by `render` and record it.
    pub fn time_frame(&mut self, render: impl FnOnce() -> FrameStats) -> FrameSample {
        let start = Instant::now();
        let stats = render();
        let sample = FrameSample {
            duration: start.elapsed(),
            stats,
        };
        self.record(sample.duration, sample.stats);
        sample
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn last(&self) -> Option<&FrameSample> {
        self.samples.back()
    }

    fn durations(&self) -> impl Iterator<Item = Duration> + '_ {
        self.samples.iter().map(|s| s.duration)
    }

    pub fn average(&self) -> Duration {
        match self.count() {
            0 => Duration::ZERO,
            n => self.durations().sum::<Duration>() / n as u32,
        }
    }

    pub fn min(&self) -> Duration {
        self.durations().min().unwrap_or_default()
    }

    pub fn max(&self) -> Duration {
        self.durations().max().unwrap_or_default()
    }

    /// Frames per second implied by the average; zero before any frame.
    pub fn fps(&self) -> f64 {
        let avg = self.average().as_secs_f64();
        if avg == 0.0 { 0.0 } else { 1.0 / avg }
    }

    /// Mean quads drawn per frame over the window.
    pub fn average_drawn(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let drawn: usize = self.samples.iter().map(|s| s.stats.quads_drawn).sum();
        drawn as f64 / self.samples.len() as f64
    }

    /// Fraction of all visited quads that were culled, in `[0, 1]`.
    pub fn cull_ratio(&self) -> f64 {
        let (culled, total) = self.samples.iter().fold((0, 0), |(c, t), s| {
            (c + s.stats.culled(), t + s.stats.culled() + s.stats.quads_drawn)
        });
        if total == 0 { 0.0 } else { culled as f64 / total as f64 }
    }
}
