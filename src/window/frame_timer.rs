use std::collections::VecDeque;

/// Number of frame deltas the FPS estimate averages over.
pub const FPS_SAMPLES: usize = 60;

/// Delta-time source plus a rolling FPS estimate over the last
/// `FPS_SAMPLES` frames. Timestamps are seconds from any monotonic clock.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last: Option<f64>,
    samples: VecDeque<f64>
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frame boundary at `now` and returns the time since the
    /// previous one. The first call returns 0 and adds no sample.
    pub fn tick(&mut self, now: f64) -> f64 {
        let delta = match self.last {
            Some(last) => (now - last).max(0.0),
            None => {
                self.last = Some(now);
                return 0.0
            }
        };
        self.last = Some(now);

        if self.samples.len() == FPS_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(delta);

        delta
    }

    /// Reciprocal of the mean sampled delta, 0 until a non-zero delta exists.
    pub fn fps(&self) -> f64 {
        let total: f64 = self.samples.iter().sum();
        if total <= 0.0 {
            return 0.0
        }

        self.samples.len() as f64 / total
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}
