use std::collections::VecDeque;

pub const DEFAULT_FPS_CAPACITY: usize = 201;

/// Sliding window of frames-per-second samples with running statistics.
#[derive(Clone, Debug)]
pub struct FpsTracker {
    capacity: usize,
    samples: VecDeque<f64>,
    sum: f64,
    min: f64,
    max: f64,
}

impl Default for FpsTracker {
    fn default() -> Self {
        Self::new(DEFAULT_FPS_CAPACITY)
    }
}

impl FpsTracker {
    /// `capacity` is raised to at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Record a sample; non-finite and non-positive values are ignored.
    pub fn push(&mut self, fps: f64) {
        if !fps.is_finite() || fps <= 0.0 {
            return;
        }
        let mut rescan = false;
        if self.samples.len() == self.capacity
            && let Some(old) = self.samples.pop_front()
        {
            self.sum -= old;
            rescan = old <= self.min || old >= self.max;
        }
        self.samples.push_back(fps);
        self.sum += fps;
        if rescan {
            self.recompute_bounds();
        } else {
            self.min = self.min.min(fps);
            self.max = self.max.max(fps);
        }
    }

    /// Record the rate implied by a frame delta in seconds.
    pub fn push_delta(&mut self, delta: f64) {
        if delta > 0.0 {
            self.push(1.0 / delta);
        }
    }

    fn recompute_bounds(&mut self) {
        self.min = self.samples.iter().copied().fold(f64::INFINITY, f64::min);
        self.max = self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        self.sum = self.samples.iter().sum();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn average(&self) -> Option<f64> {
        if self.samples.is_empty() {
            None
        } else {
            Some(self.sum / self.samples.len() as f64)
        }
    }

    pub fn min(&self) -> Option<f64> {
        (!self.samples.is_empty()).then_some(self.min)
    }

    pub fn max(&self) -> Option<f64> {
        (!self.samples.is_empty()).then_some(self.max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/fps.rs"]
mod tests;
