//! Sample window for illuminance smoothing
//!
//! A fixed-capacity ring buffer. Once full, each push overwrites the oldest
//! sample, so a warm window always averages exactly the last `capacity` readings.

/// Fixed-capacity circular buffer of illuminance samples
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: Vec<u32>,
    capacity: usize,
    /// Slot the next push writes to
    next: usize,
}

impl SampleWindow {
    /// Create an empty window holding up to `capacity` samples
    ///
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            next: 0,
        }
    }

    /// Insert a sample, overwriting the oldest one once the window is full
    pub fn push(&mut self, sample: u32) {
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
        } else {
            self.samples[self.next] = sample;
        }
        self.next = (self.next + 1) % self.capacity;
    }

    /// Integer mean of the held samples, `None` before the first push
    pub fn average(&self) -> Option<u32> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: u64 = self.samples.iter().map(|&s| u64::from(s)).sum();
        Some((sum / self.samples.len() as u64) as u32)
    }

    /// Whether the window has been filled at least once
    pub fn is_warm(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
