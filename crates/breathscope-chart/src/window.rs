//! The bounded sample window backing the chart.
//!
//! - `RingBuffer<T>` - fixed-capacity FIFO with O(1) push and eviction
//! - `Sample` - one paired reading of both series
//! - `SampleWindow` - the chart's window of samples
//! - `ChartData` - an owned snapshot handed to callers

use std::time::Duration;

/// Fixed-capacity circular buffer.
///
/// Pushing into a full buffer evicts the oldest element, so the buffer
/// always holds the most recent `capacity` items in insertion order.
///
/// ```ignore
/// let mut buffer = RingBuffer::<f64>::new(3);
/// for i in 0..5 {
///     buffer.push(i as f64);
/// }
/// assert_eq!(buffer.to_vec(), vec![2.0, 3.0, 4.0]);
/// ```
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    data: Vec<T>,
    capacity: usize,
    /// Slot the next push writes to
    write_pos: usize,
    len: usize,
}

impl<T: Clone + Default> RingBuffer<T> {
    /// Create a new ring buffer with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if capacity is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RingBuffer capacity must be > 0");
        Self {
            data: vec![T::default(); capacity],
            capacity,
            write_pos: 0,
            len: 0,
        }
    }

    /// Push an item, returning the evicted oldest item when full.
    #[inline]
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.len == self.capacity {
            Some(std::mem::replace(&mut self.data[self.write_pos], item))
        } else {
            self.data[self.write_pos] = item;
            None
        };
        self.write_pos = (self.write_pos + 1) % self.capacity;
        self.len = (self.len + 1).min(self.capacity);
        evicted
    }

    /// Get an item by logical index (0 = oldest item).
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        Some(&self.data[(self.start() + index) % self.capacity])
    }

    /// Physical slot of the oldest element.
    #[inline]
    fn start(&self) -> usize {
        (self.write_pos + self.capacity - self.len) % self.capacity
    }

    /// The most recently pushed item.
    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.len = 0;
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        let start = self.start();
        (0..self.len).map(move |i| &self.data[(start + i) % self.capacity])
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

/// One paired reading: ambient and object temperature captured together.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    pub ambient: f64,
    pub object: f64,
    /// Monotonic capture time, as reported by the chart's clock.
    pub captured_at: Duration,
}

impl Sample {
    pub fn new(ambient: f64, object: f64, captured_at: Duration) -> Self {
        Self {
            ambient,
            object,
            captured_at,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.ambient.is_finite() && self.object.is_finite()
    }
}

/// Owned copy of the window as three parallel series.
///
/// Returned by value, so nothing a caller does to it reaches the chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub ambient_series: Vec<f64>,
    pub object_series: Vec<f64>,
    pub timestamps: Vec<Duration>,
}

impl ChartData {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// The chart's sliding window of samples.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: RingBuffer<Sample>,
}

impl SampleWindow {
    /// # Panics
    ///
    /// Panics if capacity is 0; configuration validation rules that out.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: RingBuffer::new(capacity),
        }
    }

    /// Append a sample, returning the evicted oldest one when full.
    pub fn push(&mut self, sample: Sample) -> Option<Sample> {
        self.samples.push(sample)
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Sample> + '_ {
        self.samples.iter()
    }

    /// Every value of both series, ambient first.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter()
            .map(|s| s.ambient)
            .chain(self.iter().map(|s| s.object))
    }

    pub fn snapshot(&self) -> ChartData {
        let mut data = ChartData {
            ambient_series: Vec::with_capacity(self.len()),
            object_series: Vec::with_capacity(self.len()),
            timestamps: Vec::with_capacity(self.len()),
        };
        for sample in self.iter() {
            data.ambient_series.push(sample.ambient);
            data.object_series.push(sample.object);
            data.timestamps.push(sample.captured_at);
        }
        data
    }
}
