//! Value range and coordinate normalization.
//!
//! Samples map from (index, value) to surface coordinates:
//!
//! ```text
//! x = index / (capacity - 1) * width
//! y = height - (value - min) / range * height * 0.7 - height * 0.15
//! ```
//!
//! so data occupies the central 70% of the height with 15% margins above
//! and below, and the newest sample of a full window sits on the right edge.

use crate::window::SampleWindow;
use glam::Vec2;

/// Fraction of the height kept free above and below the data.
pub const VERTICAL_MARGIN: f64 = 0.15;
/// Fraction of the height the data spans.
pub const PLOT_FRACTION: f64 = 0.7;

/// Value range over both series of the window.
///
/// `range` is always strictly positive: a flat window gets a range of 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub min_value: f64,
    pub max_value: f64,
    pub range: f64,
}

impl Default for RenderState {
    /// The range of an empty window.
    fn default() -> Self {
        Self {
            min_value: 0.0,
            max_value: 1.0,
            range: 1.0,
        }
    }
}

impl RenderState {
    /// Compute the range of a set of values.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut min_value = f64::INFINITY;
        let mut max_value = f64::NEG_INFINITY;
        let mut any = false;

        for value in values {
            min_value = min_value.min(value);
            max_value = max_value.max(value);
            any = true;
        }

        if !any {
            return Self::default();
        }

        let mut range = max_value - min_value;
        if range <= 0.0 || !range.is_finite() {
            range = 1.0;
        }

        Self {
            min_value,
            max_value,
            range,
        }
    }

    /// Range over the union of both series currently in the window.
    pub fn from_window(window: &SampleWindow) -> Self {
        Self::from_values(window.values())
    }
}

/// Number of leading samples pushed off the left edge.
///
/// Zero whenever the window respects its capacity, which it always does;
/// kept so the mapping stays correct if the two ever disagree.
pub fn scroll_offset(len: usize, capacity: usize) -> usize {
    len.saturating_sub(capacity)
}

/// Maps window positions and values to surface coordinates for one update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMapper {
    capacity: usize,
    width: f64,
    height: f64,
    min_value: f64,
    range: f64,
}

impl PointMapper {
    /// `capacity` must be at least 2; chart configuration guarantees it.
    pub fn new(state: &RenderState, capacity: usize, size: Vec2) -> Self {
        Self {
            capacity,
            width: f64::from(size.x),
            height: f64::from(size.y),
            min_value: state.min_value,
            range: state.range,
        }
    }

    /// Horizontal position of the sample at `adjusted_index`.
    pub fn x(&self, adjusted_index: usize) -> f32 {
        let span = (self.capacity.max(2) - 1) as f64;
        (adjusted_index as f64 / span * self.width) as f32
    }

    /// Vertical position of a value.
    pub fn y(&self, value: f64) -> f32 {
        let normalized = (value - self.min_value) / self.range;
        (self.height - normalized * self.height * PLOT_FRACTION - self.height * VERTICAL_MARGIN)
            as f32
    }

    pub fn map(&self, adjusted_index: usize, value: f64) -> Vec2 {
        Vec2::new(self.x(adjusted_index), self.y(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::Sample;
    use std::time::Duration;

    fn window_of(pairs: &[(f64, f64)], capacity: usize) -> SampleWindow {
        let mut window = SampleWindow::new(capacity);
        for (ambient, object) in pairs {
            window.push(Sample::new(*ambient, *object, Duration::ZERO));
        }
        window
    }

    #[test]
    fn test_empty_window_range() {
        let state = RenderState::from_window(&SampleWindow::new(4));
        assert_eq!(state, RenderState::default());
    }

    #[test]
    fn test_flat_window_range_forced_to_one() {
        let window = window_of(&[(25.0, 25.0), (25.0, 25.0), (25.0, 25.0)], 4);
        let state = RenderState::from_window(&window);
        assert_eq!(state.min_value, 25.0);
        assert_eq!(state.max_value, 25.0);
        assert_eq!(state.range, 1.0);

        let mapper = PointMapper::new(&state, 4, Vec2::new(300.0, 100.0));
        for i in 0..3 {
            let p = mapper.map(i, 25.0);
            assert!(p.x.is_finite() && p.y.is_finite());
        }
    }

    #[test]
    fn test_range_spans_both_series() {
        let window = window_of(&[(21.0, 31.0), (22.0, 34.0), (23.0, 35.0)], 3);
        let state = RenderState::from_window(&window);
        assert_eq!(state.min_value, 21.0);
        assert_eq!(state.max_value, 35.0);
        assert_eq!(state.range, 14.0);
    }

    #[test]
    fn test_mapping_margins() {
        let state = RenderState {
            min_value: 10.0,
            max_value: 20.0,
            range: 10.0,
        };
        let mapper = PointMapper::new(&state, 5, Vec2::new(400.0, 200.0));

        // min value sits on the bottom margin, max value on the top margin
        assert!((mapper.y(10.0) - 170.0).abs() < 1e-4);
        assert!((mapper.y(20.0) - 30.0).abs() < 1e-4);
        assert!((mapper.y(15.0) - 100.0).abs() < 1e-4);

        assert_eq!(mapper.x(0), 0.0);
        assert_eq!(mapper.x(2), 200.0);
        assert_eq!(mapper.x(4), 400.0);
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(3, 5), 0);
        assert_eq!(scroll_offset(5, 5), 0);
        assert_eq!(scroll_offset(7, 5), 2);
    }
}
