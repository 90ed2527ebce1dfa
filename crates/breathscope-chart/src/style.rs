//! Visual style of the two series.

use serde::{Deserialize, Serialize};

/// One stop of the horizontal "meteor tail" gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the chart width, 0.0 (left) to 1.0 (right).
    pub offset: f32,
    /// Stroke opacity at this position.
    pub opacity: f32,
}

impl GradientStop {
    pub const fn new(offset: f32, opacity: f32) -> Self {
        Self { offset, opacity }
    }
}

/// Stroke style of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesStyle {
    /// CSS colour of the stroke.
    pub color: String,
    /// Stroke width in surface units.
    pub stroke_width: f32,
}

impl SeriesStyle {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            stroke_width: 2.0,
        }
    }
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self::new("#999999")
    }
}

/// Style for the whole chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub ambient: SeriesStyle,
    pub object: SeriesStyle,
    /// Gradient applied to both strokes; older samples fade out to the left.
    pub tail: Vec<GradientStop>,
}

impl ChartStyle {
    /// The default tail: invisible at the left edge, fully opaque at the head.
    pub fn default_tail() -> Vec<GradientStop> {
        vec![
            GradientStop::new(0.0, 0.0),
            GradientStop::new(0.7, 0.3),
            GradientStop::new(0.9, 0.8),
            GradientStop::new(1.0, 1.0),
        ]
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            ambient: SeriesStyle::new("#999999"),
            object: SeriesStyle::new("#ff8c00"),
            tail: Self::default_tail(),
        }
    }
}
