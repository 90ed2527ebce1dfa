//! Chart configuration.
//!
//! `ChartConfig` deserialises from the same options object the dashboard
//! front end has always passed (`maxDataPoints`, `updateInterval`, ...).
//! Keys it does not know are ignored.

use crate::error::{ChartResult, ConfigurationError};
use crate::style::ChartStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Window size at or below which the newest segment settles faster.
pub const SHORT_HISTORY_SAMPLES: usize = 5;
/// Segment tween duration while the window holds few samples (seconds).
pub const SHORT_HISTORY_DURATION: f32 = 0.15;
/// Fade in/out duration of the series paths (seconds).
pub const FADE_DURATION: f32 = 0.3;
/// Delay before the first-sample fade-in starts (seconds).
pub const FADE_IN_DELAY: f32 = 0.1;
/// Duration of the teardown animation (seconds).
pub const DESTROY_DURATION: f32 = 0.5;
/// Surface scale reached at the end of the teardown animation.
pub const DESTROY_SCALE: f32 = 0.8;

/// Options recognised by the streaming chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    /// Window capacity; also fixes the horizontal spacing of points.
    #[serde(alias = "max_data_points")]
    pub max_data_points: usize,
    /// Radius of the head marker drawn at each series' newest point.
    #[serde(alias = "marker_radius")]
    pub marker_radius: f32,
    /// Minimum spacing between accepted samples, in milliseconds.
    #[serde(rename = "updateInterval", alias = "update_interval")]
    pub update_interval_ms: u64,
    /// Duration of the newest-segment tween in seconds.
    #[serde(alias = "animation_duration")]
    pub animation_duration: f32,
    pub style: ChartStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_data_points: 400,
            marker_radius: 4.0,
            update_interval_ms: 150,
            animation_duration: 0.3,
            style: ChartStyle::default(),
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window capacity.
    pub fn with_max_data_points(mut self, max_data_points: usize) -> Self {
        self.max_data_points = max_data_points;
        self
    }

    /// Set the head marker radius.
    pub fn with_marker_radius(mut self, marker_radius: f32) -> Self {
        self.marker_radius = marker_radius;
        self
    }

    /// Set the minimum spacing between accepted samples.
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the newest-segment tween duration in seconds.
    pub fn with_animation_duration(mut self, seconds: f32) -> Self {
        self.animation_duration = seconds;
        self
    }

    /// Set the series style.
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }

    /// Segment tween duration for a window currently holding `len` samples.
    pub fn segment_duration(&self, len: usize) -> f32 {
        if len <= SHORT_HISTORY_SAMPLES {
            SHORT_HISTORY_DURATION
        } else {
            self.animation_duration
        }
    }

    /// Check every option against its accepted range.
    pub fn validate(&self) -> ChartResult<()> {
        if self.max_data_points < 2 {
            return Err(ConfigurationError::InvalidOption {
                option: "maxDataPoints",
                reason: format!("must be at least 2, got {}", self.max_data_points),
            });
        }
        if !self.animation_duration.is_finite() || self.animation_duration < 0.0 {
            return Err(ConfigurationError::InvalidOption {
                option: "animationDuration",
                reason: format!(
                    "must be a non-negative number of seconds, got {}",
                    self.animation_duration
                ),
            });
        }
        if !self.marker_radius.is_finite() || self.marker_radius < 0.0 {
            return Err(ConfigurationError::InvalidOption {
                option: "markerRadius",
                reason: format!("must be non-negative, got {}", self.marker_radius),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON options object.
    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON options file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ChartResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ChartConfig::default();
        assert_eq!(config.max_data_points, 400);
        assert_eq!(config.marker_radius, 4.0);
        assert_eq!(config.update_interval(), Duration::from_millis(150));
        assert_eq!(config.animation_duration, 0.3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_front_end_options_object() {
        let config = ChartConfig::from_json_str(
            r#"{
                "width": 640,
                "height": 200,
                "maxDataPoints": 100,
                "yMin": 20,
                "yMax": 40,
                "animationDuration": 0.3,
                "updateInterval": 100
            }"#,
        )
        .unwrap();
        assert_eq!(config.max_data_points, 100);
        assert_eq!(config.update_interval_ms, 100);
        assert_eq!(config.marker_radius, 4.0);
    }

    #[test]
    fn test_snake_case_aliases() {
        let config =
            ChartConfig::from_json_str(r#"{"max_data_points": 50, "update_interval": 10}"#)
                .unwrap();
        assert_eq!(config.max_data_points, 50);
        assert_eq!(config.update_interval_ms, 10);
    }

    #[test]
    fn test_capacity_below_two_rejected() {
        let err = ChartConfig::default()
            .with_max_data_points(1)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidOption {
                option: "maxDataPoints",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let result = ChartConfig::from_json_str(r#"{"animationDuration": -1.0}"#);
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidOption {
                option: "animationDuration",
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_json() {
        let result = ChartConfig::from_json_str("{ maxDataPoints: ");
        assert!(matches!(result, Err(ConfigurationError::Parse(_))));
    }

    #[test]
    fn test_segment_duration_short_history() {
        let config = ChartConfig::default().with_animation_duration(0.05);
        assert_eq!(config.segment_duration(2), SHORT_HISTORY_DURATION);
        assert_eq!(config.segment_duration(5), SHORT_HISTORY_DURATION);
        assert_eq!(config.segment_duration(6), 0.05);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"maxDataPoints": 3, "markerRadius": 2.5}}"#).unwrap();
        let config = ChartConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.max_data_points, 3);
        assert_eq!(config.marker_radius, 2.5);
    }

    #[test]
    fn test_missing_file() {
        let result = ChartConfig::from_json_file("/nonexistent/breathscope/chart.json");
        assert!(matches!(result, Err(ConfigurationError::Io { .. })));
    }
}
