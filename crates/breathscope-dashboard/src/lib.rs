//! The breath-rate dashboard.
//!
//! Payloads from the sensor endpoint are decoded by [`protocol`] and fed to
//! a [`Dashboard`], which forwards temperatures to its streaming chart and
//! shows breath rate, room temperature and sampling rate in animated
//! [`Readout`]s.
//!
//! ```
//! use breathscope_anim::ImmediateTweener;
//! use breathscope_chart::{Capabilities, ContainerRegistry, StreamingChart, SvgSurface};
//! use breathscope_dashboard::*;
//! use glam::Vec2;
//!
//! let mut registry = ContainerRegistry::new();
//! registry.create(CHART_SELECTOR, Vec2::new(800.0, CHART_HEIGHT));
//! let chart = StreamingChart::<SvgSurface>::attach(
//!     &registry,
//!     CHART_SELECTOR,
//!     dashboard_chart_config(),
//!     Capabilities::immediate(),
//! )?;
//! let mut dashboard = Dashboard::new(chart, Box::new(ImmediateTweener::new()));
//!
//! dashboard.handle_payload(r#"{"ambient_temp":24.31,"object_temp":33.9,"sampling_interval":500}"#)?;
//! dashboard.handle_payload(r#"{"breath_rate":null}"#)?;
//!
//! assert_eq!(dashboard.room_temp().text(), "24.3");
//! assert_eq!(dashboard.sampling_rate().text(), "120");
//! assert_eq!(dashboard.breath_rate().text(), "--");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod dashboard;
pub mod protocol;
pub mod readout;

pub use dashboard::{CHART_HEIGHT, CHART_SELECTOR, Dashboard, dashboard_chart_config};
pub use protocol::{
    BreathRate, DashboardUpdate, ProtocolError, ProtocolResult, SensorReading, Temperatures,
    decode_payload,
};
pub use readout::{PLACEHOLDER, Readout, reveal};
