//! # Breathscope
//!
//! A streaming dual-line temperature chart for a breath-rate dashboard.
//!
//! This crate re-exports the workspace crates under short names and adds
//! [`replay`], which drives a recorded session of endpoint payloads through
//! a [`Dashboard`](dashboard::Dashboard) and renders the settled chart.
//!
//! ## Crates
//!
//! - [`core`] - logging, profiling, clocks
//! - [`anim`] - easing, tweens and frame scheduling
//! - [`chart`] - the streaming chart renderer
//! - [`dashboard`] - payload decoding and readouts
//!
//! ## Quick Start
//!
//! ```
//! use breathscope::prelude::*;
//!
//! let mut registry = ContainerRegistry::new();
//! registry.create(CHART_SELECTOR, Vec2::new(400.0, CHART_HEIGHT));
//! let mut chart = StreamingChart::<SvgSurface>::attach(
//!     &registry,
//!     CHART_SELECTOR,
//!     ChartConfig::default(),
//!     Capabilities::immediate(),
//! )?;
//!
//! assert!(chart.add_data_point(24.0, 33.5).is_accepted());
//! assert_eq!(chart.get_data().len(), 1);
//! # Ok::<(), ConfigurationError>(())
//! ```

pub use breathscope_anim as anim;
pub use breathscope_chart as chart;
pub use breathscope_core as core;
pub use breathscope_dashboard as dashboard;

pub mod replay;

pub use replay::{ReplayOptions, ReplayReport, replay};

/// Prelude module for convenient imports
pub mod prelude {
    pub use breathscope_core::{Clock, ManualClock, SystemClock};

    pub use breathscope_anim::{
        EasingFunction, FrameQueue, FrameScheduler, ImmediateScheduler, ImmediateTweener, Tween,
        TweenEngine, Tweener,
    };

    pub use breathscope_chart::{
        Capabilities, ChartConfig, ChartData, ChartSurface, ConfigurationError, Container,
        ContainerRegistry, IngestOutcome, Lifecycle, Series, StreamingChart, SvgSurface,
    };

    pub use breathscope_dashboard::{
        CHART_HEIGHT, CHART_SELECTOR, Dashboard, Readout, dashboard_chart_config,
    };

    pub use glam::Vec2;
}
