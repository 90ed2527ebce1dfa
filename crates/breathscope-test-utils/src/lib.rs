//! Test utilities for breathscope.
//!
//! - [`MockSurface`] - a [`ChartSurface`] that records every call
//! - [`parse_path_data`] - read SVG path data back into points
//!
//! # Example
//!
//! ```rust
//! use breathscope_chart::{Capabilities, ChartConfig, ContainerRegistry, StreamingChart};
//! use breathscope_test_utils::MockSurface;
//! use glam::Vec2;
//!
//! let mut registry = ContainerRegistry::new();
//! registry.create("#chart", Vec2::new(400.0, 100.0));
//! let mut chart = StreamingChart::<MockSurface>::attach(
//!     &registry,
//!     "#chart",
//!     ChartConfig::default(),
//!     Capabilities::immediate(),
//! )
//! .unwrap();
//!
//! chart.add_data_point(20.0, 30.0);
//! assert_eq!(chart.surface().count_path_updates(), 2);
//! ```

pub mod mock_surface;

pub use mock_surface::*;
