//! Streaming dual-series chart renderer.
//!
//! [`StreamingChart`] keeps a bounded window of paired ambient/object
//! readings and draws them as two scrolling polylines on a
//! [`ChartSurface`]. Each accepted sample regenerates both paths; when the
//! host can tween, only the newest segment animates and everything before
//! it is drawn exactly.
//!
//! - [`config`] - options, defaults and validation
//! - [`window`] - the sample window and its snapshots
//! - [`mapping`] - value range and coordinate normalisation
//! - [`path`] - polyline paths and SVG path data
//! - [`surface`] - the surface trait, containers and their registry
//! - [`svg`] - the in-memory SVG surface
//! - [`capabilities`] - injected tweening, frame scheduling and clock
//! - [`renderer`] - the chart itself

pub mod capabilities;
pub mod config;
pub mod error;
pub mod mapping;
pub mod path;
pub mod renderer;
pub mod style;
pub mod surface;
pub mod svg;
pub mod window;

pub use capabilities::{Capabilities, ChartJob};
pub use config::ChartConfig;
pub use error::{ChartResult, ConfigurationError};
pub use mapping::{PointMapper, RenderState};
pub use path::{Path, PathBuilder, PathCommand};
pub use renderer::{IngestOutcome, Lifecycle, RejectReason, StreamingChart};
pub use style::{ChartStyle, GradientStop, SeriesStyle};
pub use surface::{ChartSurface, Container, ContainerRegistry, Layer, Series};
pub use svg::SvgSurface;
pub use window::{ChartData, RingBuffer, Sample, SampleWindow};
