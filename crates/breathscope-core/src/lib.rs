//! Breathscope Core
//!
//! Shared plumbing for the breathscope crates: logging setup, profiling
//! hooks, hash collection aliases and the monotonic clocks the chart uses
//! to timestamp and throttle samples.

pub mod alloc;
pub mod clock;
pub mod logging;
pub mod profiling;

pub use clock::{Clock, ManualClock, SystemClock};
