//! Hash collections backed by AHash.
//!
//! Tween bookkeeping and container lookup are keyed by small integer or
//! string ids, where AHash beats SipHash comfortably.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
