//! Breathscope animation capabilities.
//!
//! Two optional host capabilities live here, each behind a trait with a
//! do-nothing default so consumers pick an implementation once, at
//! construction, instead of probing for support at every call site:
//!
//! - [`Tweener`]: time-driven interpolation of numeric properties.
//!   [`TweenEngine`] interpolates; [`ImmediateTweener`] jumps straight to
//!   the end value.
//! - [`FrameScheduler`]: "run before next paint". [`FrameQueue`] defers
//!   work to the next frame; [`ImmediateScheduler`] runs it synchronously.
//!
//! Completion is reported as [`TweenEvent`]s returned from
//! [`Tweener::advance`] rather than through callbacks:
//!
//! ```
//! use breathscope_anim::*;
//!
//! let mut engine = TweenEngine::new();
//! let key = TweenKey::new(TargetId::new("ambient"), Property::Opacity);
//! engine.set(key, 0.0);
//! let task = engine.to(key, Tween::to(1.0).duration(0.3).easing(EasingFunction::CubicOut));
//!
//! let events = engine.advance(0.3);
//! assert!(events.iter().any(|e| e.task == task && e.is_complete()));
//! assert_eq!(engine.value(key), Some(1.0));
//! ```

mod easing;
mod engine;
mod frame;
mod target;
mod tween;

pub use easing::*;
pub use engine::*;
pub use frame::*;
pub use target::*;
pub use tween::*;
