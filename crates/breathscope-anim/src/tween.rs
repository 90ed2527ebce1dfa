//! A single numeric interpolation.

use crate::EasingFunction;

/// Tween state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TweenState {
    /// Waiting out its delay
    Delayed,
    /// Interpolating
    Running,
    /// Reached its end value
    Completed,
}

/// A time-driven interpolation of one value.
///
/// Built with [`Tween::to`]; the start value is optional; engines fill it
/// in from the property's current value when it is left unset.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    /// Start value, resolved by the engine when `None`
    from: Option<f32>,
    /// End value
    to: f32,
    /// Duration in seconds
    duration: f32,
    /// Elapsed time in seconds, excluding delay
    elapsed: f32,
    easing: EasingFunction,
    /// Delay before starting (seconds)
    delay: f32,
    delay_elapsed: f32,
    state: TweenState,
}

impl Tween {
    /// Create a tween towards `value`, one second long, linear.
    pub fn to(value: f32) -> Self {
        Self {
            from: None,
            to: value,
            duration: 1.0,
            elapsed: 0.0,
            easing: EasingFunction::Linear,
            delay: 0.0,
            delay_elapsed: 0.0,
            state: TweenState::Running,
        }
    }

    /// Set the start value.
    pub fn from(mut self, value: f32) -> Self {
        self.from = Some(value);
        self
    }

    /// Set the duration in seconds. Negative durations are treated as zero.
    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration.max(0.0);
        self
    }

    /// Set the easing function.
    pub fn easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Set delay before starting (seconds).
    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self.state = if self.delay > 0.0 {
            TweenState::Delayed
        } else {
            TweenState::Running
        };
        self
    }

    /// Fill in the start value if the caller left it unset.
    pub fn resolve_from(&mut self, current: f32) {
        if self.from.is_none() {
            self.from = Some(current);
        }
    }

    pub fn start_value(&self) -> Option<f32> {
        self.from
    }

    pub fn end_value(&self) -> f32 {
        self.to
    }

    /// Whether the delay has elapsed.
    pub fn is_started(&self) -> bool {
        self.state != TweenState::Delayed
    }

    /// Current interpolated value.
    pub fn value(&self) -> f32 {
        let from = self.from.unwrap_or(self.to);
        if !self.is_started() {
            return from;
        }
        let t = if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        from + (self.to - from) * self.easing.apply(t)
    }

    /// Advance by `delta_time` seconds.
    ///
    /// Time left over after the delay runs into the tween itself. Returns
    /// true while the tween is still running.
    pub fn update(&mut self, delta_time: f32) -> bool {
        let mut dt = delta_time.max(0.0);

        if self.state == TweenState::Completed {
            return false;
        }

        if self.state == TweenState::Delayed {
            let remaining = self.delay - self.delay_elapsed;
            if dt < remaining {
                self.delay_elapsed += dt;
                return true;
            }
            self.delay_elapsed = self.delay;
            dt -= remaining;
            self.state = TweenState::Running;
        }

        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.state = TweenState::Completed;
            return false;
        }

        true
    }
}
