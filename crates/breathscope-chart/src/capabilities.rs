//! Host capabilities injected into a chart at construction.

use breathscope_anim::{
    FrameQueue, FrameScheduler, ImmediateScheduler, ImmediateTweener, TweenEngine, Tweener,
};
use breathscope_core::{Clock, SystemClock};

/// Work a chart defers to the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartJob {
    /// Regenerate both series' paths from the window.
    UpdatePaths,
}

/// The optional host capabilities a chart runs with.
///
/// Chosen once; the chart never probes for support afterwards.
pub struct Capabilities {
    pub tweener: Box<dyn Tweener>,
    pub scheduler: Box<dyn FrameScheduler<ChartJob>>,
    pub clock: Box<dyn Clock>,
}

impl Capabilities {
    /// No tweening and no frame synchronisation: every change is applied
    /// synchronously.
    pub fn immediate() -> Self {
        Self {
            tweener: Box::new(ImmediateTweener::new()),
            scheduler: Box::new(ImmediateScheduler),
            clock: Box::new(SystemClock::new()),
        }
    }

    /// Interpolated tweens, with path updates deferred to the next frame.
    pub fn animated() -> Self {
        Self {
            tweener: Box::new(TweenEngine::new()),
            scheduler: Box::new(FrameQueue::new()),
            clock: Box::new(SystemClock::new()),
        }
    }

    pub fn with_tweener(mut self, tweener: impl Tweener + 'static) -> Self {
        self.tweener = Box::new(tweener);
        self
    }

    pub fn with_scheduler(mut self, scheduler: impl FrameScheduler<ChartJob> + 'static) -> Self {
        self.scheduler = Box::new(scheduler);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::immediate()
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("animated", &self.tweener.is_animated())
            .field("pending_jobs", &self.scheduler.has_pending())
            .field("now", &self.clock.now())
            .finish()
    }
}
