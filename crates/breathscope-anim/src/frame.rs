//! "Run before next paint" scheduling.

/// Outcome of [`FrameScheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduled {
    /// No frame synchronisation; the caller must run the job right away.
    Now,
    /// Queued until the host's next frame; collect it with
    /// [`FrameScheduler::drain`].
    Deferred,
}

/// A host's frame-scheduling capability, generic over the job type the
/// consumer wants deferred.
pub trait FrameScheduler<J> {
    /// Offer a job for the next frame.
    fn schedule(&mut self, job: J) -> Scheduled;

    /// Take every job due this frame, in scheduling order.
    fn drain(&mut self) -> Vec<J>;

    /// Whether jobs are waiting for a frame.
    fn has_pending(&self) -> bool;

    /// Drop queued jobs without running them.
    fn cancel_all(&mut self);
}

/// Scheduler for hosts without frame synchronisation: everything runs now.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl<J> FrameScheduler<J> for ImmediateScheduler {
    fn schedule(&mut self, _job: J) -> Scheduled {
        Scheduled::Now
    }

    fn drain(&mut self) -> Vec<J> {
        Vec::new()
    }

    fn has_pending(&self) -> bool {
        false
    }

    fn cancel_all(&mut self) {}
}

/// Defers jobs to the next frame.
///
/// Scheduling a job equal to one already queued is a no-op, so a burst of
/// requests between two frames runs the job once.
#[derive(Debug, Clone)]
pub struct FrameQueue<J> {
    pending: Vec<J>,
}

impl<J> FrameQueue<J> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<J> Default for FrameQueue<J> {
    fn default() -> Self {
        Self::new()
    }
}

impl<J: PartialEq> FrameScheduler<J> for FrameQueue<J> {
    fn schedule(&mut self, job: J) -> Scheduled {
        if !self.pending.contains(&job) {
            self.pending.push(job);
        }
        Scheduled::Deferred
    }

    fn drain(&mut self) -> Vec<J> {
        std::mem::take(&mut self.pending)
    }

    fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn cancel_all(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Job {
        Redraw,
        Flush,
    }

    #[test]
    fn test_immediate_runs_now() {
        let mut scheduler = ImmediateScheduler;
        assert_eq!(scheduler.schedule(Job::Redraw), Scheduled::Now);
        assert!(!FrameScheduler::<Job>::has_pending(&scheduler));
    }

    #[test]
    fn test_queue_coalesces() {
        let mut queue = FrameQueue::new();
        assert_eq!(queue.schedule(Job::Redraw), Scheduled::Deferred);
        queue.schedule(Job::Redraw);
        queue.schedule(Job::Flush);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain(), vec![Job::Redraw, Job::Flush]);
        assert!(queue.is_empty());
    }
}
