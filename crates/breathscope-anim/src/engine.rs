//! The tweening capability and its two implementations.

use crate::{TargetId, Tween, TweenKey};
use breathscope_core::alloc::HashMap;
use breathscope_core::profiling::profile_function;

/// Handle of a started tween.
///
/// Task IDs are never reused within one tweener, so a consumer holding an
/// old ID can tell that an event belongs to a task it no longer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

/// What happened to a task during an [`Tweener::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenEventKind {
    /// The tween moved; carries the new value.
    Update(f32),
    /// The tween reached its end value.
    Complete(f32),
    /// Another tween or a `set` took over the same key.
    Superseded,
    /// The tween was killed explicitly.
    Cancelled,
}

/// Progress report for one task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenEvent {
    pub task: TaskId,
    pub key: TweenKey,
    pub kind: TweenEventKind,
}

impl TweenEvent {
    pub fn is_complete(&self) -> bool {
        matches!(self.kind, TweenEventKind::Complete(_))
    }
}

/// A host's tweening capability.
///
/// All methods are synchronous; time only moves inside [`Tweener::advance`],
/// which returns everything that happened since the previous call.
pub trait Tweener {
    /// Whether `to` actually interpolates over time. Callers use this to
    /// take a direct path instead of scheduling animations that would
    /// finish instantly anyway.
    fn is_animated(&self) -> bool;

    /// Apply a value immediately, superseding any tween on the key.
    fn set(&mut self, key: TweenKey, value: f32);

    /// Last known value of a key.
    fn value(&self, key: TweenKey) -> Option<f32>;

    /// Start a tween on a key, superseding any tween already running there.
    fn to(&mut self, key: TweenKey, tween: Tween) -> TaskId;

    /// Cancel the tween on a key. Returns the cancelled task, if any.
    fn kill(&mut self, key: TweenKey) -> Option<TaskId>;

    /// Cancel every tween on a target. Returns how many were cancelled.
    fn kill_target(&mut self, target: TargetId) -> usize;

    /// Whether a tween is in flight on a key.
    fn is_active(&self, key: TweenKey) -> bool;

    /// Number of tweens in flight.
    fn active_count(&self) -> usize;

    /// Advance time by `delta_time` seconds and collect events.
    ///
    /// Events left over from `set`/`to`/`kill` calls since the previous
    /// advance come first, then per-tween updates and completions ordered
    /// by task.
    fn advance(&mut self, delta_time: f32) -> Vec<TweenEvent>;
}

#[derive(Debug, Clone)]
struct ActiveTween {
    task: TaskId,
    tween: Tween,
}

/// Interpolating tween engine.
#[derive(Debug, Default)]
pub struct TweenEngine {
    next_task: u64,
    active: HashMap<TweenKey, ActiveTween>,
    values: HashMap<TweenKey, f32>,
    pending: Vec<TweenEvent>,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_task(&mut self) -> TaskId {
        let task = TaskId(self.next_task);
        self.next_task += 1;
        task
    }

    fn interrupt(&mut self, key: TweenKey, kind: TweenEventKind) -> Option<TaskId> {
        let removed = self.active.remove(&key)?;
        tracing::trace!(
            task = removed.task.0,
            property = ?key.property,
            kind = ?kind,
            "tween interrupted"
        );
        self.pending.push(TweenEvent {
            task: removed.task,
            key,
            kind,
        });
        Some(removed.task)
    }
}

impl Tweener for TweenEngine {
    fn is_animated(&self) -> bool {
        true
    }

    fn set(&mut self, key: TweenKey, value: f32) {
        self.interrupt(key, TweenEventKind::Superseded);
        self.values.insert(key, value);
    }

    fn value(&self, key: TweenKey) -> Option<f32> {
        self.values.get(&key).copied()
    }

    fn to(&mut self, key: TweenKey, mut tween: Tween) -> TaskId {
        self.interrupt(key, TweenEventKind::Superseded);

        let current = self.values.get(&key).copied().unwrap_or(tween.end_value());
        tween.resolve_from(current);
        if let Some(start) = tween.start_value() {
            self.values.insert(key, start);
        }

        let task = self.allocate_task();
        self.active.insert(key, ActiveTween { task, tween });
        task
    }

    fn kill(&mut self, key: TweenKey) -> Option<TaskId> {
        self.interrupt(key, TweenEventKind::Cancelled)
    }

    fn kill_target(&mut self, target: TargetId) -> usize {
        let keys: Vec<TweenKey> = self
            .active
            .keys()
            .filter(|key| key.target == target)
            .copied()
            .collect();
        for key in &keys {
            self.interrupt(*key, TweenEventKind::Cancelled);
        }
        keys.len()
    }

    fn is_active(&self, key: TweenKey) -> bool {
        self.active.contains_key(&key)
    }

    fn active_count(&self) -> usize {
        self.active.len()
    }

    fn advance(&mut self, delta_time: f32) -> Vec<TweenEvent> {
        profile_function!();

        let mut events = std::mem::take(&mut self.pending);
        let mut ticked = Vec::with_capacity(self.active.len());
        let mut finished = Vec::new();

        for (key, active) in self.active.iter_mut() {
            let running = active.tween.update(delta_time);
            let value = active.tween.value();
            self.values.insert(*key, value);

            if running {
                if active.tween.is_started() {
                    ticked.push(TweenEvent {
                        task: active.task,
                        key: *key,
                        kind: TweenEventKind::Update(value),
                    });
                }
            } else {
                finished.push(*key);
                ticked.push(TweenEvent {
                    task: active.task,
                    key: *key,
                    kind: TweenEventKind::Complete(value),
                });
            }
        }

        for key in finished {
            self.active.remove(&key);
        }

        ticked.sort_by_key(|event| event.task);
        events.extend(ticked);
        events
    }
}

/// Tweener for hosts without animation support.
///
/// `to` jumps straight to the end value; the completion is still reported
/// on the next `advance` so code waiting on a task behaves the same.
#[derive(Debug, Default)]
pub struct ImmediateTweener {
    next_task: u64,
    values: HashMap<TweenKey, f32>,
    pending: Vec<TweenEvent>,
}

impl ImmediateTweener {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tweener for ImmediateTweener {
    fn is_animated(&self) -> bool {
        false
    }

    fn set(&mut self, key: TweenKey, value: f32) {
        self.values.insert(key, value);
    }

    fn value(&self, key: TweenKey) -> Option<f32> {
        self.values.get(&key).copied()
    }

    fn to(&mut self, key: TweenKey, tween: Tween) -> TaskId {
        let task = TaskId(self.next_task);
        self.next_task += 1;
        let value = tween.end_value();
        self.values.insert(key, value);
        self.pending.push(TweenEvent {
            task,
            key,
            kind: TweenEventKind::Complete(value),
        });
        task
    }

    fn kill(&mut self, _key: TweenKey) -> Option<TaskId> {
        None
    }

    fn kill_target(&mut self, _target: TargetId) -> usize {
        0
    }

    fn is_active(&self, _key: TweenKey) -> bool {
        false
    }

    fn active_count(&self) -> usize {
        0
    }

    fn advance(&mut self, _delta_time: f32) -> Vec<TweenEvent> {
        std::mem::take(&mut self.pending)
    }
}
