//! Animated numeric text readouts.

use breathscope_anim::{
    EasingFunction, Property, TargetId, TaskId, Tween, TweenEvent, TweenEventKind, TweenKey,
    Tweener,
};

/// Duration of the text reveal (seconds).
pub const REVEAL_DURATION: f32 = 0.3;

/// Text shown before the first value arrives.
pub const PLACEHOLDER: &str = "--";

/// Text part-way from `from` to `to`: the first `progress` share of `to`,
/// followed by whatever of `from` it has not yet overwritten.
pub fn reveal(from: &str, to: &str, progress: f32) -> String {
    if progress >= 1.0 {
        return to.to_string();
    }
    let to_chars: Vec<char> = to.chars().collect();
    let shown = ((to_chars.len() as f32) * progress.max(0.0)).round() as usize;
    let mut text: String = to_chars[..shown.min(to_chars.len())].iter().collect();
    text.extend(from.chars().skip(shown));
    text
}

/// A text value whose changes are revealed with a short tween.
///
/// Setting a new value while a reveal is running supersedes it; the new
/// reveal starts from whatever text is showing.
#[derive(Debug, Clone)]
pub struct Readout {
    name: String,
    target: TargetId,
    text: String,
    from: String,
    value: String,
    task: Option<TaskId>,
}

impl Readout {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            target: TargetId::new(name),
            text: PLACEHOLDER.to_string(),
            from: PLACEHOLDER.to_string(),
            value: PLACEHOLDER.to_string(),
            task: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text currently displayed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text the readout is settling on.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_animating(&self) -> bool {
        self.task.is_some()
    }

    fn key(&self) -> TweenKey {
        TweenKey::new(self.target, Property::TextReveal)
    }

    /// Show `value`, revealing it when the tweener animates.
    ///
    /// The comparison is against the text on display, so a value re-sent
    /// while its reveal is still running starts a fresh reveal. Returns false
    /// when `value` is already displayed; a reveal heading elsewhere is
    /// stopped so the display stays on it.
    pub fn set(&mut self, tweener: &mut dyn Tweener, value: &str) -> bool {
        if self.text == value {
            if self.task.take().is_some() {
                tweener.kill(self.key());
            }
            self.from = self.text.clone();
            self.value = self.text.clone();
            return false;
        }
        self.value = value.to_string();

        if tweener.is_animated() {
            self.from = self.text.clone();
            let task = tweener.to(
                self.key(),
                Tween::to(1.0)
                    .from(0.0)
                    .duration(REVEAL_DURATION)
                    .easing(EasingFunction::QuadOut),
            );
            self.task = Some(task);
        } else {
            self.task = None;
            self.text = self.value.clone();
        }
        true
    }

    /// Apply a tween event. Returns true if the event belonged to this
    /// readout's running reveal.
    pub fn apply(&mut self, event: &TweenEvent) -> bool {
        if event.key != self.key() || self.task != Some(event.task) {
            return false;
        }
        match event.kind {
            TweenEventKind::Update(progress) => {
                self.text = reveal(&self.from, &self.value, progress);
            }
            TweenEventKind::Complete(_) => {
                self.text = self.value.clone();
                self.task = None;
            }
            TweenEventKind::Superseded | TweenEventKind::Cancelled => {
                self.task = None;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breathscope_anim::{ImmediateTweener, TweenEngine};

    #[test]
    fn test_reveal_progress() {
        assert_eq!(reveal("--", "36.5", 0.0), "--");
        assert_eq!(reveal("--", "36.5", 0.5), "36");
        assert_eq!(reveal("24.1", "24.9", 0.75), "24.1");
        assert_eq!(reveal("120", "8", 0.5), "820");
        assert_eq!(reveal("--", "36.5", 1.0), "36.5");
    }

    #[test]
    fn test_direct_set_without_tweening() {
        let mut tweener = ImmediateTweener::new();
        let mut readout = Readout::new("roomTemp");
        assert!(readout.set(&mut tweener, "24.3"));
        assert_eq!(readout.text(), "24.3");
        assert!(!readout.is_animating());
        assert!(!readout.set(&mut tweener, "24.3"));
    }

    #[test]
    fn test_reveal_supersedes_running_reveal() {
        let mut tweener = TweenEngine::new();
        let mut readout = Readout::new("breathRate");

        readout.set(&mut tweener, "14.0");
        for event in tweener.advance(0.1) {
            readout.apply(&event);
        }
        let partial = readout.text().to_string();
        assert_ne!(partial, "14.0");

        readout.set(&mut tweener, "15.5");
        let events = tweener.advance(0.5);
        assert!(events.iter().any(|e| e.kind == TweenEventKind::Superseded));
        for event in &events {
            readout.apply(event);
        }
        assert_eq!(readout.text(), "15.5");
        assert!(!readout.is_animating());
    }

    #[test]
    fn test_same_value_mid_reveal_restarts_reveal() {
        let mut tweener = TweenEngine::new();
        let mut readout = Readout::new("samplingRate");

        readout.set(&mut tweener, "120");
        for event in tweener.advance(0.05) {
            readout.apply(&event);
        }
        assert_ne!(readout.text(), "120");

        assert!(readout.set(&mut tweener, "120"));
        let events = tweener.advance(0.5);
        assert!(events.iter().any(|e| e.kind == TweenEventKind::Superseded));
        for event in &events {
            readout.apply(event);
        }
        assert_eq!(readout.text(), "120");
        assert!(!readout.is_animating());
    }

    #[test]
    fn test_displayed_value_stops_reveal_heading_elsewhere() {
        let mut tweener = TweenEngine::new();
        let mut readout = Readout::new("breathRate");

        readout.set(&mut tweener, "14.0");
        assert_eq!(readout.text(), PLACEHOLDER);
        assert!(!readout.set(&mut tweener, PLACEHOLDER));
        assert!(!readout.is_animating());

        for event in tweener.advance(1.0) {
            assert!(!readout.apply(&event));
        }
        assert_eq!(readout.text(), PLACEHOLDER);
        assert_eq!(readout.value(), PLACEHOLDER);
    }

    #[test]
    fn test_foreign_events_are_ignored() {
        let mut tweener = TweenEngine::new();
        let mut room = Readout::new("roomTemp");
        let mut rate = Readout::new("samplingRate");
        room.set(&mut tweener, "24.0");
        rate.set(&mut tweener, "120");

        let events = tweener.advance(1.0);
        assert_eq!(events.iter().filter(|e| room.apply(e)).count(), 1);
        assert_eq!(room.text(), "24.0");
        assert_eq!(rate.text(), PLACEHOLDER);
    }
}
