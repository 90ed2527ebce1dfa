//! The streaming dual-series chart.
//!
//! Every accepted sample regenerates both series' paths from the window.
//! When tweening is available the newest segment eases in: everything up to
//! the previous point is drawn exactly, and only the y coordinate of the
//! final vertex moves until the tween completes and the exact path is set.

use crate::capabilities::{Capabilities, ChartJob};
use crate::config::{
    ChartConfig, DESTROY_DURATION, DESTROY_SCALE, FADE_DURATION, FADE_IN_DELAY,
};
use crate::error::{ChartResult, ConfigurationError};
use crate::mapping::{PointMapper, RenderState, scroll_offset};
use crate::path::Path;
use crate::surface::{ChartSurface, ContainerRegistry, Layer, Series};
use crate::window::{ChartData, Sample, SampleWindow};
use breathscope_anim::{
    EasingFunction, Property, Scheduled, TargetId, TaskId, Tween, TweenEvent, TweenEventKind,
    TweenKey,
};
use breathscope_core::profiling::{profile_function, profile_scope};
use glam::Vec2;

const AMBIENT_TARGET: TargetId = TargetId::new("chart.ambient");
const OBJECT_TARGET: TargetId = TargetId::new("chart.object");
const SURFACE_TARGET: TargetId = TargetId::new("chart.surface");

/// Easing of segment ticks and path fades.
const EASE_OUT: EasingFunction = EasingFunction::CubicOut;

fn series_target(series: Series) -> TargetId {
    match series {
        Series::Ambient => AMBIENT_TARGET,
        Series::Object => OBJECT_TARGET,
    }
}

fn series_of(target: TargetId) -> Option<Series> {
    Series::ALL
        .into_iter()
        .find(|series| series_target(*series) == target)
}

fn opacity_key(series: Series) -> TweenKey {
    TweenKey::new(series_target(series), Property::Opacity)
}

fn segment_key(series: Series) -> TweenKey {
    TweenKey::new(series_target(series), Property::SegmentY)
}

fn surface_key(property: Property) -> TweenKey {
    TweenKey::new(SURFACE_TARGET, property)
}

/// Why a sample was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// One of the values was NaN or infinite.
    NonFinite,
}

/// Result of [`StreamingChart::add_data_point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Stored in the window.
    Accepted,
    /// Arrived sooner than the update interval after the previous sample;
    /// dropped for good.
    Throttled,
    Rejected(RejectReason),
    /// The chart has been destroyed.
    Destroyed,
}

impl IngestOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, IngestOutcome::Accepted)
    }
}

/// Where the chart is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Live,
    /// Paths are fading out; the window empties when the fade completes.
    Clearing,
    /// The surface is animating out ahead of being detached.
    Destroying,
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Live,
    Destroying { task: TaskId },
    Destroyed,
}

/// In-flight tween of one series' newest segment.
#[derive(Debug, Clone)]
struct SegmentAnimation {
    task: TaskId,
    /// Path data through every point but the newest
    base: String,
    /// Exact path data, set on completion
    full: String,
    /// Final position of the newest point
    head: Vec2,
}

/// A scrolling two-series line chart over a bounded sample window.
///
/// # Example
///
/// ```
/// use breathscope_chart::*;
/// use glam::Vec2;
///
/// let mut registry = ContainerRegistry::new();
/// registry.create("#breathChart", Vec2::new(800.0, 200.0));
///
/// let mut chart = StreamingChart::<SvgSurface>::attach(
///     &registry,
///     "#breathChart",
///     ChartConfig::default(),
///     Capabilities::immediate(),
/// )?;
///
/// assert!(chart.add_data_point(24.5, 33.1).is_accepted());
/// assert_eq!(chart.get_data().len(), 1);
/// # Ok::<(), ConfigurationError>(())
/// ```
pub struct StreamingChart<S: ChartSurface> {
    config: ChartConfig,
    surface: S,
    caps: Capabilities,
    /// Whether the tweener interpolates; fixed at construction
    animated: bool,
    window: SampleWindow,
    render_state: RenderState,
    last_path_length: usize,
    segments: [Option<SegmentAnimation>; 2],
    /// Fade-out tasks a pending clear is waiting on
    clearing: Option<Vec<TaskId>>,
    phase: Phase,
}

impl<S: ChartSurface> StreamingChart<S> {
    /// Resolve `selector` in the host registry and mount a new surface there.
    ///
    /// Fails with [`ConfigurationError::SurfaceNotFound`] when no container
    /// answers to the selector, and with
    /// [`ConfigurationError::InvalidOption`] when the configuration is out
    /// of range. No surface is created in either case.
    pub fn attach(
        registry: &ContainerRegistry,
        selector: &str,
        config: ChartConfig,
        caps: Capabilities,
    ) -> ChartResult<Self> {
        config.validate()?;
        let container =
            registry
                .resolve(selector)
                .ok_or_else(|| ConfigurationError::SurfaceNotFound {
                    selector: selector.to_string(),
                })?;
        let surface = S::create(container, &config);
        Self::with_surface(surface, config, caps)
    }

    /// Build a chart around an already mounted surface.
    pub fn with_surface(surface: S, config: ChartConfig, caps: Capabilities) -> ChartResult<Self> {
        config.validate()?;
        let animated = caps.tweener.is_animated();

        tracing::info!(
            capacity = config.max_data_points,
            update_interval_ms = config.update_interval_ms,
            animated,
            "streaming chart created"
        );

        Ok(Self {
            window: SampleWindow::new(config.max_data_points),
            config,
            surface,
            caps,
            animated,
            render_state: RenderState::default(),
            last_path_length: 0,
            segments: [None, None],
            clearing: None,
            phase: Phase::Live,
        })
    }

    /// Offer a sample of both series.
    ///
    /// The sample is stamped with the chart clock and dropped if it comes
    /// less than the update interval after the newest stored sample. A
    /// sample landing in an empty window also fades both series in.
    pub fn add_data_point(&mut self, ambient: f64, object: f64) -> IngestOutcome {
        if !matches!(self.phase, Phase::Live) {
            tracing::warn!(ambient, object, "sample ignored, chart destroyed");
            return IngestOutcome::Destroyed;
        }

        let sample = Sample::new(ambient, object, self.caps.clock.now());
        if !sample.is_finite() {
            tracing::warn!(ambient, object, "rejected non-finite sample");
            return IngestOutcome::Rejected(RejectReason::NonFinite);
        }

        if self.clearing.is_some() {
            self.finish_clear();
        }

        if let Some(last) = self.window.last() {
            let since = sample.captured_at.saturating_sub(last.captured_at);
            if since < self.config.update_interval() {
                tracing::trace!(since_ms = since.as_millis() as u64, "sample throttled");
                return IngestOutcome::Throttled;
            }
        }

        let was_empty = self.window.is_empty();
        if let Some(evicted) = self.window.push(sample) {
            tracing::debug!(
                ambient = evicted.ambient,
                object = evicted.object,
                "evicted oldest sample"
            );
        }
        tracing::debug!(ambient, object, len = self.window.len(), "sample accepted");

        if was_empty {
            self.fade_in();
        }
        self.request_update();
        IngestOutcome::Accepted
    }

    /// Regenerate both paths from the window.
    ///
    /// Normally run through the frame scheduler; callable directly to force
    /// a redraw, for example after the container was resized.
    pub fn update_chart_paths(&mut self) {
        profile_function!();

        if matches!(self.phase, Phase::Destroyed) || !self.surface.is_attached() {
            return;
        }

        let size = self.surface.client_size();
        let capacity = self.window.capacity();
        self.render_state = RenderState::from_window(&self.window);
        let mapper = PointMapper::new(&self.render_state, capacity, size);
        let offset = scroll_offset(self.window.len(), capacity);

        let mut points = [
            Vec::with_capacity(self.window.len()),
            Vec::with_capacity(self.window.len()),
        ];
        {
            profile_scope!("map_points");
            for (i, sample) in self.window.iter().enumerate() {
                let Some(adjusted) = i.checked_sub(offset) else {
                    continue;
                };
                points[Series::Ambient.index()].push(mapper.map(adjusted, sample.ambient));
                points[Series::Object.index()].push(mapper.map(adjusted, sample.object));
            }
        }

        let mut full = points.each_ref().map(|pts| Path::polyline(pts).to_svg_data());
        self.last_path_length = full[Series::Ambient.index()].len();
        let count = points[Series::Ambient.index()].len();

        if self.animated && count >= 2 {
            let duration = self.config.segment_duration(self.window.len());
            for series in Series::ALL {
                let pts = &points[series.index()];
                let previous = pts[count - 2];
                let head = pts[count - 1];
                let base = Path::polyline(&pts[..count - 1]).to_svg_data();

                let task = self.caps.tweener.to(
                    segment_key(series),
                    Tween::to(head.y)
                        .from(previous.y)
                        .duration(duration)
                        .easing(EASE_OUT),
                );

                let cursor = Vec2::new(head.x, previous.y);
                self.surface
                    .set_path_data(series, &Path::extend_svg_data(&base, cursor));
                self.surface.set_marker(series, Some(cursor));

                self.segments[series.index()] = Some(SegmentAnimation {
                    task,
                    base,
                    full: std::mem::take(&mut full[series.index()]),
                    head,
                });
            }
        } else {
            self.stop_segments();
            for series in Series::ALL {
                self.surface.set_path_data(series, &full[series.index()]);
                self.surface
                    .set_marker(series, points[series.index()].last().copied());
            }
        }

        tracing::trace!(
            points = count,
            path_length = self.last_path_length,
            min = self.render_state.min_value,
            max = self.render_state.max_value,
            "paths regenerated"
        );
    }

    /// Empty the window.
    ///
    /// With tweening, both series fade out first and the window empties
    /// once the fade completes; the paths stay transparent until the next
    /// sample fades them back in. Without tweening the window empties and
    /// the paths go transparent at once.
    pub fn clear_data(&mut self) {
        if self.animated && !self.window.is_empty() && self.surface.is_attached() {
            let mut tasks = Vec::with_capacity(Series::ALL.len());
            for series in Series::ALL {
                let key = opacity_key(series);
                let from = self.caps.tweener.value(key).unwrap_or(1.0);
                tasks.push(self.caps.tweener.to(
                    key,
                    Tween::to(0.0)
                        .from(from)
                        .duration(FADE_DURATION)
                        .easing(EASE_OUT),
                ));
            }
            tracing::debug!(len = self.window.len(), "fading out before clear");
            self.clearing = Some(tasks);
        } else {
            self.clearing = None;
            self.truncate();
            for series in Series::ALL {
                if self.animated {
                    self.caps.tweener.set(opacity_key(series), 0.0);
                }
                if self.surface.is_attached() {
                    self.surface.set_opacity(Layer::Series(series), 0.0);
                }
            }
            tracing::debug!("chart cleared");
        }
    }

    /// Owned copy of the window.
    pub fn get_data(&self) -> ChartData {
        self.window.snapshot()
    }

    /// Tear the chart down.
    ///
    /// With tweening, the surface fades to transparent while shrinking to
    /// 80% and is detached when that finishes; otherwise it is detached at
    /// once. The window is cleared either way. Further samples are refused.
    pub fn destroy(&mut self) {
        if !matches!(self.phase, Phase::Live) {
            tracing::debug!("destroy ignored, already torn down");
            return;
        }

        if !self.surface.is_attached() {
            self.phase = Phase::Destroyed;
        } else if self.animated {
            let opacity = surface_key(Property::Opacity);
            let from = self.caps.tweener.value(opacity).unwrap_or(1.0);
            let task = self.caps.tweener.to(
                opacity,
                Tween::to(0.0)
                    .from(from)
                    .duration(DESTROY_DURATION)
                    .easing(EasingFunction::CubicInOut),
            );
            self.caps.tweener.to(
                surface_key(Property::Scale),
                Tween::to(DESTROY_SCALE)
                    .from(1.0)
                    .duration(DESTROY_DURATION)
                    .easing(EasingFunction::CubicInOut),
            );
            self.phase = Phase::Destroying { task };
            tracing::debug!("chart destroying");
        } else {
            self.detach_surface();
        }

        self.clear_data();
    }

    /// Host display-refresh callback.
    ///
    /// Runs deferred path updates, advances the tweener by `delta_time`
    /// seconds and applies what it reports.
    pub fn on_frame(&mut self, delta_time: f32) {
        profile_function!();

        for job in self.caps.scheduler.drain() {
            match job {
                ChartJob::UpdatePaths => self.update_chart_paths(),
            }
        }

        let events = self.caps.tweener.advance(delta_time);
        for event in events {
            self.apply_event(event);
        }
    }

    pub fn render_state(&self) -> RenderState {
        self.render_state
    }

    /// Length of the most recent full ambient path data.
    pub fn last_path_length(&self) -> usize {
        self.last_path_length
    }

    /// Whether tweens or deferred updates are still outstanding.
    pub fn is_animating(&self) -> bool {
        self.caps.tweener.active_count() > 0 || self.caps.scheduler.has_pending()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        match self.phase {
            Phase::Destroyed => Lifecycle::Destroyed,
            Phase::Destroying { .. } => Lifecycle::Destroying,
            Phase::Live if self.clearing.is_some() => Lifecycle::Clearing,
            Phase::Live => Lifecycle::Live,
        }
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    fn fade_in(&mut self) {
        for series in Series::ALL {
            let layer = Layer::Series(series);
            if self.animated {
                let key = opacity_key(series);
                self.caps.tweener.set(key, 0.0);
                self.surface.set_opacity(layer, 0.0);
                self.caps.tweener.to(
                    key,
                    Tween::to(1.0)
                        .from(0.0)
                        .duration(FADE_DURATION)
                        .delay(FADE_IN_DELAY)
                        .easing(EASE_OUT),
                );
            } else {
                self.surface.set_opacity(layer, 1.0);
            }
        }
    }

    fn request_update(&mut self) {
        if matches!(self.phase, Phase::Destroyed) {
            return;
        }
        if self.caps.scheduler.schedule(ChartJob::UpdatePaths) == Scheduled::Now {
            self.update_chart_paths();
        }
    }

    fn stop_segments(&mut self) {
        for series in Series::ALL {
            if self.segments[series.index()].take().is_some() {
                self.caps.tweener.kill(segment_key(series));
            }
        }
    }

    /// Drop every sample and the derived state, then redraw.
    fn truncate(&mut self) {
        self.stop_segments();
        self.window.clear();
        self.render_state = RenderState::default();
        self.last_path_length = 0;
        self.request_update();
    }

    /// Complete a pending clear now, whether or not its fade has finished.
    fn finish_clear(&mut self) {
        if self.clearing.take().is_none() {
            return;
        }
        for series in Series::ALL {
            self.caps.tweener.kill(opacity_key(series));
        }
        self.truncate();
        tracing::debug!("chart cleared");
    }

    /// Empty the window and take the surface down.
    ///
    /// The teardown completion can land in the same frame as, and ahead of,
    /// the series fade a clear is waiting on; the window empties here so it
    /// never outlives the surface.
    fn detach_surface(&mut self) {
        self.finish_clear();
        if !self.window.is_empty() {
            self.truncate();
        }
        self.stop_segments();
        self.caps.scheduler.cancel_all();
        for target in [AMBIENT_TARGET, OBJECT_TARGET, SURFACE_TARGET] {
            self.caps.tweener.kill_target(target);
        }
        self.surface.detach();
        self.phase = Phase::Destroyed;
        tracing::info!("streaming chart destroyed");
    }

    fn apply_event(&mut self, event: TweenEvent) {
        let value = match event.kind {
            TweenEventKind::Update(value) | TweenEventKind::Complete(value) => value,
            TweenEventKind::Superseded | TweenEventKind::Cancelled => {
                tracing::trace!(task = event.task.as_u64(), "stale task ignored");
                return;
            }
        };

        // Completions can outlive the surface they were started for.
        if !self.surface.is_attached() {
            return;
        }

        let complete = event.is_complete();
        match (event.key.property, series_of(event.key.target)) {
            (Property::SegmentY, Some(series)) => {
                self.apply_segment(series, event.task, value, complete);
            }
            (Property::Opacity, Some(series)) => {
                self.surface.set_opacity(Layer::Series(series), value);
                if complete {
                    self.resolve_clear_task(event.task);
                }
            }
            (Property::Opacity, None) if event.key.target == SURFACE_TARGET => {
                self.surface.set_opacity(Layer::Surface, value);
                if complete && self.phase == (Phase::Destroying { task: event.task }) {
                    self.detach_surface();
                }
            }
            (Property::Scale, None) if event.key.target == SURFACE_TARGET => {
                self.surface.set_scale(value);
            }
            _ => {}
        }
    }

    fn apply_segment(&mut self, series: Series, task: TaskId, y: f32, complete: bool) {
        let slot = series.index();
        if !matches!(&self.segments[slot], Some(segment) if segment.task == task) {
            return;
        }

        if complete {
            if let Some(segment) = self.segments[slot].take() {
                self.surface.set_path_data(series, &segment.full);
                self.surface.set_marker(series, Some(segment.head));
            }
        } else if let Some(segment) = &self.segments[slot] {
            let cursor = Vec2::new(segment.head.x, y);
            self.surface
                .set_path_data(series, &Path::extend_svg_data(&segment.base, cursor));
            self.surface.set_marker(series, Some(cursor));
        }
    }

    fn resolve_clear_task(&mut self, task: TaskId) {
        let Some(tasks) = self.clearing.as_mut() else {
            return;
        };
        tasks.retain(|pending| *pending != task);
        if tasks.is_empty() {
            self.finish_clear();
        }
    }
}

impl<S: ChartSurface + std::fmt::Debug> std::fmt::Debug for StreamingChart<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingChart")
            .field("lifecycle", &self.lifecycle())
            .field("len", &self.window.len())
            .field("capacity", &self.window.capacity())
            .field("render_state", &self.render_state)
            .field("surface", &self.surface)
            .field("caps", &self.caps)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::SvgSurface;
    use breathscope_anim::{ImmediateScheduler, TweenEngine};
    use breathscope_core::ManualClock;

    const SIZE: Vec2 = Vec2::new(300.0, 100.0);

    fn chart(
        config: ChartConfig,
        caps: Capabilities,
    ) -> (StreamingChart<SvgSurface>, ManualClock) {
        let mut registry = ContainerRegistry::new();
        registry.create("#chart", SIZE);
        let clock = ManualClock::new();
        let chart = StreamingChart::attach(
            &registry,
            "#chart",
            config,
            caps.with_clock(clock.clone()),
        )
        .expect("chart");
        (chart, clock)
    }

    fn animated_sync() -> Capabilities {
        Capabilities::immediate()
            .with_tweener(TweenEngine::new())
            .with_scheduler(ImmediateScheduler)
    }

    #[test]
    fn test_attach_unknown_selector_fails() {
        let registry = ContainerRegistry::new();
        let result = StreamingChart::<SvgSurface>::attach(
            &registry,
            "#nope",
            ChartConfig::default(),
            Capabilities::immediate(),
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::SurfaceNotFound { selector }) if selector == "#nope"
        ));
    }

    #[test]
    fn test_attach_rejects_invalid_capacity() {
        let mut registry = ContainerRegistry::new();
        let container = registry.create("#chart", SIZE);
        let result = StreamingChart::<SvgSurface>::attach(
            &registry,
            "#chart",
            ChartConfig::default().with_max_data_points(1),
            Capabilities::immediate(),
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidOption { option: "maxDataPoints", .. })
        ));
        assert_eq!(container.mounted_surfaces(), 0);
    }

    #[test]
    fn test_throttle_then_accept() {
        let (mut chart, clock) = chart(ChartConfig::default(), Capabilities::immediate());
        assert_eq!(chart.add_data_point(20.0, 30.0), IngestOutcome::Accepted);
        clock.advance_millis(149);
        assert_eq!(chart.add_data_point(21.0, 31.0), IngestOutcome::Throttled);
        clock.advance_millis(1);
        assert_eq!(chart.add_data_point(22.0, 32.0), IngestOutcome::Accepted);
        assert_eq!(chart.get_data().ambient_series, vec![20.0, 22.0]);
    }

    #[test]
    fn test_non_finite_rejected() {
        let (mut chart, _clock) = chart(ChartConfig::default(), Capabilities::immediate());
        assert_eq!(
            chart.add_data_point(f64::NAN, 30.0),
            IngestOutcome::Rejected(RejectReason::NonFinite)
        );
        assert_eq!(
            chart.add_data_point(20.0, f64::INFINITY),
            IngestOutcome::Rejected(RejectReason::NonFinite)
        );
        assert!(chart.is_empty());
    }

    #[test]
    fn test_immediate_sets_full_path() {
        let (mut chart, clock) = chart(
            ChartConfig::default().with_max_data_points(3),
            Capabilities::immediate(),
        );
        chart.add_data_point(10.0, 20.0);
        clock.advance_millis(150);
        chart.add_data_point(20.0, 10.0);

        // range 10 over height 100: value 10 -> y 85, value 20 -> y 15
        assert_eq!(
            chart.surface().path_data(Series::Ambient),
            "M 0,85 L 150,15"
        );
        assert_eq!(
            chart.surface().path_data(Series::Object),
            "M 0,15 L 150,85"
        );
        assert_eq!(chart.last_path_length(), "M 0,85 L 150,15".len());
        assert_eq!(
            chart.surface().marker(Series::Ambient),
            Some(Vec2::new(150.0, 15.0))
        );
        assert!(!chart.is_animating());
    }

    #[test]
    fn test_segment_tween_settles_on_exact_path() {
        let (mut chart, clock) = chart(ChartConfig::default().with_max_data_points(3), animated_sync());
        chart.add_data_point(10.0, 20.0);
        clock.advance_millis(150);
        chart.add_data_point(20.0, 10.0);

        // starts at the previous point's height
        assert_eq!(
            chart.surface().path_data(Series::Ambient),
            "M 0,85 L 150,85"
        );
        assert!(chart.is_animating());

        chart.on_frame(1.0);
        assert_eq!(
            chart.surface().path_data(Series::Ambient),
            "M 0,85 L 150,15"
        );
        assert_eq!(
            chart.surface().path_data(Series::Object),
            "M 0,15 L 150,85"
        );
    }

    #[test]
    fn test_clear_waits_for_fade() {
        let (mut chart, clock) = chart(ChartConfig::default(), animated_sync());
        chart.add_data_point(10.0, 20.0);
        clock.advance_millis(150);
        chart.add_data_point(11.0, 21.0);
        chart.on_frame(1.0);

        chart.clear_data();
        assert_eq!(chart.lifecycle(), Lifecycle::Clearing);
        assert_eq!(chart.len(), 2);

        chart.on_frame(0.1);
        assert_eq!(chart.len(), 2);

        chart.on_frame(0.3);
        assert_eq!(chart.lifecycle(), Lifecycle::Live);
        assert!(chart.is_empty());
        assert_eq!(chart.surface().path_data(Series::Ambient), "");
        assert_eq!(chart.surface().opacity(Layer::Series(Series::Ambient)), 0.0);
        assert_eq!(chart.last_path_length(), 0);
    }

    #[test]
    fn test_destroy_immediate_detaches() {
        let (mut chart, _clock) = chart(ChartConfig::default(), Capabilities::immediate());
        chart.add_data_point(10.0, 20.0);
        chart.destroy();

        assert_eq!(chart.lifecycle(), Lifecycle::Destroyed);
        assert!(!chart.surface().is_attached());
        assert_eq!(chart.surface().container().mounted_surfaces(), 0);
        assert!(chart.is_empty());
        assert_eq!(chart.add_data_point(1.0, 2.0), IngestOutcome::Destroyed);
    }
}
