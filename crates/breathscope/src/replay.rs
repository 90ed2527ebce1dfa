//! Offline replay of recorded endpoint payloads.
//!
//! Each input line is one JSON payload as the sensor endpoint served it.
//! Payloads are spaced `sample_interval` apart on a [`ManualClock`] and the
//! dashboard is stepped at `frame_interval` in between, so tweens and
//! deferred path updates run exactly as they would in a live page.

use anyhow::Context;
use breathscope_anim::{ImmediateTweener, TweenEngine, Tweener};
use breathscope_chart::{
    Capabilities, ChartConfig, ContainerRegistry, IngestOutcome, StreamingChart, SvgSurface,
};
use breathscope_core::ManualClock;
use breathscope_core::profiling::{new_frame, profile_function};
use breathscope_dashboard::{CHART_HEIGHT, CHART_SELECTOR, Dashboard, dashboard_chart_config};
use glam::Vec2;
use std::io::BufRead;
use std::time::Duration;

/// Upper bound on frames spent waiting for animations after the last payload.
const MAX_SETTLE_FRAMES: u32 = 10_000;

#[derive(Debug, Clone)]
pub struct ReplayOptions {
    pub config: ChartConfig,
    /// Client size of the chart container.
    pub size: Vec2,
    pub sample_interval: Duration,
    pub frame_interval: Duration,
    /// Tween and defer to frames; otherwise every change applies at once.
    pub animated: bool,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            config: dashboard_chart_config(),
            size: Vec2::new(800.0, CHART_HEIGHT),
            sample_interval: Duration::from_millis(500),
            frame_interval: Duration::from_millis(16),
            animated: true,
        }
    }
}

/// What a replay did, plus the rendered chart.
#[derive(Debug, Clone, Default)]
pub struct ReplayReport {
    /// Non-blank input lines.
    pub payloads: usize,
    pub accepted: usize,
    pub throttled: usize,
    pub rejected: usize,
    /// Lines that failed to decode.
    pub malformed: usize,
    pub frames: u64,
    /// Samples left in the chart window.
    pub window_len: usize,
    pub svg: String,
    /// `(name, text)` for each readout, in page order.
    pub readouts: Vec<(String, String)>,
}

struct Stepper {
    clock: ManualClock,
    frame_interval: Duration,
    frames: u64,
}

impl Stepper {
    fn frame(&mut self, dashboard: &mut Dashboard<SvgSurface>, step: Duration) {
        new_frame();
        self.clock.advance(step);
        dashboard.on_frame(step.as_secs_f32());
        self.frames += 1;
    }

    /// Step frames covering `span`, at least one.
    fn run_for(&mut self, dashboard: &mut Dashboard<SvgSurface>, span: Duration) {
        let mut remaining = span;
        loop {
            let step = self.frame_interval.min(remaining);
            self.frame(dashboard, step);
            remaining = remaining.saturating_sub(step);
            if remaining.is_zero() {
                break;
            }
        }
    }
}

/// Replay every payload in `input` and render the settled chart.
///
/// Malformed payloads are logged and skipped, matching how the dashboard
/// treats a bad response from the endpoint.
pub fn replay(input: impl BufRead, options: ReplayOptions) -> anyhow::Result<ReplayReport> {
    profile_function!();

    anyhow::ensure!(
        !options.frame_interval.is_zero(),
        "frame interval must be greater than zero"
    );

    let clock = ManualClock::new();
    let (caps, tweener): (Capabilities, Box<dyn Tweener>) = if options.animated {
        (
            Capabilities::animated().with_clock(clock.clone()),
            Box::new(TweenEngine::new()),
        )
    } else {
        (
            Capabilities::immediate().with_clock(clock.clone()),
            Box::new(ImmediateTweener::new()),
        )
    };

    let mut registry = ContainerRegistry::new();
    registry.create(CHART_SELECTOR, options.size);
    let chart =
        StreamingChart::<SvgSurface>::attach(&registry, CHART_SELECTOR, options.config, caps)
            .context("failed to attach chart")?;
    let mut dashboard = Dashboard::new(chart, tweener);

    let mut stepper = Stepper {
        clock,
        frame_interval: options.frame_interval,
        frames: 0,
    };
    let mut report = ReplayReport::default();

    for (index, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read input line {}", index + 1))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        report.payloads += 1;

        match dashboard.handle_payload(line) {
            Ok(Some(IngestOutcome::Accepted)) => report.accepted += 1,
            Ok(Some(IngestOutcome::Throttled)) => report.throttled += 1,
            Ok(Some(outcome)) => {
                tracing::debug!(line = index + 1, ?outcome, "sample not stored");
                report.rejected += 1;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "skipping payload");
                report.malformed += 1;
            }
        }

        stepper.run_for(&mut dashboard, options.sample_interval);
    }

    let mut settle = 0;
    while dashboard.is_animating() && settle < MAX_SETTLE_FRAMES {
        stepper.frame(&mut dashboard, options.frame_interval);
        settle += 1;
    }
    if dashboard.is_animating() {
        tracing::warn!(frames = settle, "animations still running after settle");
    }

    report.frames = stepper.frames;
    report.window_len = dashboard.chart().len();
    report.svg = dashboard.chart().surface().to_svg();
    report.readouts = dashboard
        .readouts()
        .iter()
        .map(|r| (r.name().to_string(), r.text().to_string()))
        .collect();

    tracing::info!(
        payloads = report.payloads,
        accepted = report.accepted,
        malformed = report.malformed,
        frames = report.frames,
        "replay finished"
    );

    Ok(report)
}
