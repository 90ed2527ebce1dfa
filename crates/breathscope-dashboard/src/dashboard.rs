//! The dashboard application context.

use crate::protocol::{BreathRate, DashboardUpdate, ProtocolResult, decode_payload};
use crate::readout::{PLACEHOLDER, Readout};
use breathscope_anim::Tweener;
use breathscope_chart::{ChartConfig, ChartSurface, IngestOutcome, StreamingChart};
use breathscope_core::profiling::profile_function;
use std::time::Duration;

/// Selector of the chart container on the dashboard page.
pub const CHART_SELECTOR: &str = ".chart-container";
/// Height of the chart container.
pub const CHART_HEIGHT: f32 = 200.0;

/// Chart options the dashboard page runs with.
pub fn dashboard_chart_config() -> ChartConfig {
    ChartConfig::default()
        .with_max_data_points(100)
        .with_update_interval(Duration::from_millis(100))
        .with_animation_duration(0.3)
}

/// The dashboard: one chart and three readouts, fed from endpoint payloads.
///
/// Constructed once and handed to whatever delivers payloads; nothing here
/// is global.
pub struct Dashboard<S: ChartSurface> {
    chart: StreamingChart<S>,
    tweener: Box<dyn Tweener>,
    breath_rate: Readout,
    room_temp: Readout,
    sampling_rate: Readout,
}

impl<S: ChartSurface> Dashboard<S> {
    /// `tweener` animates the readouts; the chart brings its own.
    pub fn new(chart: StreamingChart<S>, tweener: Box<dyn Tweener>) -> Self {
        Self {
            chart,
            tweener,
            breath_rate: Readout::new("breathRate"),
            room_temp: Readout::new("roomTemp"),
            sampling_rate: Readout::new("samplingRate"),
        }
    }

    /// Decode a payload and apply it.
    pub fn handle_payload(&mut self, json: &str) -> ProtocolResult<Option<IngestOutcome>> {
        let update = decode_payload(json)?;
        Ok(self.handle_update(&update))
    }

    /// Apply one update to the chart and the readouts.
    ///
    /// Returns the chart's verdict when the update carried temperatures.
    pub fn handle_update(&mut self, update: &DashboardUpdate) -> Option<IngestOutcome> {
        let outcome = update
            .temperatures
            .map(|t| self.chart.add_data_point(t.ambient, t.object));

        match update.breath_rate {
            BreathRate::Value(rate) => {
                let text = format!("{rate:.1}");
                tracing::debug!(breath_rate = %text, "breath rate received");
                self.breath_rate.set(self.tweener.as_mut(), &text);
            }
            BreathRate::Unavailable => {
                tracing::info!("breath rate unavailable");
                self.breath_rate.set(self.tweener.as_mut(), PLACEHOLDER);
            }
            BreathRate::Absent => {}
        }

        if let Some(t) = update.temperatures {
            let text = format!("{:.1}", t.ambient);
            self.room_temp.set(self.tweener.as_mut(), &text);
        }

        if let Some(rate) = update.sampling_rate {
            self.sampling_rate.set(self.tweener.as_mut(), &rate.to_string());
        }

        outcome
    }

    /// Clear the chart ahead of a new connection. Readouts keep their text.
    pub fn reset(&mut self) {
        tracing::debug!("dashboard reset");
        self.chart.clear_data();
    }

    /// Host display-refresh callback.
    pub fn on_frame(&mut self, delta_time: f32) {
        profile_function!();

        self.chart.on_frame(delta_time);
        for event in self.tweener.advance(delta_time) {
            let readouts = [
                &mut self.breath_rate,
                &mut self.room_temp,
                &mut self.sampling_rate,
            ];
            for readout in readouts {
                if readout.apply(&event) {
                    break;
                }
            }
        }
    }

    /// Tear the chart down.
    pub fn destroy(&mut self) {
        self.chart.destroy();
    }

    /// Whether the chart or any readout is still moving.
    pub fn is_animating(&self) -> bool {
        self.chart.is_animating() || self.readouts().iter().any(|r| r.is_animating())
    }

    pub fn chart(&self) -> &StreamingChart<S> {
        &self.chart
    }

    pub fn breath_rate(&self) -> &Readout {
        &self.breath_rate
    }

    pub fn room_temp(&self) -> &Readout {
        &self.room_temp
    }

    pub fn sampling_rate(&self) -> &Readout {
        &self.sampling_rate
    }

    /// Breath rate, room temperature and sampling rate, in page order.
    pub fn readouts(&self) -> [&Readout; 3] {
        [&self.breath_rate, &self.room_temp, &self.sampling_rate]
    }
}
