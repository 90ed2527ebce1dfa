//! Recording implementation of [`ChartSurface`].

use breathscope_chart::{ChartConfig, ChartSurface, Container, Layer, Series};
use glam::Vec2;
use parking_lot::Mutex;
use std::sync::Arc;

/// Records a surface call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    SetPathData { series: Series, data: String },
    SetMarker { series: Series, at: Option<Vec2> },
    SetOpacity { layer: Layer, opacity: f32 },
    SetScale { scale: f32 },
    Detach,
}

#[derive(Debug)]
struct MockState {
    attached: bool,
    paths: [String; 2],
    opacity: [f32; 2],
    surface_opacity: f32,
    scale: f32,
}

/// Mock surface for testing.
///
/// Calls made while attached are applied to a minimal drawing state and
/// recorded in order; calls after [`ChartSurface::detach`] are recorded as
/// violations instead, so tests can assert that nothing touched a torn-down
/// surface.
///
/// Clones share the same log and state.
#[derive(Debug, Clone)]
pub struct MockSurface {
    container: Container,
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
    after_detach: Arc<Mutex<Vec<SurfaceCall>>>,
    state: Arc<Mutex<MockState>>,
}

impl MockSurface {
    pub fn new(container: Container) -> Self {
        container.mount();
        Self {
            container,
            calls: Arc::new(Mutex::new(Vec::new())),
            after_detach: Arc::new(Mutex::new(Vec::new())),
            state: Arc::new(Mutex::new(MockState {
                attached: true,
                paths: Default::default(),
                opacity: [1.0; 2],
                surface_opacity: 1.0,
                scale: 1.0,
            })),
        }
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().clone()
    }

    /// Forget recorded calls; drawing state is kept.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Calls that arrived after the surface was detached.
    pub fn calls_after_detach(&self) -> Vec<SurfaceCall> {
        self.after_detach.lock().clone()
    }

    /// Every path data string set on one series, oldest first.
    pub fn path_history(&self, series: Series) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::SetPathData { series: s, data } if *s == series => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count_path_updates(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, SurfaceCall::SetPathData { .. }))
            .count()
    }

    pub fn count_detaches(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Detach))
            .count()
    }

    /// Current path data of one series.
    pub fn path_data(&self, series: Series) -> String {
        self.state.lock().paths[series.index()].clone()
    }

    pub fn opacity(&self, layer: Layer) -> f32 {
        let state = self.state.lock();
        match layer {
            Layer::Series(series) => state.opacity[series.index()],
            Layer::Surface => state.surface_opacity,
        }
    }

    pub fn scale(&self) -> f32 {
        self.state.lock().scale
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    fn record(&self, call: SurfaceCall) -> bool {
        if self.state.lock().attached {
            self.calls.lock().push(call);
            true
        } else {
            self.after_detach.lock().push(call);
            false
        }
    }
}

impl ChartSurface for MockSurface {
    fn create(container: Container, _config: &ChartConfig) -> Self {
        Self::new(container)
    }

    fn client_size(&self) -> Vec2 {
        if self.state.lock().attached {
            self.container.client_size()
        } else {
            Vec2::ZERO
        }
    }

    fn set_path_data(&mut self, series: Series, data: &str) {
        if self.record(SurfaceCall::SetPathData {
            series,
            data: data.to_string(),
        }) {
            self.state.lock().paths[series.index()] = data.to_string();
        }
    }

    fn set_marker(&mut self, series: Series, at: Option<Vec2>) {
        self.record(SurfaceCall::SetMarker { series, at });
    }

    fn set_opacity(&mut self, layer: Layer, opacity: f32) {
        if self.record(SurfaceCall::SetOpacity { layer, opacity }) {
            let mut state = self.state.lock();
            match layer {
                Layer::Series(series) => state.opacity[series.index()] = opacity,
                Layer::Surface => state.surface_opacity = opacity,
            }
        }
    }

    fn set_scale(&mut self, scale: f32) {
        if self.record(SurfaceCall::SetScale { scale }) {
            self.state.lock().scale = scale;
        }
    }

    fn detach(&mut self) {
        if self.record(SurfaceCall::Detach) {
            self.state.lock().attached = false;
            self.container.unmount();
        }
    }

    fn is_attached(&self) -> bool {
        self.state.lock().attached
    }
}

/// Parse SVG path data made of `M x,y` and `L x,y` commands into points.
///
/// Returns `None` on anything else.
pub fn parse_path_data(data: &str) -> Option<Vec<Vec2>> {
    let mut points = Vec::new();
    let mut tokens = data.split_whitespace();
    while let Some(command) = tokens.next() {
        if command != "M" && command != "L" {
            return None;
        }
        let (x, y) = tokens.next()?.split_once(',')?;
        points.push(Vec2::new(x.parse().ok()?, y.parse().ok()?));
    }
    Some(points)
}
