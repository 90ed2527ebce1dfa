//! In-memory SVG surface.

use crate::config::ChartConfig;
use crate::style::{ChartStyle, SeriesStyle};
use crate::surface::{ChartSurface, Container, Layer, Series};
use glam::Vec2;
use std::fmt::Write;

/// Per-series drawing state.
#[derive(Debug, Clone)]
struct SeriesLayer {
    path_data: String,
    opacity: f32,
    marker: Option<Vec2>,
}

impl Default for SeriesLayer {
    fn default() -> Self {
        Self {
            path_data: String::new(),
            opacity: 1.0,
            marker: None,
        }
    }
}

/// A vector surface that keeps its drawing state in memory and serialises
/// it to an SVG document on demand.
///
/// Mounts itself in its container on creation.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    container: Container,
    attached: bool,
    style: ChartStyle,
    marker_radius: f32,
    layers: [SeriesLayer; 2],
    opacity: f32,
    scale: f32,
}

impl SvgSurface {
    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn path_data(&self, series: Series) -> &str {
        &self.layers[series.index()].path_data
    }

    pub fn marker(&self, series: Series) -> Option<Vec2> {
        self.layers[series.index()].marker
    }

    pub fn opacity(&self, layer: Layer) -> f32 {
        match layer {
            Layer::Series(series) => self.layers[series.index()].opacity,
            Layer::Surface => self.opacity,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    fn series_style(&self, series: Series) -> &SeriesStyle {
        match series {
            Series::Ambient => &self.style.ambient,
            Series::Object => &self.style.object,
        }
    }

    fn gradient_id(series: Series) -> String {
        format!("{}Gradient", series.name())
    }

    /// Serialise the current drawing state as a standalone SVG document.
    ///
    /// Uses the container's current size. Returns the document even when
    /// detached, sized from the container, so a torn-down chart can still
    /// be inspected.
    pub fn to_svg(&self) -> String {
        let size = self.container.client_size();
        let mut out = String::with_capacity(1024);

        // Writing to a String cannot fail.
        let _ = self.write_svg(&mut out, size);
        out
    }

    fn write_svg(&self, out: &mut String, size: Vec2) -> std::fmt::Result {
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" opacity="{o}">"#,
            w = size.x,
            h = size.y,
            o = self.opacity,
        )?;

        writeln!(out, "  <defs>")?;
        for series in Series::ALL {
            let style = self.series_style(series);
            writeln!(
                out,
                r#"    <linearGradient id="{}" x1="0%" y1="0%" x2="100%" y2="0%">"#,
                Self::gradient_id(series)
            )?;
            for stop in &self.style.tail {
                writeln!(
                    out,
                    r#"      <stop offset="{}%" stop-color="{}" stop-opacity="{}" />"#,
                    stop.offset * 100.0,
                    style.color,
                    stop.opacity
                )?;
            }
            writeln!(out, "    </linearGradient>")?;
        }
        writeln!(out, "  </defs>")?;

        let center = size * 0.5;
        writeln!(
            out,
            r#"  <g transform="translate({cx} {cy}) scale({s}) translate({ncx} {ncy})">"#,
            cx = center.x,
            cy = center.y,
            s = self.scale,
            ncx = -center.x,
            ncy = -center.y,
        )?;

        for series in Series::ALL {
            let layer = &self.layers[series.index()];
            let style = self.series_style(series);
            writeln!(
                out,
                r#"    <path d="{}" stroke="url(#{})" stroke-width="{}" fill="none" stroke-linecap="round" stroke-linejoin="round" opacity="{}" />"#,
                layer.path_data,
                Self::gradient_id(series),
                style.stroke_width,
                layer.opacity
            )?;
        }

        for series in Series::ALL {
            let layer = &self.layers[series.index()];
            if let Some(at) = layer.marker {
                writeln!(
                    out,
                    r#"    <circle cx="{}" cy="{}" r="{}" fill="{}" opacity="{}" />"#,
                    at.x,
                    at.y,
                    self.marker_radius,
                    self.series_style(series).color,
                    layer.opacity
                )?;
            }
        }

        writeln!(out, "  </g>")?;
        writeln!(out, "</svg>")
    }
}

impl ChartSurface for SvgSurface {
    fn create(container: Container, config: &ChartConfig) -> Self {
        container.mount();
        Self {
            container,
            attached: true,
            style: config.style.clone(),
            marker_radius: config.marker_radius,
            layers: Default::default(),
            opacity: 1.0,
            scale: 1.0,
        }
    }

    fn client_size(&self) -> Vec2 {
        if self.attached {
            self.container.client_size()
        } else {
            Vec2::ZERO
        }
    }

    fn set_path_data(&mut self, series: Series, data: &str) {
        if !self.attached {
            return;
        }
        let layer = &mut self.layers[series.index()];
        layer.path_data.clear();
        layer.path_data.push_str(data);
    }

    fn set_marker(&mut self, series: Series, at: Option<Vec2>) {
        if self.attached {
            self.layers[series.index()].marker = at;
        }
    }

    fn set_opacity(&mut self, layer: Layer, opacity: f32) {
        if !self.attached {
            return;
        }
        let opacity = opacity.clamp(0.0, 1.0);
        match layer {
            Layer::Series(series) => self.layers[series.index()].opacity = opacity,
            Layer::Surface => self.opacity = opacity,
        }
    }

    fn set_scale(&mut self, scale: f32) {
        if self.attached {
            self.scale = scale;
        }
    }

    fn detach(&mut self) {
        if self.attached {
            self.attached = false;
            self.container.unmount();
            tracing::debug!(container = %self.container.selector(), "svg surface detached");
        }
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::GradientStop;

    fn surface() -> SvgSurface {
        let container = Container::new("#breathChart", Vec2::new(800.0, 200.0));
        SvgSurface::create(container, &ChartConfig::default())
    }

    #[test]
    fn test_create_mounts_in_container() {
        let surface = surface();
        assert!(surface.is_attached());
        assert_eq!(surface.container().mounted_surfaces(), 1);
        assert_eq!(surface.client_size(), Vec2::new(800.0, 200.0));
    }

    #[test]
    fn test_detach_unmounts_and_freezes_state() {
        let mut surface = surface();
        surface.set_path_data(Series::Ambient, "M 0,1 L 2,3");
        surface.detach();
        surface.detach();

        assert_eq!(surface.container().mounted_surfaces(), 0);
        assert_eq!(surface.client_size(), Vec2::ZERO);

        surface.set_path_data(Series::Ambient, "M 9,9");
        surface.set_opacity(Layer::Surface, 0.0);
        assert_eq!(surface.path_data(Series::Ambient), "M 0,1 L 2,3");
        assert_eq!(surface.opacity(Layer::Surface), 1.0);
    }

    #[test]
    fn test_svg_document_contents() {
        let mut surface = surface();
        surface.set_path_data(Series::Ambient, "M 0,170 L 800,30");
        surface.set_path_data(Series::Object, "M 0,30 L 800,170");
        surface.set_marker(Series::Object, Some(Vec2::new(800.0, 170.0)));
        surface.set_opacity(Layer::Series(Series::Ambient), 0.5);
        surface.set_scale(0.8);

        let svg = surface.to_svg();
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"id="ambientGradient""#));
        assert!(svg.contains(r##"stop-color="#ff8c00" stop-opacity="0.3""##));
        assert!(svg.contains(r#"d="M 0,170 L 800,30""#));
        assert!(svg.contains(r#"opacity="0.5""#));
        assert!(svg.contains("scale(0.8)"));
        assert!(svg.contains(r#"<circle cx="800" cy="170" r="4""#));
        assert_eq!(svg.matches("<circle").count(), 1);
    }

    #[test]
    fn test_configured_style_and_marker_radius() {
        let style = ChartStyle {
            ambient: SeriesStyle::new("#336699"),
            object: SeriesStyle {
                color: "#cc3300".to_string(),
                stroke_width: 3.0,
            },
            tail: vec![GradientStop::new(0.0, 0.2), GradientStop::new(1.0, 1.0)],
        };
        let config = ChartConfig::default()
            .with_style(style)
            .with_marker_radius(6.5);
        let container = Container::new("#breathChart", Vec2::new(400.0, 100.0));
        let mut surface = SvgSurface::create(container, &config);
        surface.set_marker(Series::Ambient, Some(Vec2::new(400.0, 15.0)));

        let svg = surface.to_svg();
        assert!(svg.contains(r##"stop-color="#336699" stop-opacity="0.2""##));
        assert!(svg.contains(r#"stroke-width="3""#));
        assert!(svg.contains(r##"r="6.5" fill="#336699""##));
        assert_eq!(svg.matches("<stop ").count(), 4);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let mut surface = surface();
        surface.set_opacity(Layer::Series(Series::Object), 1.4);
        assert_eq!(surface.opacity(Layer::Series(Series::Object)), 1.0);
    }
}
