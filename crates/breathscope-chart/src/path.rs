//! Polyline paths for the two series.
//!
//! Only straight segments are needed: points are joined by lines, never
//! smoothed. Paths serialise to SVG path data (`M x,y L x,y ...`).

use glam::Vec2;
use std::fmt::Write;

/// A command in a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Move to a new position without drawing.
    MoveTo(Vec2),
    /// Draw a line to a position.
    LineTo(Vec2),
}

impl PathCommand {
    /// Append this command as SVG path data. Every command after the
    /// first is preceded by a single space.
    pub fn write_svg(&self, out: &mut String) {
        if !out.is_empty() {
            out.push(' ');
        }
        // Writing to a String cannot fail.
        let _ = match self {
            PathCommand::MoveTo(p) => write!(out, "M {},{}", p.x, p.y),
            PathCommand::LineTo(p) => write!(out, "L {},{}", p.x, p.y),
        };
    }
}

/// A 2D polyline path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Path through `points` in order: move to the first, line to the rest.
    pub fn polyline(points: &[Vec2]) -> Self {
        let mut builder = PathBuilder::with_capacity(points.len());
        builder.polyline(points);
        builder.build()
    }

    /// Serialise to SVG path data.
    pub fn to_svg_data(&self) -> String {
        let mut out = String::with_capacity(self.commands.len() * 24);
        for cmd in &self.commands {
            cmd.write_svg(&mut out);
        }
        out
    }

    /// Path data of `base` extended by one line segment to `to`.
    ///
    /// `base` is copied verbatim, so everything before the new segment is
    /// byte-identical to it.
    pub fn extend_svg_data(base: &str, to: Vec2) -> String {
        let mut out = String::with_capacity(base.len() + 24);
        out.push_str(base);
        let cmd = if base.is_empty() {
            PathCommand::MoveTo(to)
        } else {
            PathCommand::LineTo(to)
        };
        cmd.write_svg(&mut out);
        out
    }
}

/// Builder for constructing paths.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
}

impl PathBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    /// Move to a new position.
    pub fn move_to(&mut self, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(to));
        self
    }

    /// Draw a line to a position.
    pub fn line_to(&mut self, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::LineTo(to));
        self
    }

    /// Start at the first point and join the rest with lines.
    pub fn polyline(&mut self, points: &[Vec2]) -> &mut Self {
        if let Some((first, rest)) = points.split_first() {
            self.move_to(*first);
            for point in rest {
                self.line_to(*point);
            }
        }
        self
    }

    pub fn build(self) -> Path {
        Path {
            commands: self.commands,
        }
    }
}
