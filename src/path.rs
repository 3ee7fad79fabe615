//! Outline paths produced by text layout.
//!
//! A [`Path`] is a flat list of absolute drawing commands. Coordinates are in
//! the caller's space with y growing downwards, so a path can be handed to an
//! SVG or canvas style consumer without further transforms.

use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A single drawing command with absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic Bezier: two control points followed by the end point.
    CubicTo(Point, Point, Point),
    Close,
}

impl PathCommand {
    fn translated(self, dx: f64, dy: f64) -> Self {
        match self {
            Self::MoveTo(p) => Self::MoveTo(p.translated(dx, dy)),
            Self::LineTo(p) => Self::LineTo(p.translated(dx, dy)),
            Self::CubicTo(c1, c2, p) => Self::CubicTo(
                c1.translated(dx, dy),
                c2.translated(dx, dy),
                p.translated(dx, dy),
            ),
            Self::Close => Self::Close,
        }
    }
}

/// Axis-aligned bounds of a path's control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathBounds {
    pub min: Point,
    pub max: Point,
}

impl PathBounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// An ordered list of drawing commands.
///
/// Open contours are left open; nothing is closed implicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
    }

    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.commands.push(PathCommand::CubicTo(
            Point::new(x1, y1),
            Point::new(x2, y2),
            Point::new(x, y),
        ));
    }

    /// Adds a quadratic segment, elevated to the equivalent cubic.
    ///
    /// Without a current point the control point is used as the start.
    pub fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64) {
        let start = self.current_point().unwrap_or(Point::new(x1, y1));
        let c1 = Point::new(
            start.x + 2.0 / 3.0 * (x1 - start.x),
            start.y + 2.0 / 3.0 * (y1 - start.y),
        );
        let c2 = Point::new(x + 2.0 / 3.0 * (x1 - x), y + 2.0 / 3.0 * (y1 - y));
        self.cubic_to(c1.x, c1.y, c2.x, c2.y, x, y);
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Appends every command of `other` in order.
    pub fn append(&mut self, other: &Path) {
        self.commands.extend_from_slice(&other.commands);
    }

    /// Moves every point of the path by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for command in &mut self.commands {
            *command = command.translated(dx, dy);
        }
    }

    /// End point of the last drawing command, tracking `Close` back to the
    /// start of the contour.
    ///
    /// Looks backwards from the end, so it costs O(1) except right after a
    /// `Close`.
    pub fn current_point(&self) -> Option<Point> {
        match *self.commands.last()? {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) | PathCommand::CubicTo(_, _, p) => {
                Some(p)
            }
            PathCommand::Close => self.commands.iter().rev().find_map(|command| match *command {
                PathCommand::MoveTo(p) => Some(p),
                _ => None,
            }),
        }
    }

    /// Bounds over all points, control points included. `None` when the path
    /// has no points.
    pub fn bounds(&self) -> Option<PathBounds> {
        let mut bounds: Option<PathBounds> = None;
        let mut extend = |p: Point| {
            bounds = Some(match bounds {
                None => PathBounds { min: p, max: p },
                Some(b) => PathBounds {
                    min: Point::new(b.min.x.min(p.x), b.min.y.min(p.y)),
                    max: Point::new(b.max.x.max(p.x), b.max.y.max(p.y)),
                },
            });
        };

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => extend(p),
                PathCommand::CubicTo(c1, c2, p) => {
                    extend(c1);
                    extend(c2);
                    extend(p);
                }
                PathCommand::Close => {}
            }
        }
        bounds
    }

    /// Serializes the path as SVG path data (`d` attribute).
    pub fn to_svg_data(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match *command {
                PathCommand::MoveTo(p) => write!(out, "M{} {}", fmt_num(p.x), fmt_num(p.y)),
                PathCommand::LineTo(p) => write!(out, "L{} {}", fmt_num(p.x), fmt_num(p.y)),
                PathCommand::CubicTo(c1, c2, p) => write!(
                    out,
                    "C{} {} {} {} {} {}",
                    fmt_num(c1.x),
                    fmt_num(c1.y),
                    fmt_num(c2.x),
                    fmt_num(c2.y),
                    fmt_num(p.x),
                    fmt_num(p.y)
                ),
                PathCommand::Close => write!(out, "Z"),
            };
        }
        out
    }
}

impl Extend<PathCommand> for Path {
    fn extend<I: IntoIterator<Item = PathCommand>>(&mut self, iter: I) {
        self.commands.extend(iter);
    }
}

/// Formats with at most three decimals and no trailing zeros.
fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let s = format!("{:.3}", rounded);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}
