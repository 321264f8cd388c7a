use std::rc::Rc;

use kurbo::Shape;

use crate::foundation::core::{BezPath, Color, Point, Rect};
use crate::render::surface::{Surface, TextAlign, TextBaseline, TextStyle};

const PANEL: Color = Color::rgba(0, 0, 0, 96);
const GRID: Color = Color::rgba(255, 255, 255, 40);
const AXIS: Color = Color::rgba(255, 255, 255, 160);
const CURVE: Color = Color::rgb(255, 87, 34);

/// Upper bound on line segments drawn per plot or grid, so a tiny step cannot stall a frame.
const MAX_SAMPLES: usize = 4096;

/// A closed interval of data values.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub lower: f64,
    pub upper: f64,
}

impl Span {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn length(self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(self, v: f64) -> bool {
        v >= self.lower.min(self.upper) && v <= self.lower.max(self.upper)
    }

    /// Linearly map `v` from this span onto `[a, b]`.
    pub fn map(self, v: f64, a: f64, b: f64) -> f64 {
        let len = self.length();
        if len == 0.0 {
            return a;
        }
        a + (v - self.lower) / len * (b - a)
    }

    /// Where an axis crosses this span: zero when it is inside, else the nearer end.
    pub fn axis_crossing(self) -> f64 {
        if self.contains(0.0) {
            0.0
        } else if self.lower.abs() < self.upper.abs() {
            self.lower
        } else {
            self.upper
        }
    }

    /// Multiples of `step` inside the span, in increasing order.
    pub fn grid_values(self, step: f64) -> Vec<f64> {
        let (lo, hi) = (self.lower.min(self.upper), self.lower.max(self.upper));
        if step <= 0.0 || !step.is_finite() || (hi - lo) / step > MAX_SAMPLES as f64 {
            return Vec::new();
        }
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|k| k as f64 * step).collect()
    }
}

pub type PlotFn = Rc<dyn Fn(f64) -> f64>;
pub type TrackerFn = Rc<dyn Fn() -> f64>;

/// A function plotted inside a node's box, with the y axis pointing up.
#[derive(Clone)]
pub struct PlotSpec {
    pub title: String,
    pub function: PlotFn,
    pub x: Span,
    pub y: Span,
    /// Sampling step along x.
    pub step: f64,
    /// x position of a dot that follows the curve.
    pub tracker: Option<TrackerFn>,
}

impl PlotSpec {
    pub fn new(
        title: impl Into<String>,
        function: impl Fn(f64) -> f64 + 'static,
        x: Span,
        y: Span,
        step: f64,
    ) -> Self {
        Self {
            title: title.into(),
            function: Rc::new(function),
            x,
            y,
            step,
            tracker: None,
        }
    }

    pub fn with_tracker(mut self, tracker: impl Fn() -> f64 + 'static) -> Self {
        self.tracker = Some(Rc::new(tracker));
        self
    }

    fn to_box(&self, bounds: Rect, x: f64, y: f64) -> Point {
        Point::new(
            self.x.map(x, bounds.x0, bounds.x1),
            self.y.map(y, bounds.y1, bounds.y0),
        )
    }

    pub fn sample_points(&self, bounds: Rect) -> Vec<Point> {
        let len = self.x.length();
        let mut n = if self.step > 0.0 && self.step.is_finite() {
            (len.abs() / self.step).ceil() as usize
        } else {
            1
        };
        n = n.clamp(1, MAX_SAMPLES);
        (0..=n)
            .map(|i| {
                let x = self.x.lower + len * (i as f64 / n as f64);
                self.to_box(bounds, x, (self.function)(x))
            })
            .filter(|p| p.y.is_finite())
            .collect()
    }

    pub fn render(&self, bounds: Rect, surface: &mut dyn Surface) {
        surface.fill_rect(bounds, PANEL);

        for gx in 1..4 {
            let x = bounds.x0 + bounds.width() * f64::from(gx) / 4.0;
            let grid = line(Point::new(x, bounds.y0), Point::new(x, bounds.y1));
            surface.stroke_path(&grid, GRID, 1.0);
        }
        for gy in 1..4 {
            let y = bounds.y0 + bounds.height() * f64::from(gy) / 4.0;
            let grid = line(Point::new(bounds.x0, y), Point::new(bounds.x1, y));
            surface.stroke_path(&grid, GRID, 1.0);
        }

        let origin = self.to_box(bounds, self.x.axis_crossing(), self.y.axis_crossing());
        surface.stroke_path(
            &line(Point::new(bounds.x0, origin.y), Point::new(bounds.x1, origin.y)),
            AXIS,
            1.0,
        );
        surface.stroke_path(
            &line(Point::new(origin.x, bounds.y0), Point::new(origin.x, bounds.y1)),
            AXIS,
            1.0,
        );

        let points = self.sample_points(bounds);
        if points.len() >= 2 {
            surface.stroke_path(&polyline(&points), CURVE, 2.0);
        }

        if let Some(tracker) = &self.tracker {
            let x = tracker();
            let dot = self.to_box(bounds, x, (self.function)(x));
            if dot.x.is_finite() && dot.y.is_finite() {
                let circle = kurbo::Circle::new(dot, 5.0).to_path(0.1);
                surface.fill_path(&circle, Color::WHITE);
            }
        }

        let style = TextStyle::new(16.0, Color::WHITE)
            .with_align(TextAlign::Center)
            .with_baseline(TextBaseline::Bottom);
        surface.fill_text(
            &self.title,
            Point::new(bounds.center().x, bounds.y0 - 6.0),
            &style,
        );
    }
}

/// A coordinate grid inside a node's box, using canvas orientation (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxesSpec {
    pub x: Span,
    pub y: Span,
    pub grid_step: f64,
    pub labels: bool,
}

impl AxesSpec {
    pub fn new(x: Span, y: Span, grid_step: f64, labels: bool) -> Self {
        Self {
            x,
            y,
            grid_step,
            labels,
        }
    }

    fn to_box(&self, bounds: Rect, x: f64, y: f64) -> Point {
        Point::new(
            self.x.map(x, bounds.x0, bounds.x1),
            self.y.map(y, bounds.y0, bounds.y1),
        )
    }

    pub fn render(&self, bounds: Rect, surface: &mut dyn Surface) {
        let label_style = TextStyle::new(12.0, AXIS)
            .with_align(TextAlign::Left)
            .with_baseline(TextBaseline::Top);

        for gx in self.x.grid_values(self.grid_step) {
            let p = self.to_box(bounds, gx, self.y.lower);
            let grid = line(Point::new(p.x, bounds.y0), Point::new(p.x, bounds.y1));
            surface.stroke_path(&grid, GRID, 1.0);
        }
        for gy in self.y.grid_values(self.grid_step) {
            let p = self.to_box(bounds, self.x.lower, gy);
            let grid = line(Point::new(bounds.x0, p.y), Point::new(bounds.x1, p.y));
            surface.stroke_path(&grid, GRID, 1.0);
        }

        let origin = self.to_box(bounds, self.x.axis_crossing(), self.y.axis_crossing());
        surface.stroke_path(
            &line(Point::new(bounds.x0, origin.y), Point::new(bounds.x1, origin.y)),
            AXIS,
            2.0,
        );
        surface.stroke_path(
            &line(Point::new(origin.x, bounds.y0), Point::new(origin.x, bounds.y1)),
            AXIS,
            2.0,
        );

        if self.labels {
            for gx in self.x.grid_values(self.grid_step) {
                let p = self.to_box(bounds, gx, self.y.axis_crossing());
                surface.fill_text(&format_tick(gx), Point::new(p.x + 2.0, p.y + 2.0), &label_style);
            }
            for gy in self.y.grid_values(self.grid_step) {
                if gy == self.y.axis_crossing() {
                    continue;
                }
                let p = self.to_box(bounds, self.x.axis_crossing(), gy);
                surface.fill_text(&format_tick(gy), Point::new(p.x + 2.0, p.y + 2.0), &label_style);
            }
        }
    }
}

fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

pub fn line(a: Point, b: Point) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(a);
    p.line_to(b);
    p
}

pub fn polyline(points: &[Point]) -> BezPath {
    let mut p = BezPath::new();
    let mut iter = points.iter();
    if let Some(&first) = iter.next() {
        p.move_to(first);
        for &pt in iter {
            p.line_to(pt);
        }
    }
    p
}

#[cfg(test)]
#[path = "../../tests/unit/scene/plot.rs"]
mod tests;
