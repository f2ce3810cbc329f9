//! Arc and touch-ring geometry derived from the widget size and style.
//!
//! Coordinates follow screen convention: origin at the top-left corner,
//! `y` growing downwards, angles growing clockwise from 3 o'clock.

use crate::config::{SliderConfig, ThumbSize};
use crate::mapper;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: Point) -> f64 {
        let (dx, dy) = (other.x - self.x, other.y - self.y);
        dx * dx + dy * dy
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Square of side `side` centered on `center`. A negative side yields
    /// an inverted rect rather than an error.
    pub fn square(center: Point, side: f64) -> Self {
        let half = side / 2.0;
        Self {
            left: center.x - half,
            top: center.y - half,
            right: center.x + half,
            bottom: center.y + half,
        }
    }

    pub fn from_origin(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub rect: Rect,
    pub radius: f64,
    pub center: Point,
}

/// Fits the arc into the widget: the largest square that leaves room for
/// the stroke and, when present, the thumb.
///
/// Sizes at or below zero give a negative radius; callers get a
/// degenerate geometry instead of a panic.
pub fn compute_arc_geometry(size: Size, line_width: f64, thumb: Option<ThumbSize>) -> ArcGeometry {
    let center = size.center();
    let thumb_side = thumb.map_or(0.0, |t| f64::from(t.width));
    let diameter = size.min_side() - line_width - thumb_side;

    ArcGeometry {
        rect: Rect::square(center, diameter),
        radius: diameter / 2.0,
        center,
    }
}

/// The annulus in which pointer input is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchRing {
    pub inside: f64,
    pub outside: f64,
}

impl TouchRing {
    pub fn around(radius: f64, thumb: Option<ThumbSize>, touch_correction: i32) -> Self {
        let thumb_margin = thumb.map_or(0.0, |t| f64::from(t.min_side()) / 2.0);
        let margin = thumb_margin + f64::from(touch_correction);
        Self {
            inside: radius - margin,
            outside: radius + margin,
        }
    }

    /// True when `point` lies in the dead zone near the center or beyond
    /// the outer bound.
    pub fn is_ignorable(&self, center: Point, point: Point) -> bool {
        let dist_sq = center.distance_squared(point);
        // non-positive bounds cannot be squared safely
        let too_close = self.inside > 0.0 && dist_sq < self.inside * self.inside;
        let too_far = self.outside <= 0.0 || dist_sq >= self.outside * self.outside;
        too_close || too_far
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressGeometry {
    pub progress_sweep: f64,
    /// Offset of the thumb from the arc center, at `start + sweep + 180°`.
    pub thumb_offset: Point,
}

impl ProgressGeometry {
    pub fn compute(config: &SliderConfig, radius: f64) -> Self {
        let progress_sweep =
            mapper::progress_sweep(config.progress, config.maximum, config.sweep_angle);
        Self {
            progress_sweep,
            thumb_offset: mapper::thumb_position(radius, config.start_angle, progress_sweep),
        }
    }
}

/// Everything derived from a [`SliderConfig`]. Layout and touch ring stay
/// `None` until the host reports a size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub layout: Option<ArcGeometry>,
    pub ring: Option<TouchRing>,
    pub progress: ProgressGeometry,
}

impl Geometry {
    pub fn derive(config: &SliderConfig, size: Option<Size>) -> Self {
        let layout = size.map(|s| compute_arc_geometry(s, config.line_width, config.thumb));
        let ring =
            layout.map(|l| TouchRing::around(l.radius, config.thumb, config.touch_correction));
        let radius = layout.map_or(0.0, |l| l.radius);

        Self {
            layout,
            ring,
            progress: ProgressGeometry::compute(config, radius),
        }
    }

    /// Recomputes only the progress-dependent part, keeping layout and ring.
    pub fn with_progress(&self, config: &SliderConfig) -> Self {
        Self {
            progress: ProgressGeometry::compute(config, self.radius()),
            ..*self
        }
    }

    pub fn radius(&self) -> f64 {
        self.layout.map_or(0.0, |l| l.radius)
    }
}
