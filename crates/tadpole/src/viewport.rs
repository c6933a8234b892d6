//! Fit-to-canvas helpers.

use crate::geom::{Box2D, Point, point};
use crate::model::LayoutSnapshot;
use serde::Serialize;

/// Translate-then-scale transform: a layout point `p` is drawn at `(x + k * p.x, y + k * p.y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewTransform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl ViewTransform {
    pub fn apply(&self, p: Point) -> Point {
        point(self.x + self.k * p.x, self.y + self.k * p.y)
    }
}

fn include(bounds: &mut Option<Box2D>, min: Point, max: Point) {
    if !(min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite()) {
        return;
    }
    match bounds {
        Some(b) => {
            b.min.x = b.min.x.min(min.x);
            b.min.y = b.min.y.min(min.y);
            b.max.x = b.max.x.max(max.x);
            b.max.y = b.max.y.max(max.y);
        }
        None => *bounds = Some(Box2D::new(min, max)),
    }
}

/// Bounding box of every vertex box and edge point, or `None` for an empty snapshot.
pub fn layout_rect(snapshot: &LayoutSnapshot) -> Option<Box2D> {
    let mut bounds = None;
    for v in snapshot.vertices.values() {
        let hw = v.width.max(0.0) / 2.0;
        let hh = v.height.max(0.0) / 2.0;
        include(&mut bounds, point(v.x - hw, v.y - hh), point(v.x + hw, v.y + hh));
    }
    for (_, _, path) in snapshot.edge_entries() {
        for p in &path.points {
            include(&mut bounds, *p, *p);
        }
    }
    bounds
}

/// Scales `layout` uniformly to fit inside a `canvas_width x canvas_height` canvas less
/// `margin` on every side, and centers it.
///
/// A layout that is degenerate along one axis is fitted along the other; a single point keeps
/// `k = 1`.
pub fn center_transform(
    layout: Box2D,
    canvas_width: f64,
    canvas_height: f64,
    margin: f64,
) -> ViewTransform {
    let avail_w = (canvas_width - 2.0 * margin).max(0.0);
    let avail_h = (canvas_height - 2.0 * margin).max(0.0);
    let lw = layout.width();
    let lh = layout.height();

    let kx = (lw > 0.0).then(|| avail_w / lw);
    let ky = (lh > 0.0).then(|| avail_h / lh);
    let k = match (kx, ky) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => 1.0,
    };

    let c = layout.center();
    ViewTransform {
        x: canvas_width / 2.0 - k * c.x,
        y: canvas_height / 2.0 - k * c.y,
        k,
    }
}
