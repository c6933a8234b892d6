//! Layered layout post-processing.
//!
//! The tessellator needs a non-zero first and last segment to orient the stroke caps, and the
//! reconciler needs every hierarchy edge to carry the same number of points. Edges coming back
//! from the layered layouter are normalized to exactly [`HIERARCHY_POINTS`] points here.

use super::LayeredLayouter;
use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::geom::{Point, coincident, point};
use crate::model::{EdgeKind, EdgePath, LayoutSnapshot};
use tadpole_graphlib::GraphSource;

pub const HIERARCHY_POINTS: usize = 6;

pub fn layout(
    graph: &dyn GraphSource,
    config: &LayoutConfig,
    layered: &dyn LayeredLayouter,
) -> Result<LayoutSnapshot> {
    let raw = layered.layout(graph)?;

    let mut snapshot = LayoutSnapshot::new();
    for u in graph.vertices() {
        let placement = raw
            .vertex(u)
            .copied()
            .ok_or_else(|| Error::MissingVertex { id: u.to_string() })?;
        snapshot.insert_vertex(u, placement);
    }

    for (u, v) in graph.edges() {
        let (pu, pv) = super::endpoints(&snapshot, u, v)?;
        let (width, points) = match raw.edge(u, v) {
            Some(path) if !path.points.is_empty() => (path.width, path.points.clone()),
            Some(path) => (path.width, vec![pu.center(), pv.center()]),
            None => (config.edge_width, vec![pu.center(), pv.center()]),
        };
        let points = normalize_points(points, config.hierarchy_nudge);
        snapshot.insert_edge(u, v, EdgePath::new(EdgeKind::Hierarchy, width, points));
    }
    Ok(snapshot)
}

/// Brings `points` to exactly [`HIERARCHY_POINTS`] entries and nudges coincident end segments
/// apart along the x-axis.
///
/// Short paths are padded by repeating the last point. Longer paths keep their endpoints and
/// an evenly spaced selection of interior points. `points` must not be empty.
pub fn normalize_points(mut points: Vec<Point>, nudge: f64) -> Vec<Point> {
    let n = HIERARCHY_POINTS;
    if points.len() > n {
        let last = points.len() - 1;
        points = (0..n)
            .map(|i| points[(i * last + (n - 1) / 2) / (n - 1)])
            .collect();
    }
    while points.len() < n {
        let Some(&last) = points.last() else {
            return points;
        };
        points.push(last);
    }

    if coincident(points[0], points[1]) {
        tracing::trace!("nudging zero-length first hierarchy segment");
        points[0] = point(points[0].x - nudge, points[0].y);
    }
    if coincident(points[n - 2], points[n - 1]) {
        tracing::trace!("nudging zero-length last hierarchy segment");
        points[n - 1] = point(points[n - 1].x + nudge, points[n - 1].y);
    }
    points
}
