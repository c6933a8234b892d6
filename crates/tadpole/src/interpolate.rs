//! Linear blending between two snapshots.

use crate::model::{EdgePath, LayoutSnapshot, VertexPlacement};

fn mix(a: f64, b: f64, r: f64) -> f64 {
    (1.0 - r) * a + r * b
}

/// Transition progress for a layout started at `started_at_ms`, clamped to `[0, 1]`.
///
/// A zero duration completes immediately.
pub fn blend_factor(now_ms: f64, started_at_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    ((now_ms - started_at_ms) / duration_ms).clamp(0.0, 1.0)
}

pub fn blend_vertex(from: &VertexPlacement, to: &VertexPlacement, r: f64) -> VertexPlacement {
    VertexPlacement {
        x: mix(from.x, to.x, r),
        y: mix(from.y, to.y, r),
        width: mix(from.width, to.width, r),
        height: mix(from.height, to.height, r),
    }
}

/// Blends two paths point by point. Paths of different lengths cannot be paired, so `to` is
/// returned unchanged.
pub fn blend_path(from: &EdgePath, to: &EdgePath, r: f64) -> EdgePath {
    if from.points.len() != to.points.len() {
        return to.clone();
    }
    EdgePath {
        kind: to.kind,
        width: mix(from.width, to.width, r),
        points: from
            .points
            .iter()
            .zip(&to.points)
            .map(|(a, b)| a.lerp(*b, r))
            .collect(),
    }
}

/// The snapshot displayed at blend factor `r` of a `from -> to` transition.
///
/// The result has the shape of `to`. This matches what the renderer draws when `from` was
/// produced by [`crate::diff::reconcile`] against `to`; entities of `to` missing from `from`
/// are taken from `to` as they are.
pub fn blend(from: &LayoutSnapshot, to: &LayoutSnapshot, r: f64) -> LayoutSnapshot {
    let r = r.clamp(0.0, 1.0);
    let mut out = LayoutSnapshot::new();
    for (id, target) in &to.vertices {
        let placement = match from.vertex(id) {
            Some(start) => blend_vertex(start, target, r),
            None => *target,
        };
        out.insert_vertex(id.clone(), placement);
    }
    for (u, v, target) in to.edge_entries() {
        let path = match from.edge(u, v) {
            Some(start) => blend_path(start, target, r),
            None => target.clone(),
        };
        out.insert_edge(u, v, path);
    }
    out
}
