//! Snapshot reconciliation.
//!
//! [`reconcile`] builds the "from" side of a transition: a snapshot with exactly the vertices
//! and edges of the next layout, whose geometry starts from what is currently on screen.
//! Entities that were not on screen get a synthesized starting shape so that they grow into
//! place instead of popping in.

use crate::arc::arc_points;
use crate::geom::{Point, point};
use crate::model::{EdgeKind, EdgePath, LayoutSnapshot, VertexPlacement};

/// Which endpoints of a new edge were already placed on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchors {
    /// Both vertices existed, only the edge is new.
    Both(VertexPlacement, VertexPlacement),
    /// Only the source vertex existed.
    Source(VertexPlacement),
    /// Only the target vertex existed.
    Target(VertexPlacement),
    Neither,
}

impl Anchors {
    pub fn new(du: Option<&VertexPlacement>, dv: Option<&VertexPlacement>) -> Self {
        match (du, dv) {
            (Some(du), Some(dv)) => Anchors::Both(*du, *dv),
            (Some(du), None) => Anchors::Source(*du),
            (None, Some(dv)) => Anchors::Target(*dv),
            (None, None) => Anchors::Neither,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Anchors::Both(..) => "both",
            Anchors::Source(_) => "source",
            Anchors::Target(_) => "target",
            Anchors::Neither => "neither",
        }
    }
}

impl EdgeKind {
    /// Starting geometry for an edge that has no matching predecessor on screen.
    ///
    /// The result always has as many points as `next`.
    pub fn entry_points(self, next: &EdgePath, anchors: Anchors) -> Vec<Point> {
        let n = next.points.len();
        let (Some(first), Some(last)) = (next.first(), next.last()) else {
            return Vec::new();
        };
        if n < 2 {
            return baseline(&next.points);
        }
        // Where the missing endpoint will land, flattened onto the baseline.
        let landing_u = point(first.x, 0.0);
        let landing_v = point(last.x, 0.0);

        match self {
            EdgeKind::Line => match anchors {
                Anchors::Both(du, dv) => spread(du.center(), dv.center(), n),
                Anchors::Source(du) => spread(du.center(), landing_v, n),
                Anchors::Target(dv) => spread(landing_u, dv.center(), n),
                Anchors::Neither => baseline(&next.points),
            },
            EdgeKind::Arc => match anchors {
                Anchors::Both(du, dv) => arc_points(du.center(), dv.center(), n - 1),
                Anchors::Source(du) => arc_points(du.center(), landing_v, n - 1),
                Anchors::Target(dv) => arc_points(landing_u, dv.center(), n - 1),
                Anchors::Neither => baseline(&next.points),
            },
            EdgeKind::Hierarchy => match anchors {
                Anchors::Both(du, dv) => split(du.right_edge(), dv.left_edge(), n),
                Anchors::Source(du) => split(du.right_edge(), landing_v, n),
                Anchors::Target(dv) => split(landing_u, dv.left_edge(), n),
                Anchors::Neither => baseline(&next.points),
            },
        }
    }
}

/// Builds the from-snapshot for a transition `current -> next`.
///
/// The result has exactly the vertex ids of `next` and an entry for every edge of `next`, each
/// with the same point count as its `next` counterpart:
///
/// - a vertex already in `current` starts where it is; a new vertex starts at its next
///   position dropped onto `y = 0`.
/// - an edge already in `current` with the same kind and point count starts from its current
///   shape unchanged. Anything else is treated as a new edge and gets
///   [`EdgeKind::entry_points`].
pub fn reconcile(current: &LayoutSnapshot, next: &LayoutSnapshot) -> LayoutSnapshot {
    let mut from = LayoutSnapshot::new();

    for (id, placement) in &next.vertices {
        let start = match current.vertex(id) {
            Some(prev) => *prev,
            None => placement.with_y(0.0),
        };
        from.insert_vertex(id.clone(), start);
    }

    let mut continuing = 0usize;
    for (u, v, next_path) in next.edge_entries() {
        let prior = current
            .edge(u, v)
            .filter(|p| p.kind == next_path.kind && p.points.len() == next_path.points.len());
        let path = match prior {
            Some(prior) => {
                continuing += 1;
                prior.clone()
            }
            None => {
                let anchors = Anchors::new(current.vertex(u), current.vertex(v));
                tracing::trace!(u, v, kind = %next_path.kind, anchors = anchors.name(), "synthesizing entry path");
                next_path.with_points(next_path.kind.entry_points(next_path, anchors))
            }
        };
        from.insert_edge(u, v, path);
    }

    tracing::debug!(
        vertices = from.vertex_count(),
        edges = from.edge_count(),
        continuing,
        "reconciled snapshot"
    );
    from
}

/// Every point projected onto `y = 0`.
fn baseline(points: &[Point]) -> Vec<Point> {
    points.iter().map(|p| point(p.x, 0.0)).collect()
}

/// `n` points evenly spaced from `a` to `b`, inclusive.
fn spread(a: Point, b: Point, n: usize) -> Vec<Point> {
    match n {
        0 => Vec::new(),
        1 => vec![a],
        _ => (0..n)
            .map(|i| {
                if i + 1 == n {
                    b
                } else {
                    a.lerp(b, i as f64 / (n - 1) as f64)
                }
            })
            .collect(),
    }
}

/// First half of `n` points pinned to `a`, the rest to `b`.
fn split(a: Point, b: Point, n: usize) -> Vec<Point> {
    let head = n.div_ceil(2);
    (0..n).map(|i| if i < head { a } else { b }).collect()
}
