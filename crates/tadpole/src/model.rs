use crate::geom::{Point, point};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Position (center) and bounding box of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexPlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl VertexPlacement {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        point(self.x, self.y)
    }

    /// Midpoint of the right side of the bounding box.
    pub fn right_edge(&self) -> Point {
        point(self.x + self.width / 2.0, self.y)
    }

    /// Midpoint of the left side of the bounding box.
    pub fn left_edge(&self) -> Point {
        point(self.x - self.width / 2.0, self.y)
    }

    pub fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Straight two-point segment.
    Line,
    /// Sampled semicircle, see [`crate::arc::arc_points`].
    Arc,
    /// Six-point polyline routed by a layered layouter.
    Hierarchy,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Line => "line",
            EdgeKind::Arc => "arc",
            EdgeKind::Hierarchy => "hierarchy",
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgePath {
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub width: f64,
    pub points: Vec<Point>,
}

impl EdgePath {
    pub fn new(kind: EdgeKind, width: f64, points: Vec<Point>) -> Self {
        Self {
            kind,
            width,
            points,
        }
    }

    /// Same kind and width, different geometry.
    pub fn with_points(&self, points: Vec<Point>) -> Self {
        Self {
            kind: self.kind,
            width: self.width,
            points,
        }
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

/// A complete layout result for all vertices and edges at one point in time.
///
/// Edges are keyed `u -> v` in a nested map. Iteration follows insertion order, which the
/// layout adapters derive from the graph's own vertex/edge order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub vertices: FxIndexMap<String, VertexPlacement>,
    pub edges: FxIndexMap<String, FxIndexMap<String, EdgePath>>,
}

impl LayoutSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edge_count() == 0
    }

    pub fn vertex(&self, id: &str) -> Option<&VertexPlacement> {
        self.vertices.get(id)
    }

    pub fn insert_vertex(&mut self, id: impl Into<String>, placement: VertexPlacement) {
        self.vertices.insert(id.into(), placement);
    }

    pub fn edge(&self, u: &str, v: &str) -> Option<&EdgePath> {
        self.edges.get(u)?.get(v)
    }

    pub fn insert_edge(&mut self, u: impl Into<String>, v: impl Into<String>, path: EdgePath) {
        self.edges
            .entry(u.into())
            .or_default()
            .insert(v.into(), path);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|m| m.len()).sum()
    }

    /// Flattened `(u, v, path)` view in insertion order.
    pub fn edge_entries(&self) -> impl Iterator<Item = (&str, &str, &EdgePath)> {
        self.edges.iter().flat_map(|(u, targets)| {
            targets
                .iter()
                .map(move |(v, path)| (u.as_str(), v.as_str(), path))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_kind_serializes_lowercase_under_type_key() {
        let path = EdgePath::new(
            EdgeKind::Hierarchy,
            1.0,
            vec![point(0.0, 0.0), point(1.0, 2.0)],
        );
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json["type"], "hierarchy");
        assert_eq!(json["points"], serde_json::json!([[0.0, 0.0], [1.0, 2.0]]));
    }

    #[test]
    fn edge_entries_follow_insertion_order() {
        let mut snap = LayoutSnapshot::new();
        let path = EdgePath::new(EdgeKind::Line, 1.0, vec![point(0.0, 0.0), point(1.0, 0.0)]);
        snap.insert_edge("b", "a", path.clone());
        snap.insert_edge("a", "c", path.clone());
        snap.insert_edge("b", "c", path);

        let keys: Vec<(&str, &str)> = snap.edge_entries().map(|(u, v, _)| (u, v)).collect();
        assert_eq!(keys, vec![("b", "a"), ("b", "c"), ("a", "c")]);
        assert_eq!(snap.edge_count(), 3);
    }

    #[test]
    fn vertex_edges_of_the_box() {
        let p = VertexPlacement::new(10.0, 5.0, 20.0, 8.0);
        assert_eq!(p.right_edge(), point(20.0, 5.0));
        assert_eq!(p.left_edge(), point(0.0, 5.0));
        assert_eq!(p.with_y(0.0).center(), point(10.0, 0.0));
    }
}
