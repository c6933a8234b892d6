//! Linear arrangement with semicircular edges.

use crate::arc::arc_points;
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::model::{EdgeKind, EdgePath, LayoutSnapshot, VertexPlacement};
use tadpole_graphlib::GraphSource;

/// Places vertices left to right on `y = 0`, `config.spacing` apart, in graph order.
pub fn layout(graph: &dyn GraphSource, config: &LayoutConfig) -> Result<LayoutSnapshot> {
    let mut snapshot = LayoutSnapshot::new();
    let mut offset = 0.0;
    for u in graph.vertices() {
        snapshot.insert_vertex(
            u,
            VertexPlacement::new(offset, 0.0, config.vertex_size, config.vertex_size),
        );
        offset += config.spacing;
    }

    for (u, v) in graph.edges() {
        let (pu, pv) = super::endpoints(&snapshot, u, v)?;
        let points = arc_points(pu.center(), pv.center(), config.arc_division);
        snapshot.insert_edge(u, v, EdgePath::new(EdgeKind::Arc, config.edge_width, points));
    }
    Ok(snapshot)
}
