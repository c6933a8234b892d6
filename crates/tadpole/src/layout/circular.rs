//! Vertices on a circle, straight edges.

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::model::{EdgeKind, EdgePath, LayoutSnapshot, VertexPlacement};
use std::f64::consts::{FRAC_PI_2, TAU};
use tadpole_graphlib::GraphSource;

/// Places vertices clockwise on a circle centered at the origin, starting at the top.
///
/// The radius grows with the vertex count so that neighbors sit `config.spacing` apart along
/// the circumference.
pub fn layout(graph: &dyn GraphSource, config: &LayoutConfig) -> Result<LayoutSnapshot> {
    let vertices = graph.vertices();
    let n = vertices.len();
    let radius = config.spacing * n as f64 / TAU;

    let mut snapshot = LayoutSnapshot::new();
    for (i, u) in vertices.into_iter().enumerate() {
        let theta = TAU * i as f64 / n as f64 - FRAC_PI_2;
        snapshot.insert_vertex(
            u,
            VertexPlacement::new(
                radius * theta.cos(),
                radius * theta.sin(),
                config.vertex_size,
                config.vertex_size,
            ),
        );
    }

    for (u, v) in graph.edges() {
        let (pu, pv) = super::endpoints(&snapshot, u, v)?;
        snapshot.insert_edge(
            u,
            v,
            EdgePath::new(
                EdgeKind::Line,
                config.edge_width,
                vec![pu.center(), pv.center()],
            ),
        );
    }
    Ok(snapshot)
}
