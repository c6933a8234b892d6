//! Interleaved vertex/edge buffers for the renderer.
//!
//! Vertex records (point sprites), 11 floats each:
//! `fromX, fromY, fromZ, toX, toY, toZ, r, g, b, a, size`.
//!
//! Edge records (one per ribbon point), 10 floats each:
//! `fromX, fromY, fromZ, toX, toY, toZ, r, g, b, a`.
//!
//! Z is always 0. Indices are `u16` and `0xFFFF` is the primitive-restart index under WebGL2,
//! so neither buffer may hold more than [`INDEX_LIMIT`] records.

use crate::error::{Error, Result};
use crate::geom::Point;
use crate::model::{LayoutSnapshot, VertexPlacement};
use crate::palette::{Color, Palette};
use crate::stroke::Tessellator;
use serde::Serialize;

pub const VERTEX_STRIDE: usize = 11;
pub const EDGE_STRIDE: usize = 10;
/// Largest record count whose indices all stay below `0xFFFF`.
pub const INDEX_LIMIT: usize = u16::MAX as usize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PackedBuffer {
    pub stride: usize,
    pub data: Vec<f32>,
    pub indices: Vec<u16>,
}

impl PackedBuffer {
    fn with_capacity(stride: usize, records: usize, indices: usize) -> Self {
        Self {
            stride,
            data: Vec::with_capacity(records * stride),
            indices: Vec::with_capacity(indices),
        }
    }

    pub fn record_count(&self) -> usize {
        self.data.len().checked_div(self.stride).unwrap_or(0)
    }

    /// The `i`-th record, `stride` floats long.
    pub fn record(&self, i: usize) -> Option<&[f32]> {
        self.data.get(i * self.stride..(i + 1) * self.stride)
    }

    fn push_positions(&mut self, from: Point, to: Point) {
        self.data.extend_from_slice(&[
            from.x as f32,
            from.y as f32,
            0.0,
            to.x as f32,
            to.y as f32,
            0.0,
        ]);
    }

    fn push_color(&mut self, color: Color) {
        self.data.extend_from_slice(&color.to_array());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeometryBuffers {
    pub vertices: PackedBuffer,
    pub edges: PackedBuffer,
}

fn check_capacity(buffer: &'static str, count: usize) -> Result<()> {
    if count > INDEX_LIMIT {
        return Err(Error::IndexOverflow {
            buffer,
            count,
            limit: INDEX_LIMIT,
        });
    }
    Ok(())
}

/// One point-sprite record per vertex of `next`, in `next` order.
pub fn pack_vertices(
    from: &LayoutSnapshot,
    next: &LayoutSnapshot,
    palette: &dyn Palette,
) -> Result<PackedBuffer> {
    let count = next.vertex_count();
    check_capacity("vertex", count)?;

    let mut buf = PackedBuffer::with_capacity(VERTEX_STRIDE, count, count);
    for (i, (id, to)) in next.vertices.iter().enumerate() {
        let start: &VertexPlacement = from.vertex(id).unwrap_or(to);
        let style = palette.vertex_style(id);
        buf.push_positions(start.center(), to.center());
        buf.push_color(style.color);
        buf.data.push(style.size);
        buf.indices.push(i as u16);
    }
    Ok(buf)
}

/// Ribbon records for every edge of `next`, paired with the ribbon of the matching `from` edge.
///
/// Each path segment becomes a quad of two triangles over consecutive ribbon pairs.
pub fn pack_edges(
    from: &LayoutSnapshot,
    next: &LayoutSnapshot,
    tessellator: &dyn Tessellator,
    palette: &dyn Palette,
) -> Result<PackedBuffer> {
    let records: usize = next.edge_entries().map(|(_, _, p)| 2 * p.points.len()).sum();
    check_capacity("edge", records)?;
    let triangles: usize = next
        .edge_entries()
        .map(|(_, _, p)| 2 * p.points.len().saturating_sub(1))
        .sum();

    let mut buf = PackedBuffer::with_capacity(EDGE_STRIDE, records, 3 * triangles);
    let mut base = 0usize;
    for (u, v, to_path) in next.edge_entries() {
        let to_ribbon = tessellator.tessellate(&to_path.points, to_path.width);
        let from_ribbon = match from.edge(u, v) {
            Some(p) if p.points.len() == to_path.points.len() => {
                tessellator.tessellate(&p.points, p.width)
            }
            _ => {
                tracing::trace!(u, v, "no congruent from-path, packing a static edge");
                to_ribbon.clone()
            }
        };
        let color = palette.edge_color(u, v);

        for (a, b) in from_ribbon.as_slice().iter().zip(to_ribbon.as_slice()) {
            buf.push_positions(*a, *b);
            buf.push_color(color);
        }
        for j in 0..to_path.points.len().saturating_sub(1) {
            let s = (base + 2 * j) as u16;
            buf.indices
                .extend_from_slice(&[s, s + 1, s + 2, s + 1, s + 2, s + 3]);
        }
        base += to_ribbon.len();
    }
    Ok(buf)
}

/// Packs both buffers for a `from -> next` transition.
pub fn pack(
    from: &LayoutSnapshot,
    next: &LayoutSnapshot,
    tessellator: &dyn Tessellator,
    palette: &dyn Palette,
) -> Result<GeometryBuffers> {
    let vertices = pack_vertices(from, next, palette)?;
    let edges = pack_edges(from, next, tessellator, palette)?;
    tracing::debug!(
        vertex_records = vertices.record_count(),
        edge_records = edges.record_count(),
        edge_indices = edges.indices.len(),
        "packed geometry buffers"
    );
    Ok(GeometryBuffers { vertices, edges })
}
