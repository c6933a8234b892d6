//! Minimal built-in layered layouter.
//!
//! Ranks vertices by longest path from the sources and stacks each rank in graph order, with
//! ranks running left to right. There is no crossing minimization; plug in a full Sugiyama
//! implementation through [`LayeredLayouter`] when edge crossings matter.

use super::LayeredLayouter;
use crate::config::LayeredConfig;
use crate::error::Result;
use crate::geom::point;
use crate::model::{EdgeKind, EdgePath, LayoutSnapshot, VertexPlacement};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use tadpole_graphlib::GraphSource;

#[derive(Debug, Clone, Default)]
pub struct LongestPathLayouter {
    pub config: LayeredConfig,
}

impl LongestPathLayouter {
    pub fn new(config: LayeredConfig) -> Self {
        Self { config }
    }
}

fn preds_of<'m, 'a>(preds: &'m HashMap<&'a str, Vec<&'a str>>, v: &str) -> &'m [&'a str] {
    preds.get(v).map(Vec::as_slice).unwrap_or_default()
}

/// Rank of every vertex: 0 for sources, otherwise one more than the highest-ranked
/// predecessor. Edges closing a cycle are ignored.
///
/// Walks predecessors depth-first with an explicit stack, so long chains do not grow the call
/// stack.
pub fn longest_path_ranks<'a>(
    vertices: &[&'a str],
    edges: &[(&'a str, &'a str)],
) -> HashMap<&'a str, usize> {
    let mut preds: HashMap<&str, Vec<&str>> = HashMap::default();
    for &(u, v) in edges {
        preds.entry(v).or_default().push(u);
    }

    let mut ranks: HashMap<&str, usize> = HashMap::default();
    let mut on_stack: HashSet<&str> = HashSet::default();
    // (vertex, index of the next predecessor to visit)
    let mut stack: Vec<(&str, usize)> = Vec::new();
    for &root in vertices {
        if ranks.contains_key(root) {
            continue;
        }
        on_stack.insert(root);
        stack.push((root, 0));
        while let Some(top) = stack.last_mut() {
            let (v, next) = *top;
            if let Some(&u) = preds_of(&preds, v).get(next) {
                top.1 += 1;
                if !ranks.contains_key(u) && on_stack.insert(u) {
                    stack.push((u, 0));
                }
                continue;
            }
            stack.pop();
            on_stack.remove(v);
            // Predecessors still on the stack close a cycle and have no rank yet.
            let rank = preds_of(&preds, v)
                .iter()
                .filter_map(|u| ranks.get(u))
                .map(|r| r + 1)
                .max()
                .unwrap_or(0);
            ranks.insert(v, rank);
        }
    }
    ranks
}

impl LayeredLayouter for LongestPathLayouter {
    fn layout(&self, graph: &dyn GraphSource) -> Result<LayoutSnapshot> {
        let cfg = &self.config;
        let vertices = graph.vertices();
        let edges = graph.edges();
        let ranks = longest_path_ranks(&vertices, &edges);

        let rank_step = cfg.vertex_width + cfg.ranksep;
        let order_step = cfg.vertex_height + cfg.nodesep;
        let mut next_order: HashMap<usize, usize> = HashMap::default();
        let mut snapshot = LayoutSnapshot::new();
        for &v in &vertices {
            let rank = ranks.get(v).copied().unwrap_or(0);
            let order = next_order.entry(rank).or_insert(0);
            snapshot.insert_vertex(
                v,
                VertexPlacement::new(
                    rank as f64 * rank_step,
                    *order as f64 * order_step,
                    cfg.vertex_width,
                    cfg.vertex_height,
                ),
            );
            *order += 1;
        }

        for &(u, v) in &edges {
            let (pu, pv) = super::endpoints(&snapshot, u, v)?;
            let start = pu.right_edge();
            let end = pv.left_edge();
            let bend = cfg.ranksep / 2.0;
            let points = vec![
                start,
                point(start.x + bend, start.y),
                point(end.x - bend, end.y),
                end,
            ];
            snapshot.insert_edge(u, v, EdgePath::new(EdgeKind::Line, cfg.edge_width, points));
        }

        tracing::debug!(
            vertices = vertices.len(),
            ranks = next_order.len(),
            "longest-path layering done"
        );
        Ok(snapshot)
    }
}
