#![forbid(unsafe_code)]

//! Graph container APIs used by `tadpole`.
//!
//! The container is a directed graph without parallel edges or self-loops. Vertex and edge
//! iteration order is insertion order, and stays stable across removals, which is what the
//! layout adapters rely on to place vertices deterministically.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;
type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("self-loop edges are not supported: {v} -> {v}")]
    SelfLoop { v: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Read-only view over a graph, as consumed by the layout adapters.
///
/// Both methods must return the same order on repeated calls as long as the graph is not
/// mutated in between.
pub trait GraphSource {
    fn vertices(&self) -> Vec<&str>;
    fn edges(&self) -> Vec<(&str, &str)>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub u: String,
    pub v: String,
}

impl EdgeKey {
    pub fn new(u: impl Into<String>, v: impl Into<String>) -> Self {
        Self {
            u: u.into(),
            v: v.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: FxIndexSet<String>,
    edges: FxIndexSet<EdgeKey>,
    out_adj: FxIndexMap<String, FxIndexSet<String>>,
    in_adj: FxIndexMap<String, FxIndexSet<String>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_vertex(&self, id: &str) -> bool {
        self.vertices.contains(id)
    }

    /// Inserts `id` if missing. Returns `true` when the vertex was newly added.
    pub fn add_vertex(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.vertices.contains(id.as_str()) {
            return false;
        }
        self.out_adj.insert(id.clone(), FxIndexSet::default());
        self.in_adj.insert(id.clone(), FxIndexSet::default());
        self.vertices.insert(id);
        true
    }

    /// Removes `id` together with every incident edge.
    pub fn remove_vertex(&mut self, id: &str) -> bool {
        if !self.vertices.contains(id) {
            return false;
        }
        let successors: Vec<String> = self
            .out_adj
            .get(id)
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default();
        let predecessors: Vec<String> = self
            .in_adj
            .get(id)
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default();
        for w in &successors {
            self.remove_edge(id, w);
        }
        for u in &predecessors {
            self.remove_edge(u, id);
        }
        self.out_adj.shift_remove(id);
        self.in_adj.shift_remove(id);
        self.vertices.shift_remove(id);
        true
    }

    /// Inserts the edge `u -> v`, creating missing endpoints.
    ///
    /// Returns `Ok(false)` when the edge already existed.
    pub fn add_edge(&mut self, u: impl Into<String>, v: impl Into<String>) -> Result<bool> {
        let u = u.into();
        let v = v.into();
        if u == v {
            return Err(Error::SelfLoop { v });
        }
        let key = EdgeKey::new(u.clone(), v.clone());
        if self.edges.contains(&key) {
            return Ok(false);
        }
        self.add_vertex(u.clone());
        self.add_vertex(v.clone());
        if let Some(out) = self.out_adj.get_mut(u.as_str()) {
            out.insert(v.clone());
        }
        if let Some(inc) = self.in_adj.get_mut(v.as_str()) {
            inc.insert(u);
        }
        self.edges.insert(key);
        Ok(true)
    }

    /// Chains `add_edge` over consecutive pairs of `path`.
    pub fn add_path(&mut self, path: &[&str]) -> Result<&mut Self> {
        for pair in path.windows(2) {
            self.add_edge(pair[0], pair[1])?;
        }
        Ok(self)
    }

    pub fn remove_edge(&mut self, u: &str, v: &str) -> bool {
        let key = EdgeKey::new(u, v);
        if !self.edges.shift_remove(&key) {
            return false;
        }
        if let Some(out) = self.out_adj.get_mut(u) {
            out.shift_remove(v);
        }
        if let Some(inc) = self.in_adj.get_mut(v) {
            inc.shift_remove(u);
        }
        true
    }

    pub fn has_edge(&self, u: &str, v: &str) -> bool {
        self.out_adj.get(u).is_some_and(|out| out.contains(v))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = &str> {
        self.vertices.iter().map(String::as_str)
    }

    pub fn edge_keys(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter()
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        self.out_adj
            .get(v)
            .map(|s| s.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        self.in_adj
            .get(v)
            .map(|s| s.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Vertices without incoming edges, in insertion order.
    pub fn sources(&self) -> Vec<&str> {
        self.vertices
            .iter()
            .filter(|v| self.in_adj.get(v.as_str()).is_none_or(|s| s.is_empty()))
            .map(String::as_str)
            .collect()
    }
}

impl GraphSource for Graph {
    fn vertices(&self) -> Vec<&str> {
        self.vertex_ids().collect()
    }

    fn edges(&self) -> Vec<(&str, &str)> {
        self.edges
            .iter()
            .map(|k| (k.u.as_str(), k.v.as_str()))
            .collect()
    }
}
