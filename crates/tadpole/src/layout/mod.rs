//! Layout adapters: turn a graph into a [`LayoutSnapshot`].

pub mod arc;
pub mod circular;
pub mod hierarchy;
pub mod layered;

pub use layered::LongestPathLayouter;

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::model::{LayoutSnapshot, VertexPlacement};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tadpole_graphlib::GraphSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    Arc,
    Circular,
    #[default]
    Hierarchy,
}

impl LayoutMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::Arc => "arc",
            LayoutMode::Circular => "circular",
            LayoutMode::Hierarchy => "hierarchy",
        }
    }
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arc" => Ok(Self::Arc),
            "circular" => Ok(Self::Circular),
            "hierarchy" => Ok(Self::Hierarchy),
            _ => Err(Error::UnknownLayoutMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// External layered (Sugiyama-style) layout algorithm.
///
/// Implementations place every vertex and route every edge of `graph`. Edge paths may carry any
/// number of points and any kind; [`hierarchy::layout`] normalizes them afterwards.
pub trait LayeredLayouter {
    fn layout(&self, graph: &dyn GraphSource) -> Result<LayoutSnapshot>;
}

/// Runs the adapter for `mode`.
///
/// `layered` is only consulted for [`LayoutMode::Hierarchy`], which fails with
/// [`Error::MissingLayeredLayouter`] when it is `None`.
pub fn compute(
    graph: &dyn GraphSource,
    mode: LayoutMode,
    config: &LayoutConfig,
    layered: Option<&dyn LayeredLayouter>,
) -> Result<LayoutSnapshot> {
    let snapshot = match mode {
        LayoutMode::Arc => arc::layout(graph, config)?,
        LayoutMode::Circular => circular::layout(graph, config)?,
        LayoutMode::Hierarchy => {
            let layered = layered.ok_or(Error::MissingLayeredLayouter)?;
            hierarchy::layout(graph, config, layered)?
        }
    };
    tracing::debug!(
        mode = mode.as_str(),
        vertices = snapshot.vertex_count(),
        edges = snapshot.edge_count(),
        "layout computed"
    );
    Ok(snapshot)
}

/// Placements of both endpoints of `u -> v`, which must already be in `snapshot`.
pub(crate) fn endpoints(
    snapshot: &LayoutSnapshot,
    u: &str,
    v: &str,
) -> Result<(VertexPlacement, VertexPlacement)> {
    match (snapshot.vertex(u), snapshot.vertex(v)) {
        (Some(pu), Some(pv)) => Ok((*pu, *pv)),
        _ => Err(Error::MissingEndpoint {
            u: u.to_string(),
            v: v.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tadpole_graphlib::Graph;

    #[test]
    fn modes_parse_case_insensitively() {
        assert_eq!("arc".parse::<LayoutMode>().unwrap(), LayoutMode::Arc);
        assert_eq!(" Circular ".parse::<LayoutMode>().unwrap(), LayoutMode::Circular);
        assert_eq!("HIERARCHY".parse::<LayoutMode>().unwrap(), LayoutMode::Hierarchy);
    }

    #[test]
    fn unknown_mode_is_an_error() {
        let err = "force".parse::<LayoutMode>().unwrap_err();
        assert!(matches!(err, Error::UnknownLayoutMode { ref mode } if mode == "force"));
    }

    #[test]
    fn hierarchy_without_layouter_fails_loudly() {
        let mut g = Graph::new();
        g.add_edge("a", "b").unwrap();
        let err = compute(&g, LayoutMode::Hierarchy, &LayoutConfig::default(), None).unwrap_err();
        assert!(matches!(err, Error::MissingLayeredLayouter));
    }
}
