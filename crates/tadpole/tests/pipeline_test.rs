use tadpole::buffer::{EDGE_STRIDE, VERTEX_STRIDE};
use tadpole::config::LayoutConfig;
use tadpole::diff::reconcile;
use tadpole::geom::point;
use tadpole::graphlib::{Graph, GraphSource};
use tadpole::layout::{self, hierarchy::HIERARCHY_POINTS};
use tadpole::{
    EdgeKind, EdgePath, Error, LayeredLayouter, LayoutMode, LayoutSnapshot, LongestPathLayouter,
    Pipeline, TadpoleConfig, VertexPlacement,
};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9
}

fn arc_pipeline(division: usize) -> Pipeline {
    let mut config = TadpoleConfig::default();
    config.layout.arc_division = division;
    Pipeline::new(config)
}

fn assert_congruent(from: &LayoutSnapshot, next: &LayoutSnapshot) {
    let from_ids: Vec<&String> = from.vertices.keys().collect();
    let next_ids: Vec<&String> = next.vertices.keys().collect();
    assert_eq!(from_ids, next_ids);
    assert_eq!(from.edge_count(), next.edge_count());
    for (u, v, path) in next.edge_entries() {
        let start = from
            .edge(u, v)
            .unwrap_or_else(|| panic!("missing from-edge {u}->{v}"));
        assert_eq!(start.points.len(), path.points.len(), "{u}->{v}");
    }
}

#[test]
fn arc_pair_is_a_semicircle_over_the_baseline() {
    let pipeline = arc_pipeline(4);
    let mut g = Graph::new();
    g.add_edge("A", "B").unwrap();

    let (state, buffers) = pipeline
        .relayout(&pipeline.initial_state(), &g, LayoutMode::Arc, 0.0)
        .unwrap();
    let next = state.target();
    assert_eq!(next.vertex("A").unwrap().center(), point(0.0, 0.0));
    assert_eq!(next.vertex("B").unwrap().center(), point(100.0, 0.0));

    let edge = next.edge("A", "B").unwrap();
    assert_eq!(edge.kind, EdgeKind::Arc);
    assert_eq!(edge.points.len(), 5);
    assert_eq!(edge.first(), Some(point(0.0, 0.0)));
    assert_eq!(edge.last(), Some(point(100.0, 0.0)));
    for p in &edge.points {
        assert!(approx_eq((*p - point(50.0, 0.0)).length(), 50.0));
    }
    assert!(approx_eq(edge.points[2].x, 50.0));
    assert!(approx_eq(edge.points[2].y.abs(), 50.0));

    // The from-edge of a brand new edge between brand new vertices lies on the baseline.
    let start = state.from().edge("A", "B").unwrap();
    assert!(start.points.iter().all(|p| p.y == 0.0));

    assert_eq!(buffers.vertices.data.len(), 2 * VERTEX_STRIDE);
    assert_eq!(buffers.edges.data.len(), 10 * EDGE_STRIDE);
    assert_eq!(buffers.edges.indices.len(), 4 * 6);
}

#[test]
fn edge_to_a_new_vertex_grows_out_of_its_anchor() {
    let pipeline = arc_pipeline(4);
    let mut g = Graph::new();
    g.add_edge("A", "B").unwrap();
    let (settled, _) = pipeline
        .relayout(&pipeline.initial_state(), &g, LayoutMode::Arc, 0.0)
        .unwrap();

    g.add_edge("B", "C").unwrap();
    let (state, _) = pipeline
        .relayout(&settled, &g, LayoutMode::Arc, 10_000.0)
        .unwrap();
    let from = state.from();

    assert_eq!(from.vertex("A"), settled.target().vertex("A"));
    assert_eq!(from.vertex("C").unwrap().center(), point(200.0, 0.0));
    assert_eq!(from.edge("A", "B"), settled.target().edge("A", "B"));

    let grown = from.edge("B", "C").unwrap();
    assert_eq!(grown.points.len(), 5);
    assert_eq!(grown.first(), Some(point(100.0, 0.0)));
    assert_eq!(grown.last(), Some(point(200.0, 0.0)));
    assert_congruent(from, state.target());
}

#[test]
fn every_mode_switch_yields_a_congruent_from_snapshot() {
    let pipeline = Pipeline::default();
    let mut g = Graph::new();
    g.add_path(&["a", "b", "c", "d"]).unwrap();
    g.add_edge("a", "c").unwrap();

    let modes = [
        LayoutMode::Hierarchy,
        LayoutMode::Arc,
        LayoutMode::Circular,
        LayoutMode::Hierarchy,
        LayoutMode::Circular,
        LayoutMode::Arc,
    ];
    let mut state = pipeline.initial_state();
    let mut now = 0.0;
    for (i, mode) in modes.into_iter().enumerate() {
        if i == 3 {
            g.add_edge("d", "e").unwrap();
            g.remove_vertex("b");
        }
        let (next_state, buffers) = pipeline.relayout(&state, &g, mode, now).unwrap();
        assert_congruent(next_state.from(), next_state.target());
        assert_eq!(buffers.vertices.record_count(), g.vertex_count());
        let ribbon_points: usize = next_state
            .target()
            .edge_entries()
            .map(|(_, _, p)| 2 * p.points.len())
            .sum();
        assert_eq!(buffers.edges.record_count(), ribbon_points);
        state = next_state;
        now += 250.0;
    }
}

#[test]
fn reconciling_a_layout_with_itself_is_identity() {
    let config = LayoutConfig::default();
    let layered: &dyn LayeredLayouter = &LongestPathLayouter::default();
    let mut g = Graph::new();
    g.add_path(&["x", "y", "z"]).unwrap();
    g.add_edge("x", "z").unwrap();
    for mode in [LayoutMode::Arc, LayoutMode::Circular, LayoutMode::Hierarchy] {
        let snap = layout::compute(&g, mode, &config, Some(layered)).unwrap();
        assert_eq!(reconcile(&snap, &snap), snap, "{mode}");
    }
}

#[test]
fn built_in_layered_layouter_feeds_six_point_hierarchy_edges() {
    let pipeline = Pipeline::default();
    let mut g = Graph::new();
    g.add_path(&["a", "b", "c"]).unwrap();
    g.add_edge("a", "c").unwrap();

    let (state, _) = pipeline
        .relayout(&pipeline.initial_state(), &g, LayoutMode::Hierarchy, 0.0)
        .unwrap();
    let next = state.target();
    assert_eq!(next.edge_count(), 3);
    for (u, v, path) in next.edge_entries() {
        assert_eq!(path.kind, EdgeKind::Hierarchy, "{u}->{v}");
        assert_eq!(path.points.len(), HIERARCHY_POINTS, "{u}->{v}");
    }
    let a = next.vertex("a").unwrap();
    let c = next.vertex("c").unwrap();
    assert!(c.x > a.x);
}

#[test]
fn hierarchy_without_a_layouter_is_an_error() {
    let pipeline = Pipeline::default().without_layered_layouter();
    let mut g = Graph::new();
    g.add_edge("a", "b").unwrap();
    let initial = pipeline.initial_state();
    let err = pipeline
        .relayout(&initial, &g, LayoutMode::Hierarchy, 0.0)
        .unwrap_err();
    assert!(matches!(err, Error::MissingLayeredLayouter));
}

#[test]
fn unknown_mode_names_are_rejected() {
    let err = "spiral".parse::<LayoutMode>().unwrap_err();
    assert!(matches!(err, Error::UnknownLayoutMode { ref mode } if mode == "spiral"));
    assert_eq!(" Circular ".parse::<LayoutMode>().unwrap(), LayoutMode::Circular);
}

/// Routes every edge through a long zigzag.
struct ZigzagLayouter;

impl LayeredLayouter for ZigzagLayouter {
    fn layout(&self, graph: &dyn GraphSource) -> tadpole::Result<LayoutSnapshot> {
        let mut snap = LayoutSnapshot::new();
        for (i, v) in graph.vertices().into_iter().enumerate() {
            snap.insert_vertex(v, VertexPlacement::new(100.0 * i as f64, 0.0, 20.0, 20.0));
        }
        for (u, v) in graph.edges() {
            let x0 = snap.vertex(u).map(|p| p.x).unwrap_or_default();
            let points = (0..11)
                .map(|k| point(x0 + 10.0 * k as f64, if k % 2 == 0 { 0.0 } else { 5.0 }))
                .collect();
            snap.insert_edge(u, v, EdgePath::new(EdgeKind::Line, 2.0, points));
        }
        Ok(snap)
    }
}

#[test]
fn custom_layered_layouter_paths_are_normalized() {
    let pipeline = Pipeline::default().with_layered_layouter(Box::new(ZigzagLayouter));
    let mut g = Graph::new();
    g.add_edge("a", "b").unwrap();

    let (state, _) = pipeline
        .relayout(&pipeline.initial_state(), &g, LayoutMode::Hierarchy, 0.0)
        .unwrap();
    let edge = state.target().edge("a", "b").unwrap();
    assert_eq!(edge.kind, EdgeKind::Hierarchy);
    assert_eq!(edge.width, 2.0);
    assert_eq!(edge.points.len(), HIERARCHY_POINTS);
    assert_eq!(edge.first(), Some(point(0.0, 0.0)));
    assert_eq!(edge.last(), Some(point(100.0, 0.0)));
}
