//! Pipeline driver and the per-renderer transition state.

use crate::buffer::{self, GeometryBuffers};
use crate::config::TadpoleConfig;
use crate::diff;
use crate::error::Result;
use crate::interpolate::{blend, blend_factor};
use crate::layout::{self, LayeredLayouter, LayoutMode, LongestPathLayouter};
use crate::model::LayoutSnapshot;
use crate::palette::{self, Palette};
use tadpole_graphlib::GraphSource;

/// What one renderer has on screen: a transition from `from` to `target` that started at
/// `started_at_ms` and lasts `duration_ms`.
///
/// A fresh state is settled on an empty layout.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    target: LayoutSnapshot,
    from: LayoutSnapshot,
    started_at_ms: f64,
    duration_ms: f64,
}

impl RenderState {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            target: LayoutSnapshot::new(),
            from: LayoutSnapshot::new(),
            started_at_ms: 0.0,
            duration_ms,
        }
    }

    pub fn target(&self) -> &LayoutSnapshot {
        &self.target
    }

    pub fn from(&self) -> &LayoutSnapshot {
        &self.from
    }

    pub fn started_at_ms(&self) -> f64 {
        self.started_at_ms
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// The scalar handed to the renderer each frame.
    pub fn blend_factor(&self, now_ms: f64) -> f64 {
        blend_factor(now_ms, self.started_at_ms, self.duration_ms)
    }

    pub fn is_settled(&self, now_ms: f64) -> bool {
        self.blend_factor(now_ms) >= 1.0
    }

    /// The layout as drawn at `now_ms`.
    pub fn displayed(&self, now_ms: f64) -> LayoutSnapshot {
        let r = self.blend_factor(now_ms);
        if r >= 1.0 {
            return self.target.clone();
        }
        blend(&self.from, &self.target, r)
    }
}

/// Immutable pipeline settings: config, layered layouter and palette.
pub struct Pipeline {
    config: TadpoleConfig,
    layered: Option<Box<dyn LayeredLayouter>>,
    palette: Box<dyn Palette>,
}

impl Pipeline {
    /// Uses the built-in [`LongestPathLayouter`] for hierarchy mode.
    pub fn new(config: TadpoleConfig) -> Self {
        let layered = LongestPathLayouter::new(config.layered.clone());
        let palette = palette::from_config(&config.palette);
        Self {
            config,
            layered: Some(Box::new(layered)),
            palette,
        }
    }

    pub fn with_layered_layouter(mut self, layered: Box<dyn LayeredLayouter>) -> Self {
        self.layered = Some(layered);
        self
    }

    pub fn without_layered_layouter(mut self) -> Self {
        self.layered = None;
        self
    }

    pub fn with_palette(mut self, palette: Box<dyn Palette>) -> Self {
        self.palette = palette;
        self
    }

    pub fn config(&self) -> &TadpoleConfig {
        &self.config
    }

    /// A settled, empty state with this pipeline's transition duration.
    pub fn initial_state(&self) -> RenderState {
        RenderState::new(self.config.transition_duration_ms)
    }

    /// Lays out `graph` and starts a transition towards it at `now_ms`.
    ///
    /// The transition starts from what `state` displays at `now_ms`, so a relayout issued
    /// mid-transition continues from the in-between frame rather than from the previous
    /// target. `state` is left untouched; on success the caller replaces it with the returned
    /// state.
    pub fn relayout(
        &self,
        state: &RenderState,
        graph: &dyn GraphSource,
        mode: LayoutMode,
        now_ms: f64,
    ) -> Result<(RenderState, GeometryBuffers)> {
        let next = layout::compute(graph, mode, &self.config.layout, self.layered.as_deref())?;
        let on_screen = state.displayed(now_ms);
        let from = diff::reconcile(&on_screen, &next);
        let buffers = buffer::pack(&from, &next, &self.config.join, self.palette.as_ref())?;

        tracing::debug!(
            mode = mode.as_str(),
            now_ms,
            interrupted = !state.is_settled(now_ms),
            "relayout"
        );
        let state = RenderState {
            target: next,
            from,
            started_at_ms: now_ms,
            duration_ms: self.config.transition_duration_ms,
        };
        Ok((state, buffers))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(TadpoleConfig::default())
    }
}
