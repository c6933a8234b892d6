//! Runtime configuration.
//!
//! Every field has a default, so a config document only needs to mention what it overrides:
//!
//! ```json
//! { "layout": { "arc_division": 16 }, "transition_duration_ms": 250, "join": "bevel" }
//! ```

use crate::error::{Error, Result};
use crate::palette::{Color, PaletteKind};
use crate::stroke::JoinStyle;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between neighboring vertices (arc layout) or arc length per vertex (circular).
    pub spacing: f64,
    /// Width and height given to vertices by the arc and circular layouts.
    pub vertex_size: f64,
    /// Stroke width stamped on edges produced by the arc and circular layouts.
    pub edge_width: f64,
    pub arc_division: usize,
    /// Horizontal offset applied to a zero-length first/last hierarchy segment.
    pub hierarchy_nudge: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: 100.0,
            vertex_size: 20.0,
            edge_width: 1.0,
            arc_division: crate::arc::DEFAULT_DIVISION,
            hierarchy_nudge: 10.0,
        }
    }
}

/// Spacing used by the built-in [`crate::layout::LongestPathLayouter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayeredConfig {
    pub nodesep: f64,
    pub ranksep: f64,
    pub vertex_width: f64,
    pub vertex_height: f64,
    pub edge_width: f64,
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self {
            nodesep: 50.0,
            ranksep: 50.0,
            vertex_width: 20.0,
            vertex_height: 20.0,
            edge_width: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub kind: PaletteKind,
    pub seed: u64,
    pub vertex_color: Color,
    pub edge_color: Color,
    pub vertex_size: f32,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            kind: PaletteKind::Uniform,
            seed: 0,
            vertex_color: Color::new(0.2, 0.4, 0.8, 1.0),
            edge_color: Color::new(0.5, 0.5, 0.5, 1.0),
            vertex_size: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TadpoleConfig {
    pub layout: LayoutConfig,
    pub layered: LayeredConfig,
    pub transition_duration_ms: f64,
    pub join: JoinStyle,
    /// Canvas margin kept free by [`crate::viewport::center_transform`].
    pub margin: f64,
    pub palette: PaletteConfig,
}

impl Default for TadpoleConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            layered: LayeredConfig::default(),
            transition_duration_ms: 500.0,
            join: JoinStyle::default(),
            margin: 10.0,
            palette: PaletteConfig::default(),
        }
    }
}

impl TadpoleConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let cfg: Self = serde_json::from_value(value)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        fn invalid(message: impl Into<String>) -> Error {
            Error::InvalidConfig {
                message: message.into(),
            }
        }

        if self.layout.arc_division == 0 {
            return Err(invalid("layout.arc_division must be at least 1"));
        }
        for (name, value) in [
            ("layout.spacing", self.layout.spacing),
            ("layout.vertex_size", self.layout.vertex_size),
            ("layout.edge_width", self.layout.edge_width),
            ("layered.nodesep", self.layered.nodesep),
            ("layered.ranksep", self.layered.ranksep),
            ("layered.vertex_width", self.layered.vertex_width),
            ("layered.vertex_height", self.layered.vertex_height),
            ("layered.edge_width", self.layered.edge_width),
            ("palette.vertex_size", f64::from(self.palette.vertex_size)),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if !self.layout.hierarchy_nudge.is_finite() {
            return Err(invalid(format!(
                "layout.hierarchy_nudge must be finite, got {}",
                self.layout.hierarchy_nudge
            )));
        }
        if !(self.transition_duration_ms.is_finite() && self.transition_duration_ms >= 0.0) {
            return Err(invalid(format!(
                "transition_duration_ms must be non-negative, got {}",
                self.transition_duration_ms
            )));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(invalid(format!(
                "margin must be non-negative, got {}",
                self.margin
            )));
        }
        Ok(())
    }
}
