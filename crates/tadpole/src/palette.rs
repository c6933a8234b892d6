//! Vertex and edge colors for the packed buffers.

use crate::config::PaletteConfig;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Linear RGBA, each channel in `[0, 1]`. Serialized as `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    #[default]
    Uniform,
    Hashed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexStyle {
    pub color: Color,
    /// Point-sprite size in layout units.
    pub size: f32,
}

pub trait Palette {
    fn vertex_style(&self, id: &str) -> VertexStyle;
    fn edge_color(&self, u: &str, v: &str) -> Color;
}

/// One color for every vertex, another for every edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformPalette {
    pub vertex: VertexStyle,
    pub edge: Color,
}

impl Palette for UniformPalette {
    fn vertex_style(&self, _id: &str) -> VertexStyle {
        self.vertex
    }

    fn edge_color(&self, _u: &str, _v: &str) -> Color {
        self.edge
    }
}

/// Stable pseudo-random colors derived from entity ids.
///
/// The same id always gets the same color for a given seed, so an entity keeps its color
/// across relayouts. Vertex sizes fall in `[5, 15)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HashedPalette {
    pub seed: u64,
}

impl HashedPalette {
    fn hash(&self, parts: &[&str]) -> u64 {
        let mut h = FxHasher::default();
        self.seed.hash(&mut h);
        parts.hash(&mut h);
        // FxHash mixes poorly in the low bits; finish with a splitmix64 round.
        let mut x = h.finish();
        x ^= x >> 30;
        x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        x ^= x >> 27;
        x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
        x ^ (x >> 31)
    }

    fn channels(bits: u64) -> [f32; 4] {
        let unit = |shift: u32| ((bits >> shift) & 0xffff) as f32 / 65_536.0;
        [unit(0), unit(16), unit(32), unit(48)]
    }
}

impl Palette for HashedPalette {
    fn vertex_style(&self, id: &str) -> VertexStyle {
        let [r, g, b, s] = Self::channels(self.hash(&[id]));
        VertexStyle {
            color: Color::new(r, g, b, 1.0),
            size: 10.0 * s + 5.0,
        }
    }

    fn edge_color(&self, u: &str, v: &str) -> Color {
        let [r, g, b, _] = Self::channels(self.hash(&[u, v]));
        Color::new(r, g, b, 1.0)
    }
}

/// Builds the palette selected by `config`.
pub fn from_config(config: &PaletteConfig) -> Box<dyn Palette> {
    match config.kind {
        PaletteKind::Uniform => Box::new(UniformPalette {
            vertex: VertexStyle {
                color: config.vertex_color,
                size: config.vertex_size,
            },
            edge: config.edge_color,
        }),
        PaletteKind::Hashed => Box::new(HashedPalette { seed: config.seed }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_colors_are_stable_and_in_range() {
        let p = HashedPalette { seed: 7 };
        let a = p.vertex_style("alpha");
        assert_eq!(a, p.vertex_style("alpha"));
        for c in a.color.to_array() {
            assert!((0.0..=1.0).contains(&c));
        }
        assert!((5.0..15.0).contains(&a.size));
        assert_ne!(p.edge_color("a", "b"), p.edge_color("b", "a"));
    }

    #[test]
    fn seed_changes_colors() {
        let a = HashedPalette { seed: 1 }.vertex_style("x");
        let b = HashedPalette { seed: 2 }.vertex_style("x");
        assert_ne!(a.color, b.color);
    }

    #[test]
    fn color_round_trips_as_array() {
        let c: Color = serde_json::from_str("[0.5, 0.25, 1.0, 1.0]").unwrap();
        assert_eq!(c, Color::new(0.5, 0.25, 1.0, 1.0));
    }
}
