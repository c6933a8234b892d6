#![forbid(unsafe_code)]

//! Headless layout-morph core for animated graph renderers.
//!
//! A graph is laid out in one of three modes (arc, circular, hierarchy), reconciled against the
//! layout currently on screen so that every entity has a start and an end position, and packed
//! into interleaved from/to buffers that a shader blends with a single scalar.

pub mod arc;
pub mod buffer;
pub mod config;
pub mod diff;
pub mod error;
pub mod geom;
pub mod interpolate;
pub mod layout;
pub mod model;
pub mod palette;
pub mod state;
pub mod stroke;
pub mod viewport;

pub use tadpole_graphlib as graphlib;

pub use buffer::{GeometryBuffers, PackedBuffer};
pub use config::TadpoleConfig;
pub use error::{Error, Result};
pub use layout::{LayeredLayouter, LayoutMode, LongestPathLayouter};
pub use model::{EdgeKind, EdgePath, LayoutSnapshot, VertexPlacement};
pub use state::{Pipeline, RenderState};
pub use stroke::{JoinStyle, Tessellator};
pub use viewport::ViewTransform;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
