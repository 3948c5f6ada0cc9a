//! Service layer for diagram computation.
//!
//! This module holds the placement engine that turns parsed layers into
//! drawing-ready fragments.

pub mod geometry;

// Re-export commonly used types and functions
pub use geometry::{layer_fragment, GeometryConfig, LayerFragment};
