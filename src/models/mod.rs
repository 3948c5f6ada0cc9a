//! Data models for keymaps, layers, and key cells.
//!
//! This module contains the core data structures shared by the parser,
//! the geometry engine, and the document renderer. Models are independent
//! of the YAML input format and of the LaTeX output.

pub mod keymap;

// Re-export all model types
pub use keymap::{
    KeyCell, Keymap, Layer, Position, ABSENT_KEY_MARKER, DEFAULT_KEYBOARD_NAME, ROW_BOTTOM,
    ROW_MIDDLE, ROW_THUMB, ROW_TOP, THUMB_CELLS, THUMB_KEYS_PER_HAND,
};
