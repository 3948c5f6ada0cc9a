//! Parsing and validation of keymap input files.
//!
//! This module reads the YAML keymap format into the [`crate::models`]
//! structures, checking grid dimensions and decoration coordinates so
//! that later stages can assume a well-formed keymap.

pub mod keymap;

// Re-export commonly used functions
pub use keymap::{parse_keymap_file, parse_keymap_str};
