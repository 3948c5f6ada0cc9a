//! Keymap Diagram Library
//!
//! This library provides core functionality for the keymaptex tool,
//! including parsing split-keyboard keymaps from YAML, computing the
//! diagram layout, emitting LaTeX/TikZ source, and driving the
//! typesetting toolchain that turns it into a PDF.

// Module declarations
pub mod app;
pub mod error;
pub mod models;
pub mod parser;
pub mod render;
pub mod services;
pub mod typeset;
