//! LaTeX document assembly.
//!
//! Turns geometry fragments into the complete TikZ document that gets
//! handed to the typesetting toolchain.

pub mod document;

// Re-export commonly used functions
pub use document::render_document;
