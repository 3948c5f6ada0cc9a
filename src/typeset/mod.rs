//! Seams to the external toolchain: LaTeX compilation and PDF viewing.
//!
//! Both are narrow traits so the pipeline can be exercised in tests
//! without a TeX installation or a desktop session.

pub mod compiler;
pub mod viewer;

// Re-export commonly used types
pub use compiler::{CompileError, DocumentCompiler, LatexmkCompiler};
pub use viewer::{DocumentViewer, SystemViewer};
