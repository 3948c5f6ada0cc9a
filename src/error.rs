//! User-facing diagnostics for the render pipeline.
//!
//! Every failure the tool reports maps to one variant here. The `Display`
//! output of a variant is exactly what gets printed before exiting, so
//! the wording is part of the tool's observable behavior and is asserted
//! by the end-to-end tests.

use crate::typeset::CompileError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a keymap render run.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The command line did not name exactly one input file.
    #[error("Must provide a single .yaml file to process!\nUsage: keymaptex <keymap.yaml>")]
    Usage,

    /// The input path does not point at a regular file.
    #[error("{} is not a file!", .0.display())]
    NotAFile(PathBuf),

    /// The input file is not well-formed YAML.
    #[error("ERROR: Cannot parse {}!\n{source}", path.display())]
    Parse {
        /// Resolved path of the offending file
        path: PathBuf,
        /// Underlying YAML error with line and column
        source: serde_yml::Error,
    },

    /// The `keyboard` block or its dimension fields are missing.
    #[error(
        "ERROR: Must have a top-level YAML entry for 'keyboard',\n\
         identifying both 'rows' and 'columns' fields (missing: {})",
        missing.join(", ")
    )]
    MissingDimensions {
        /// Which of `rows` and `columns` could not be read
        missing: Vec<&'static str>,
    },

    /// A document-level field carries an unusable value.
    #[error("ERROR: {0}")]
    InvalidDocument(String),

    /// A layer body does not match the keyboard dimensions.
    #[error("ERROR: Invalid layer '{layer}': {detail}")]
    InvalidLayer {
        /// Name of the offending layer
        layer: String,
        /// What is wrong with it
        detail: String,
    },

    /// The external LaTeX compiler failed.
    #[error("ERROR: Cannot compile {}!\n{}", .0.tex_path.display(), .0.detail)]
    Compile(#[from] CompileError),

    /// Filesystem plumbing failed (staging the source, copying the PDF).
    #[error("ERROR: {0:#}")]
    Io(#[from] anyhow::Error),
}
