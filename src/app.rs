//! The render pipeline.
//!
//! Chains the stages of a single render run: resolve the input path,
//! parse the keymap, lay out and emit the LaTeX document, hand it to
//! the typesetting toolchain, then deliver and display the PDF.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::error::RenderError;
use crate::parser;
use crate::render;
use crate::services::geometry::GeometryConfig;
use crate::typeset::{DocumentCompiler, DocumentViewer};

/// Where the pipeline stages its work and delivers the result.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Diagram dimensions used for key placement
    pub geometry: GeometryConfig,
    /// Directory the LaTeX source is written into; the compiler also
    /// leaves its byproducts here
    pub staging_dir: PathBuf,
    /// Directory the finished PDF is copied into
    pub output_dir: PathBuf,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            staging_dir: env::temp_dir(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Renders one keymap file end to end and returns the path of the
/// delivered PDF.
///
/// On a compile failure the compiler's log file, when one exists, is
/// opened in the viewer before the error is returned.
///
/// # Errors
///
/// Returns a [`RenderError`] describing the first stage that failed.
pub fn render_keymap(
    input: &Path,
    options: &RenderOptions,
    compiler: &impl DocumentCompiler,
    viewer: &impl DocumentViewer,
) -> Result<PathBuf, RenderError> {
    let resolved = std::path::absolute(input).unwrap_or_else(|_| input.to_path_buf());
    if !resolved.is_file() {
        return Err(RenderError::NotAFile(resolved));
    }

    let keymap = parser::parse_keymap_file(&resolved)?;
    info!(
        "parsed '{}': {} layer(s), {} columns",
        keymap.name,
        keymap.layers.len(),
        keymap.columns
    );

    let document = render::render_document(&keymap, &options.geometry);
    let source = stage_source(&document, &resolved, &options.staging_dir)?;
    info!("staged LaTeX source at {}", source.display());

    let artifact = match compiler.compile(&source) {
        Ok(artifact) => artifact,
        Err(e) => {
            if let Some(log) = &e.log {
                viewer.open(log);
            }
            return Err(e.into());
        }
    };

    let delivered = deliver_artifact(&artifact, &options.output_dir)?;
    info!("delivered {}", delivered.display());
    viewer.open(&delivered);
    Ok(delivered)
}

/// Writes the document into the staging directory, named after the
/// input file with `.tex` appended to its stem.
fn stage_source(document: &str, input: &Path, staging_dir: &Path) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .with_context(|| format!("{} has no file name", input.display()))?;
    let mut file_name = stem.to_os_string();
    file_name.push(".tex");
    let path = staging_dir.join(file_name);
    fs::write(&path, document).with_context(|| format!("Cannot write {}", path.display()))?;
    Ok(path)
}

/// Copies the compiled artifact into the output directory under its
/// own file name. The copy is skipped when staging and output resolve
/// to the same file, where `fs::copy` would truncate the artifact
/// before reading it back.
fn deliver_artifact(artifact: &Path, output_dir: &Path) -> Result<PathBuf> {
    let file_name = artifact
        .file_name()
        .with_context(|| format!("{} has no file name", artifact.display()))?;
    let destination = output_dir.join(file_name);
    if same_file(artifact, &destination) {
        return Ok(destination);
    }
    fs::copy(artifact, &destination).with_context(|| {
        format!(
            "Cannot copy {} to {}",
            artifact.display(),
            destination.display()
        )
    })?;
    Ok(destination)
}

/// True when both paths name the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
