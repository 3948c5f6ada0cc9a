//! LaTeX compiler invocation.

use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Failure of a LaTeX compiler run.
///
/// `log` points at the compiler's log file when one was produced, so the
/// caller can surface it to the user.
#[derive(Debug, Error)]
#[error("{detail}")]
pub struct CompileError {
    /// The LaTeX source that failed to compile
    pub tex_path: PathBuf,
    /// What went wrong (spawn failure or exit status)
    pub detail: String,
    /// Compiler log file, if it exists on disk
    pub log: Option<PathBuf>,
}

/// Turns a LaTeX source file into a PDF next to it.
pub trait DocumentCompiler {
    /// Compiles `source` synchronously, returning the path of the
    /// produced PDF.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] if the compiler cannot be spawned or
    /// exits unsuccessfully.
    fn compile(&self, source: &Path) -> Result<PathBuf, CompileError>;
}

/// Compiles via `latexmk -cd -pdf`, inheriting the terminal so the
/// compiler's progress output stays visible.
///
/// `-cd` makes latexmk change into the source's directory, so all
/// auxiliary files, the log, and the PDF land beside the `.tex` file.
#[derive(Debug, Clone)]
pub struct LatexmkCompiler {
    program: String,
}

impl LatexmkCompiler {
    /// Creates a compiler that invokes `latexmk` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "latexmk".to_string(),
        }
    }

    /// Creates a compiler that invokes the given program instead of
    /// `latexmk`. The program must accept latexmk-style arguments.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for LatexmkCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentCompiler for LatexmkCompiler {
    fn compile(&self, source: &Path) -> Result<PathBuf, CompileError> {
        debug!("running: {} -cd -pdf {}", self.program, source.display());

        let status = Command::new(&self.program)
            .arg("-cd")
            .arg("-pdf")
            .arg(source)
            .status()
            .map_err(|e| CompileError {
                tex_path: source.to_path_buf(),
                detail: format!("failed to run {}: {}", self.program, e),
                log: None,
            })?;

        if status.success() {
            Ok(source.with_extension("pdf"))
        } else {
            let log = source.with_extension("log");
            Err(CompileError {
                tex_path: source.to_path_buf(),
                detail: format!("{} exited with {}", self.program, status),
                log: log.is_file().then_some(log),
            })
        }
    }
}
