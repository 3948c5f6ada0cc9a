//! PDF viewer launching.

use log::{debug, warn};
use std::path::Path;
use std::process::Command;

/// Skim on macOS; `open -ga` backgrounds an already-running instance.
const MACOS_VIEWER_APP: &str = "/Applications/Skim.app";

/// Opens a finished artifact (PDF, or a compiler log on failure) in the
/// platform viewer.
pub trait DocumentViewer {
    /// Launches the viewer fire-and-forget: no waiting, and a missing
    /// viewer never fails the run.
    fn open(&self, artifact: &Path);
}

/// Launches the platform's standard document opener.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemViewer;

impl DocumentViewer for SystemViewer {
    fn open(&self, artifact: &Path) {
        let mut command = viewer_command(artifact);
        match command.spawn() {
            Ok(child) => debug!("viewer launched (pid {})", child.id()),
            Err(e) => warn!("could not launch a viewer for {}: {}", artifact.display(), e),
        }
    }
}

fn viewer_command(artifact: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg("-ga").arg(MACOS_VIEWER_APP).arg(artifact);
        command
    } else if cfg!(windows) {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(artifact);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(artifact);
        command
    }
}
