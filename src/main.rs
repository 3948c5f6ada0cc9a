//! keymaptex - Renders split-keyboard keymaps into printable diagrams
//!
//! This tool reads a keymap described in YAML, emits a LaTeX/TikZ
//! document for it, compiles the document to PDF with latexmk, copies
//! the PDF into the current directory and opens it in a viewer.

use clap::Parser;
use std::path::PathBuf;

use keymaptex::app::{self, RenderOptions};
use keymaptex::error::RenderError;
use keymaptex::typeset::{LatexmkCompiler, SystemViewer};

/// keymaptex - Renders split-keyboard keymaps into printable diagrams
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the keymap YAML file (exactly one is expected)
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let [input] = cli.inputs.as_slice() else {
        println!("{}", RenderError::Usage);
        std::process::exit(1);
    };

    let compiler = LatexmkCompiler::new();
    let viewer = SystemViewer;
    match app::render_keymap(input, &RenderOptions::default(), &compiler, &viewer) {
        Ok(artifact) => println!("✓ Rendered {}", artifact.display()),
        Err(e) => {
            println!("{e}");
            std::process::exit(1);
        }
    }
}
