//
// cli.rs
// dcm2jpeg
//
// Defines the CLI surface with Clap, resolves the input/output directories and runs the batch conversion.
//

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;

use crate::batch;
use crate::models::BatchReport;

/// Name of the output directory created under the root when `--output` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "jpeg";

#[derive(Parser, Debug)]
#[command(name = "dcm2jpeg")]
#[command(version, about = "Convert DICOM files to JPEG.", long_about = None)]
pub struct Cli {
    /// Root directory containing .dcm files
    pub directory: PathBuf,

    /// Output directory (default: <directory>/jpeg)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log per-file diagnostics to stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Absolute root and output directories for this invocation.
    pub fn resolve_dirs(&self) -> anyhow::Result<(PathBuf, PathBuf)> {
        let directory = absolute(&self.directory)?;
        if !directory.is_dir() {
            bail!("{} is not a directory", directory.display());
        }
        let root = directory
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", directory.display()))?;

        let output = match &self.output {
            Some(dir) => absolute(dir)?,
            None => root.join(DEFAULT_OUTPUT_DIR),
        };

        Ok((root, output))
    }
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    Ok(cwd.join(path))
}

pub fn run(cli: &Cli) -> anyhow::Result<BatchReport> {
    let (root, output) = cli.resolve_dirs()?;
    batch::process_directory(&root, &output)
}
