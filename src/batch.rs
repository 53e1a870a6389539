//
// batch.rs
// dcm2jpeg
//
// Walks a directory tree and converts every DICOM file found, one at a time, into the output directory.
//

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::image;
use crate::models::{BatchReport, Conversion, Failure};
use crate::naming::OutputNames;

pub const DICOM_EXTENSION: &str = "dcm";

/// Every `*.dcm` file under `root`, sorted by full path.
pub fn find_dicom_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|e| e.path().extension().map_or(false, |ext| ext == DICOM_EXTENSION))
        .filter(|e| e.path().is_file())
        .map(|e| e.into_path())
        .collect();

    files.sort();
    files
}

/// Convert every DICOM file under `root` into `output_dir`.
///
/// Per-file failures are reported and skipped. The output directory is only
/// created once there is at least one file to convert.
pub fn process_directory(root: &Path, output_dir: &Path) -> Result<BatchReport> {
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }

    let mut report = BatchReport {
        output_dir: output_dir.to_path_buf(),
        ..Default::default()
    };

    let files = find_dicom_files(root);
    debug!(root = %root.display(), count = files.len(), "discovered files");
    if files.is_empty() {
        println!("No .dcm files found.");
        return Ok(report);
    }

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let mut names = OutputNames::new();
    for path in &files {
        let output_name = names.allocate(path);
        let output_path = output_dir.join(&output_name);
        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();

        match image::convert(path, &output_path) {
            Ok(()) => {
                println!("  {} -> {}", relative.display(), output_name);
                report.converted.push(Conversion {
                    input: relative,
                    output_name,
                });
            }
            Err(e) => {
                debug!(path = %path.display(), "conversion failed: {:#}", e);
                eprintln!("  FAILED {}: {:#}", relative.display(), e);
                report.failed.push(Failure {
                    input: relative,
                    error: format!("{:#}", e),
                });
            }
        }
    }

    println!(
        "\nDone. {} file(s) processed -> {}",
        report.processed(),
        output_dir.display()
    );

    Ok(report)
}
