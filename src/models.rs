//
// models.rs
// dcm2jpeg
//
// Outcome records produced by a batch conversion run.
//

use std::path::PathBuf;

/// A file that was converted successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Input path relative to the scanned root.
    pub input: PathBuf,
    pub output_name: String,
}

/// A file that was skipped because conversion failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub input: PathBuf,
    pub error: String,
}

/// Summary of one batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub output_dir: PathBuf,
    pub converted: Vec<Conversion>,
    pub failed: Vec<Failure>,
}

impl BatchReport {
    /// Number of files attempted, successful or not.
    pub fn processed(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}
