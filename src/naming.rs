//
// naming.rs
// dcm2jpeg
//
// Allocates collision-free output file names for one batch run.
//

use std::collections::BTreeSet;
use std::path::Path;

pub const OUTPUT_EXTENSION: &str = "jpeg";

/// Output names already handed out during the current run.
#[derive(Debug, Default, Clone)]
pub struct OutputNames {
    used: BTreeSet<String>,
}

impl OutputNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a name for `input`: its stem with the `.jpeg` extension, or
    /// `<stem>_<n>.jpeg` with the smallest free `n` when the plain name is taken.
    pub fn allocate(&mut self, input: &Path) -> String {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut name = format!("{}.{}", stem, OUTPUT_EXTENSION);
        let mut counter = 1;
        while self.used.contains(&name) {
            name = format!("{}_{}.{}", stem, counter, OUTPUT_EXTENSION);
            counter += 1;
        }

        self.used.insert(name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_use_keeps_plain_name() {
        let mut names = OutputNames::new();
        assert_eq!(names.allocate(Path::new("/data/a.dcm")), "a.jpeg");
        assert_eq!(names.allocate(Path::new("/data/b.dcm")), "b.jpeg");
    }

    #[test]
    fn duplicates_get_increasing_suffixes() {
        let mut names = OutputNames::new();
        assert_eq!(names.allocate(Path::new("/data/scan.dcm")), "scan.jpeg");
        assert_eq!(names.allocate(Path::new("/data/x/scan.dcm")), "scan_1.jpeg");
        assert_eq!(names.allocate(Path::new("/data/y/scan.dcm")), "scan_2.jpeg");
    }

    #[test]
    fn suffix_skips_names_taken_by_other_files() {
        let mut names = OutputNames::new();
        assert_eq!(names.allocate(Path::new("/data/scan.dcm")), "scan.jpeg");
        assert_eq!(names.allocate(Path::new("/data/scan_1.dcm")), "scan_1.jpeg");
        assert_eq!(names.allocate(Path::new("/data/sub/scan.dcm")), "scan_2.jpeg");
    }

    #[test]
    fn smallest_free_suffix_is_chosen() {
        let mut names = OutputNames::new();
        names.allocate(Path::new("scan_2.dcm"));
        names.allocate(Path::new("scan.dcm"));
        assert_eq!(names.allocate(Path::new("other/scan.dcm")), "scan_1.jpeg");
        assert_eq!(names.allocate(Path::new("third/scan.dcm")), "scan_3.jpeg");
    }

    #[test]
    fn only_last_extension_is_replaced() {
        let mut names = OutputNames::new();
        assert_eq!(names.allocate(Path::new("series.1.dcm")), "series.1.jpeg");
    }
}
