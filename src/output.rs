//! Output file placement
//!
//! Generated files land in the configured output directory under a
//! timestamped name such as `scan_20240131_154502.tap`. An explicit path
//! from the command line bypasses the naming entirely.

use chrono::NaiveDateTime;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Timestamp layout used in generated file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `<prefix>_<timestamp>.<extension>`
pub fn timestamped_file_name(prefix: &str, extension: &str, time: NaiveDateTime) -> String {
    format!("{}_{}.{}", prefix, time.format(TIMESTAMP_FORMAT), extension)
}

/// Resolve where an output file goes
///
/// With `explicit` set the path is used as given. Otherwise the file is
/// named after `prefix` and `time` inside `directory`, which is created
/// when missing.
pub fn resolve_output_path(
    explicit: Option<&Path>,
    directory: &Path,
    prefix: &str,
    extension: &str,
    time: NaiveDateTime,
) -> io::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if !directory.is_dir() {
        fs::create_dir_all(directory)?;
        tracing::info!(directory = %directory.display(), "created output directory");
    }
    Ok(directory.join(timestamped_file_name(prefix, extension, time)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 31)
            .and_then(|d| d.and_hms_opt(15, 45, 2))
            .unwrap()
    }

    #[test]
    fn test_timestamped_file_name() {
        assert_eq!(
            timestamped_file_name("scan", "tap", sample_time()),
            "scan_20240131_154502.tap"
        );
        assert_eq!(
            timestamped_file_name("artcam", "dxf", sample_time()),
            "artcam_20240131_154502.dxf"
        );
    }

    #[test]
    fn test_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("COXOproScan");
        let path = resolve_output_path(None, &target, "scan", "tap", sample_time()).unwrap();
        assert!(target.is_dir());
        assert_eq!(path, target.join("scan_20240131_154502.tap"));
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("my.tap");
        let unused = dir.path().join("unused");
        let path = resolve_output_path(Some(&explicit), &unused, "scan", "tap", sample_time()).unwrap();
        assert_eq!(path, explicit);
        assert!(!unused.exists());
    }
}
