use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{FitscubeError, Result};

/// Immediate entries of `dir` that can be frame files.
///
/// No recursion and no extension filter: every non-directory entry is a
/// candidate, so a stray non-FITS file fails the load that reads it.
/// Order is the platform enumeration order unless `sort` is set.
pub fn list_frame_files(dir: &Path, sort: bool) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(FitscubeError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            debug!("Skipping subdirectory {}", path.display());
            continue;
        }
        files.push(path);
    }

    if files.is_empty() {
        return Err(FitscubeError::EmptyDirectory(dir.to_path_buf()));
    }

    if sort {
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            list_frame_files(dir.path(), false),
            Err(FitscubeError::EmptyDirectory(_))
        ));
    }

    #[test]
    fn skips_subdirectories_and_sorts_on_request() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.fits"), b"").unwrap();
        fs::write(dir.path().join("a.fits"), b"").unwrap();

        let files = list_frame_files(dir.path(), true).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.fits", "b.fits"]);
    }

    #[test]
    fn file_path_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("frame.fits");
        fs::write(&file, b"").unwrap();
        assert!(matches!(
            list_frame_files(&file, false),
            Err(FitscubeError::NotADirectory(_))
        ));
    }
}
