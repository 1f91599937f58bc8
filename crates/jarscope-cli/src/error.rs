//! Error conversion utilities for CLI.
//!
//! Converts jarscope-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use jarscope_core::NavigationError;
use std::path::Path;

/// Converts `NavigationError` to a user-friendly anyhow error with context
pub fn convert_navigation_error(err: NavigationError, artifact: &Path) -> anyhow::Error {
    match err {
        NavigationError::UnsupportedFormat { path } => {
            anyhow!(
                "Not a supported container: {}\n\
                 HINT: Supported containers: jar, war, ear, jmod, aar, zip, tar, tar.gz, or a directory.",
                path.display()
            )
        }
        NavigationError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {reason}\n\
                 HINT: The archive may be corrupted or truncated.",
                artifact.display()
            )
        }
        NavigationError::MalformedUri { input, reason } => {
            anyhow!(
                "Malformed address `{input}`: {reason}\n\
                 HINT: Addresses look like jarscope:///path/app.ear!lib/a.jar!com/x/A.class"
            )
        }
        NavigationError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {io_err}",
                artifact.display()
            )
        }
        _ => anyhow::Error::from(err)
            .context(format!("Error processing artifact '{}'", artifact.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_unsupported_format() {
        let err = NavigationError::UnsupportedFormat {
            path: PathBuf::from("notes.txt"),
        };
        let converted = convert_navigation_error(err, Path::new("notes.txt"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("notes.txt"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_invalid_archive() {
        let err = NavigationError::InvalidArchive("truncated central directory".to_string());
        let converted = convert_navigation_error(err, Path::new("bad.jar"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("bad.jar"));
        assert!(msg.contains("truncated"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = NavigationError::Io(io_err);
        let converted = convert_navigation_error(err, Path::new("app.ear"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
    }
}
