//! On-demand extraction of nested archives to temporary storage.
//!
//! An archive nested inside another archive has no host filesystem path of
//! its own, so the archive crates cannot mount it directly. The
//! materializer writes its bytes to a uniquely named temporary file and
//! hands that path back for mounting. Temporary files live in one
//! `TempDir` whose removal on drop is the best-effort end-of-process
//! cleanup; nothing is reference-counted and repeated materialization of
//! the same logical entry deliberately produces distinct files.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use tempfile::TempDir;
use tracing::debug;

use crate::error::Result;

/// Process-wide counter embedded in temporary file names, so repeated
/// opens of same-named nested entries never collide.
static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(0);

/// Extracts nested archive bytes to temporary files for mounting.
#[derive(Debug, Default)]
pub struct Materializer {
    temp_dir: Option<TempDir>,
}

impl Materializer {
    /// Creates a materializer; the backing directory is created lazily on
    /// first use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `bytes` to a fresh uniquely named temporary file and returns
    /// its path.
    ///
    /// `file_name` only influences the generated name (stem and extension
    /// are preserved so extension-based container detection still works on
    /// the materialized copy).
    pub fn materialize(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        if self.temp_dir.is_none() {
            self.temp_dir = Some(TempDir::with_prefix("jarscope-")?);
        }
        let dir = self
            .temp_dir
            .as_ref()
            .ok_or_else(|| std::io::Error::other("temp dir unavailable"))?;

        let id = NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed);
        let (stem, extension) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, ext),
            _ => (file_name, ""),
        };
        let name = if extension.is_empty() {
            format!("{stem}.{id}")
        } else {
            format!("{stem}.{id}.{extension}")
        };

        let path = dir.path().join(name);
        fs::write(&path, bytes)?;
        debug!(target: "jarscope::materialize", file = file_name, bytes = bytes.len(), path = %path.display(), "materialized nested archive");
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_materialize_writes_bytes() {
        let mut materializer = Materializer::new();
        let path = materializer.materialize("inner.jar", b"PK\x03\x04data").unwrap();
        assert!(path.exists());
        assert_eq!(fs::read(&path).unwrap(), b"PK\x03\x04data");
        assert!(path.extension().is_some_and(|e| e == "jar"));
    }

    #[test]
    fn test_repeated_materialization_is_distinct() {
        let mut materializer = Materializer::new();
        let first = materializer.materialize("inner.jar", b"one").unwrap();
        let second = materializer.materialize("inner.jar", b"two").unwrap();
        assert_ne!(first, second);
        assert_eq!(fs::read(&first).unwrap(), b"one");
        assert_eq!(fs::read(&second).unwrap(), b"two");
    }

    #[test]
    fn test_extensionless_name() {
        let mut materializer = Materializer::new();
        let path = materializer.materialize("archive", b"x").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_cleanup_on_drop() {
        let path = {
            let mut materializer = Materializer::new();
            materializer.materialize("inner.zip", b"gone").unwrap()
        };
        assert!(!path.exists());
    }
}
