//! Container nodes and archive backings.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use flate2::read::GzDecoder;

use crate::error::NavigationError;
use crate::error::Result;
use crate::model::entry::EntryId;

/// Archive flavors the workspace can mount through the host archive crates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFlavor {
    /// Zip family (zip, jar, war, ear, jmod, …).
    Zip,
    /// Uncompressed tar.
    Tar,
    /// Gzip-compressed tar.
    TarGz,
}

/// One node of the container tree.
#[derive(Debug)]
pub(crate) struct ContainerNode {
    /// Type tag assigned by the accepting container factory.
    pub type_tag: &'static str,
    pub root: EntryId,
    pub backing: Backing,
    /// The archive file entry this container was mounted from; `None` for
    /// a top-level container. Walks up the tree must stop here and never
    /// descend through it again.
    pub opened_from: Option<EntryId>,
    /// Host filesystem path this container was opened from; set only for
    /// top-level containers and used as the first address segment.
    pub origin: Option<PathBuf>,
}

/// What physically backs a container's entries.
#[derive(Debug)]
pub(crate) enum Backing {
    /// A real directory on the host filesystem.
    Directory(PathBuf),
    /// An archive file on the host filesystem (original or materialized).
    Archive(ArchiveBacking),
}

#[derive(Debug)]
pub(crate) struct ArchiveBacking {
    pub flavor: ArchiveFlavor,
    /// Real file the archive is read from. For archives nested inside
    /// other archives this is a materialized temporary file.
    pub path: PathBuf,
    pub listing: Listing,
}

/// Child record inside a [`Listing`].
#[derive(Debug, Clone)]
pub(crate) struct ListedChild {
    /// Full container-relative path.
    pub path: String,
    pub is_dir: bool,
    pub size: u64,
}

/// Snapshot of an archive's namespace, grouped by directory.
///
/// Archive central directories frequently omit intermediate directory
/// records; the listing reconstructs them so every entry has a real parent
/// chain. Children are pre-sorted: directories before files, then
/// lexicographically by path.
#[derive(Debug, Default)]
pub(crate) struct Listing {
    children: HashMap<String, Vec<ListedChild>>,
    paths: HashMap<String, bool>,
}

impl Listing {
    /// Builds a listing from raw `(path, is_dir, size)` records.
    pub fn from_records(records: impl IntoIterator<Item = (String, bool, u64)>) -> Self {
        // path -> (is_dir, size), with implicit parents filled in
        let mut nodes: HashMap<String, (bool, u64)> = HashMap::new();
        for (path, is_dir, size) in records {
            let path = path.trim_matches('/').to_string();
            if path.is_empty() || !is_clean_path(&path) {
                continue;
            }
            let mut prefix_end = 0;
            while let Some(slash) = path[prefix_end..].find('/') {
                prefix_end += slash;
                nodes.entry(path[..prefix_end].to_string()).or_insert((true, 0));
                prefix_end += 1;
            }
            let node = nodes.entry(path).or_insert((is_dir, size));
            if is_dir {
                node.0 = true;
            } else {
                *node = (false, size);
            }
        }

        let mut children: HashMap<String, Vec<ListedChild>> = HashMap::new();
        let mut paths = HashMap::new();
        for (path, (is_dir, size)) in nodes {
            let parent = match path.rfind('/') {
                Some(idx) => path[..idx].to_string(),
                None => String::new(),
            };
            children.entry(parent).or_default().push(ListedChild {
                path: path.clone(),
                is_dir,
                size,
            });
            paths.insert(path, is_dir);
        }
        for siblings in children.values_mut() {
            siblings.sort_by(|a, b| (!a.is_dir, &a.path).cmp(&(!b.is_dir, &b.path)));
        }

        Self { children, paths }
    }

    /// Children of a directory path (empty string for the root).
    pub fn children_of(&self, dir: &str) -> &[ListedChild] {
        self.children.get(dir).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` if the archive contains the given path, as a file or
    /// a (possibly implicit) directory.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }
}

/// Rejects entry names that would escape or alias the archive root.
fn is_clean_path(path: &str) -> bool {
    !path.starts_with('/')
        && !path.contains('\\')
        && path.split('/').all(|seg| !seg.is_empty() && seg != "." && seg != "..")
}

/// Reads an archive's namespace into a [`Listing`].
pub(crate) fn load_listing(flavor: ArchiveFlavor, path: &Path) -> Result<Listing> {
    match flavor {
        ArchiveFlavor::Zip => load_zip_listing(path),
        ArchiveFlavor::Tar | ArchiveFlavor::TarGz => load_tar_listing(flavor, path),
    }
}

fn load_zip_listing(path: &Path) -> Result<Listing> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| NavigationError::InvalidArchive(format!("failed to open ZIP archive: {e}")))?;

    let mut records = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(|e| {
            NavigationError::InvalidArchive(format!("failed to read ZIP entry: {e}"))
        })?;
        records.push((entry.name().to_string(), entry.is_dir(), entry.size()));
    }
    Ok(Listing::from_records(records))
}

fn load_tar_listing(flavor: ArchiveFlavor, path: &Path) -> Result<Listing> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    match flavor {
        ArchiveFlavor::TarGz => collect_tar_records(tar::Archive::new(GzDecoder::new(reader))),
        _ => collect_tar_records(tar::Archive::new(reader)),
    }
}

fn collect_tar_records<R: Read>(mut archive: tar::Archive<R>) -> Result<Listing> {
    let entries = archive.entries().map_err(|e| {
        NavigationError::InvalidArchive(format!("failed to read TAR entries: {e}"))
    })?;

    let mut records = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            NavigationError::InvalidArchive(format!("failed to read TAR entry: {e}"))
        })?;
        let path = entry
            .path()
            .map_err(|e| NavigationError::InvalidArchive(format!("invalid path: {e}")))?
            .to_string_lossy()
            .into_owned();
        let is_dir = entry.header().entry_type() == tar::EntryType::Directory;
        records.push((path, is_dir, entry.size()));
    }
    Ok(Listing::from_records(records))
}

/// Reads one file entry out of an archive backing.
pub(crate) fn read_archive_entry(backing: &ArchiveBacking, entry_path: &str) -> Result<Vec<u8>> {
    match backing.flavor {
        ArchiveFlavor::Zip => {
            let file = File::open(&backing.path)?;
            let mut archive = zip::ZipArchive::new(file).map_err(|e| {
                NavigationError::InvalidArchive(format!("failed to open ZIP archive: {e}"))
            })?;
            let mut entry = archive.by_name(entry_path).map_err(|_| {
                NavigationError::EntryNotFound {
                    path: entry_path.to_string(),
                }
            })?;
            let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
            entry.read_to_end(&mut bytes)?;
            Ok(bytes)
        }
        ArchiveFlavor::Tar | ArchiveFlavor::TarGz => {
            let file = File::open(&backing.path)?;
            let reader = BufReader::new(file);
            if backing.flavor == ArchiveFlavor::TarGz {
                read_tar_entry(tar::Archive::new(GzDecoder::new(reader)), entry_path)
            } else {
                read_tar_entry(tar::Archive::new(reader), entry_path)
            }
        }
    }
}

fn read_tar_entry<R: Read>(mut archive: tar::Archive<R>, entry_path: &str) -> Result<Vec<u8>> {
    let entries = archive.entries().map_err(|e| {
        NavigationError::InvalidArchive(format!("failed to read TAR entries: {e}"))
    })?;
    for entry in entries {
        let mut entry = entry.map_err(|e| {
            NavigationError::InvalidArchive(format!("failed to read TAR entry: {e}"))
        })?;
        let matches = entry
            .path()
            .is_ok_and(|p| p.to_string_lossy().trim_matches('/') == entry_path);
        if matches {
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes)?;
            return Ok(bytes);
        }
    }
    Err(NavigationError::EntryNotFound {
        path: entry_path.to_string(),
    })
}
