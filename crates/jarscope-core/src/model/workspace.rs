//! The workspace arena: every entry and container of an open session.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use tracing::warn;

use crate::containers::ContainerFactorySet;
use crate::containers::ContainerProbe;
use crate::containers::DIRECTORY_CONTAINER_TYPE;
use crate::containers::detect_flavor;
use crate::error::NavigationError;
use crate::error::Result;
use crate::model::container::ArchiveBacking;
use crate::model::container::Backing;
use crate::model::container::ContainerNode;
use crate::model::container::load_listing;
use crate::model::container::read_archive_entry;
use crate::materialize::Materializer;
use crate::model::entry::ContainerId;
use crate::model::entry::EntryId;
use crate::model::entry::EntryKind;
use crate::model::entry::EntryNode;
use crate::model::entry::NestedState;

/// Arena of entries and containers for one navigation session.
///
/// Entries and containers are created when a file is opened or when an
/// entry's children are first requested; child lists are memoized, which
/// is the only mutation a node sees after construction. Ids are only
/// meaningful for the workspace that minted them.
///
/// All operations are synchronous; archive materialization performs
/// blocking file I/O on the calling thread.
pub struct Workspace {
    entries: Vec<EntryNode>,
    containers: Vec<ContainerNode>,
    factories: ContainerFactorySet,
    materializer: Materializer,
}

impl Workspace {
    /// Creates a workspace using the given container factories.
    #[must_use]
    pub fn new(factories: ContainerFactorySet) -> Self {
        Self {
            entries: Vec::new(),
            containers: Vec::new(),
            factories,
            materializer: Materializer::new(),
        }
    }

    /// Creates a workspace with the stock container factories.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ContainerFactorySet::with_defaults())
    }

    /// Opens a host filesystem path (directory or archive file) as a
    /// top-level container.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::UnsupportedFormat`] for files no
    /// container factory can mount and [`NavigationError::InvalidArchive`]
    /// when a top-level archive is corrupt. Corruption of *nested*
    /// archives is not an error; it surfaces later as an empty child list.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<ContainerId> {
        let path = path.as_ref();
        if path.is_dir() {
            return Ok(self.insert_container(
                DIRECTORY_CONTAINER_TYPE,
                Backing::Directory(path.to_path_buf()),
                None,
                Some(path.to_path_buf()),
            ));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let flavor = detect_flavor(&file_name).ok_or_else(|| {
            NavigationError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
        })?;

        let listing = load_listing(flavor, path)?;
        let probe = ContainerProbe::new(&file_name, flavor, &listing);
        let type_tag = self.factories.classify(&probe).ok_or_else(|| {
            NavigationError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
        })?;

        Ok(self.insert_container(
            type_tag,
            Backing::Archive(ArchiveBacking {
                flavor,
                path: path.to_path_buf(),
                listing,
            }),
            None,
            Some(path.to_path_buf()),
        ))
    }

    /// Root entry of a container.
    #[must_use]
    pub fn root(&self, container: ContainerId) -> EntryId {
        self.container(container).root
    }

    /// Type tag of a container (`"jar"`, `"war"`, `"directory"`, …).
    #[must_use]
    pub fn container_type(&self, container: ContainerId) -> &'static str {
        self.container(container).type_tag
    }

    /// The archive file entry a nested container was mounted from, or
    /// `None` for a top-level container.
    #[must_use]
    pub fn opened_from(&self, container: ContainerId) -> Option<EntryId> {
        self.container(container).opened_from
    }

    /// Host path a top-level container was opened from.
    #[must_use]
    pub fn origin(&self, container: ContainerId) -> Option<&Path> {
        self.container(container).origin.as_deref()
    }

    /// Container owning an entry.
    #[must_use]
    pub fn container_of(&self, entry: EntryId) -> ContainerId {
        self.entry(entry).container
    }

    /// Parent entry, `None` only for the root of a top-level container.
    /// The root of a nested container reports the archive file entry it
    /// was mounted from.
    #[must_use]
    pub fn parent(&self, entry: EntryId) -> Option<EntryId> {
        self.entry(entry).parent
    }

    /// Path relative to the entry's own container root (`""` for roots).
    #[must_use]
    pub fn path(&self, entry: EntryId) -> &str {
        &self.entry(entry).path
    }

    /// Final path segment.
    #[must_use]
    pub fn basename(&self, entry: EntryId) -> &str {
        self.entry(entry).basename()
    }

    /// Entry kind.
    #[must_use]
    pub fn kind(&self, entry: EntryId) -> EntryKind {
        self.entry(entry).kind
    }

    /// Returns `true` for directory entries.
    #[must_use]
    pub fn is_directory(&self, entry: EntryId) -> bool {
        self.entry(entry).kind.is_directory()
    }

    /// File length in bytes (0 for directories).
    #[must_use]
    pub fn length(&self, entry: EntryId) -> u64 {
        self.entry(entry).kind.length()
    }

    /// Container type tag governing selector lookups for this entry.
    #[must_use]
    pub fn container_type_of(&self, entry: EntryId) -> &'static str {
        self.container_type(self.entry(entry).container)
    }

    /// Children of an entry, computed on first request and memoized.
    ///
    /// Directory entries list their real children, directories before
    /// files and lexicographically by path within each kind. File entries
    /// whose bytes are a mountable archive yield the children of the
    /// nested container's root; anything else, including a corrupt or
    /// unreadable nested archive, yields an empty list, never an error.
    pub fn children(&mut self, entry: EntryId) -> Vec<EntryId> {
        if let Some(children) = &self.entry(entry).children {
            return children.clone();
        }

        let computed = if self.entry(entry).kind.is_directory() {
            self.list_directory(entry)
        } else {
            match self.nested_container(entry) {
                Some(container) => {
                    let root = self.container(container).root;
                    self.children(root)
                }
                None => Vec::new(),
            }
        };

        self.entry_mut(entry).children = Some(computed.clone());
        computed
    }

    /// Mounts a file entry as a nested container if its bytes are an
    /// archive, returning the container id. The result is memoized; a
    /// corrupt archive is remembered as "not a container".
    pub fn nested_container(&mut self, entry: EntryId) -> Option<ContainerId> {
        match self.entry(entry).nested {
            NestedState::Mounted(container) => return Some(container),
            NestedState::NotAContainer => return None,
            NestedState::Unprobed => {}
        }
        let mounted = self.probe_nested(entry);
        self.entry_mut(entry).nested = match mounted {
            Some(container) => NestedState::Mounted(container),
            None => NestedState::NotAContainer,
        };
        mounted
    }

    /// Reads a file entry's bytes.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotAFile`] for directory entries, and
    /// I/O or archive errors when the backing store fails.
    pub fn read(&self, entry: EntryId) -> Result<Vec<u8>> {
        let node = self.entry(entry);
        if node.kind.is_directory() {
            return Err(NavigationError::NotAFile {
                path: node.path.clone(),
            });
        }
        match &self.container(node.container).backing {
            Backing::Directory(root) => Ok(fs::read(root.join(&node.path))?),
            Backing::Archive(backing) => read_archive_entry(backing, &node.path),
        }
    }

    /// Resolves a `/`-separated path relative to a container's root,
    /// creating intermediate entries as needed. Does not cross into
    /// nested containers.
    pub fn find(&mut self, container: ContainerId, rel_path: &str) -> Option<EntryId> {
        let mut current = self.container(container).root;
        if rel_path.is_empty() {
            return Some(current);
        }
        let mut walked = String::new();
        for segment in rel_path.split('/') {
            if !walked.is_empty() {
                walked.push('/');
            }
            walked.push_str(segment);
            current = self
                .children(current)
                .into_iter()
                .find(|&child| self.entry(child).path == walked)?;
        }
        Some(current)
    }

    fn list_directory(&mut self, entry: EntryId) -> Vec<EntryId> {
        let container = self.entry(entry).container;
        let parent_path = self.entry(entry).path.clone();

        // (path, is_dir, size) triples, fully owned so the arena can be
        // mutated while inserting the child nodes below.
        let records: Vec<(String, bool, u64)> = match &self.container(container).backing {
            Backing::Directory(root) => {
                let dir = if parent_path.is_empty() {
                    root.clone()
                } else {
                    root.join(&parent_path)
                };
                match read_dir_records(&dir) {
                    Ok(records) => records
                        .into_iter()
                        .map(|(name, is_dir, size)| {
                            let path = if parent_path.is_empty() {
                                name
                            } else {
                                format!("{parent_path}/{name}")
                            };
                            (path, is_dir, size)
                        })
                        .collect(),
                    Err(err) => {
                        warn!(target: "jarscope::model", dir = %dir.display(), error = %err, "unreadable directory, treating as empty");
                        Vec::new()
                    }
                }
            }
            Backing::Archive(backing) => backing
                .listing
                .children_of(&parent_path)
                .iter()
                .map(|child| (child.path.clone(), child.is_dir, child.size))
                .collect(),
        };

        records
            .into_iter()
            .map(|(path, is_dir, size)| {
                let kind = if is_dir {
                    EntryKind::Directory
                } else {
                    EntryKind::File { length: size }
                };
                self.insert_entry(container, Some(entry), path, kind)
            })
            .collect()
    }

    fn probe_nested(&mut self, entry: EntryId) -> Option<ContainerId> {
        let file_name = self.entry(entry).basename().to_string();
        let flavor = detect_flavor(&file_name)?;

        // Entries already backed by the real filesystem mount in place;
        // entries inside an archive are materialized first.
        let in_place = match &self.container(self.entry(entry).container).backing {
            Backing::Directory(root) => Some(root.join(&self.entry(entry).path)),
            Backing::Archive(_) => None,
        };
        let disk_path = match in_place {
            Some(path) => path,
            None => {
                let bytes = match self.read(entry) {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        warn!(target: "jarscope::model", entry = %self.entry(entry).path, error = %err, "unreadable nested archive, treating as empty");
                        return None;
                    }
                };
                match self.materializer.materialize(&file_name, &bytes) {
                    Ok(path) => path,
                    Err(err) => {
                        warn!(target: "jarscope::model", entry = %self.entry(entry).path, error = %err, "materialization failed, treating as empty");
                        return None;
                    }
                }
            }
        };

        let listing = match load_listing(flavor, &disk_path) {
            Ok(listing) => listing,
            Err(err) => {
                warn!(target: "jarscope::model", entry = %self.entry(entry).path, error = %err, "corrupt nested archive, treating as empty");
                return None;
            }
        };

        let probe = ContainerProbe::new(&file_name, flavor, &listing);
        let type_tag = self.factories.classify(&probe)?;

        Some(self.insert_container(
            type_tag,
            Backing::Archive(ArchiveBacking {
                flavor,
                path: disk_path,
                listing,
            }),
            Some(entry),
            None,
        ))
    }

    fn insert_container(
        &mut self,
        type_tag: &'static str,
        backing: Backing,
        opened_from: Option<EntryId>,
        origin: Option<PathBuf>,
    ) -> ContainerId {
        let container = ContainerId(u32::try_from(self.containers.len()).unwrap_or(u32::MAX));
        let root = self.insert_entry(container, opened_from, String::new(), EntryKind::Directory);
        self.containers.push(ContainerNode {
            type_tag,
            root,
            backing,
            opened_from,
            origin,
        });
        container
    }

    fn insert_entry(
        &mut self,
        container: ContainerId,
        parent: Option<EntryId>,
        path: String,
        kind: EntryKind,
    ) -> EntryId {
        let id = EntryId(u32::try_from(self.entries.len()).unwrap_or(u32::MAX));
        self.entries.push(EntryNode {
            container,
            parent,
            path,
            kind,
            children: None,
            nested: NestedState::Unprobed,
        });
        id
    }

    pub(crate) fn entry(&self, id: EntryId) -> &EntryNode {
        &self.entries[id.0 as usize]
    }

    fn entry_mut(&mut self, id: EntryId) -> &mut EntryNode {
        &mut self.entries[id.0 as usize]
    }

    pub(crate) fn container(&self, id: ContainerId) -> &ContainerNode {
        &self.containers[id.0 as usize]
    }
}

/// Reads one directory level, sorted directories-first then
/// lexicographically by name.
fn read_dir_records(dir: &Path) -> std::io::Result<Vec<(String, bool, u64)>> {
    let mut records = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let size = if metadata.is_dir() { 0 } else { metadata.len() };
        records.push((name, metadata.is_dir(), size));
    }
    records.sort_by(|a, b| (!a.1, &a.0).cmp(&(!b.1, &b.0)));
    Ok(records)
}
