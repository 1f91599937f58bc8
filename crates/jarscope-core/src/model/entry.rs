//! Entry handles and metadata.

/// Opaque handle to an entry inside a [`Workspace`](super::Workspace) arena.
///
/// Handles are plain indexes: cheap to copy, hashable, and free of
/// ownership. The cyclic Entry↔Container references of the containment
/// tree are expressed as ids rather than owned pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) u32);

/// Opaque handle to a container inside a [`Workspace`](super::Workspace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(pub(crate) u32);

/// Kind of an entry: a directory or a file with a known byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory entry.
    Directory,
    /// Regular file entry.
    File {
        /// Uncompressed length in bytes.
        length: u64,
    },
}

impl EntryKind {
    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns the file length, or 0 for directories.
    #[must_use]
    pub const fn length(&self) -> u64 {
        match self {
            Self::Directory => 0,
            Self::File { length } => *length,
        }
    }
}

/// Whether a file entry has been probed as a nested container yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NestedState {
    /// Not yet inspected.
    Unprobed,
    /// Inspected: not a mountable archive (or corrupt, same outcome).
    NotAContainer,
    /// Inspected and mounted as a nested container.
    Mounted(ContainerId),
}

/// One node in the arena.
#[derive(Debug)]
pub(crate) struct EntryNode {
    pub container: ContainerId,
    pub parent: Option<EntryId>,
    /// Path relative to the entry's own container root, `/`-separated,
    /// empty for the root itself.
    pub path: String,
    pub kind: EntryKind,
    /// Memoized child list, the only mutation an entry sees after
    /// construction.
    pub children: Option<Vec<EntryId>>,
    pub nested: NestedState,
}

impl EntryNode {
    /// Final path segment, or the empty string for a container root.
    pub fn basename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}
