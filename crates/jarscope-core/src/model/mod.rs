//! Virtual container/entry model.
//!
//! A [`Workspace`] is an arena of entry and container nodes addressed by
//! copyable ids, flattening the recursive containment of nested archives
//! (jar-in-war-in-ear, zip-in-directory) into one navigable tree.

pub(crate) mod container;
mod entry;
mod workspace;

pub use container::ArchiveFlavor;
pub use entry::ContainerId;
pub use entry::EntryId;
pub use entry::EntryKind;
pub use workspace::Workspace;
