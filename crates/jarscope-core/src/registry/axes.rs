//! The extensibility axes served by the selector registry.
//!
//! Each axis is the generic [`SelectorRegistry`](super::SelectorRegistry)
//! engine plus one capability trait with the axis-specific operation.
//! Container construction is the fifth axis; its accept-based factory
//! mechanism lives in [`crate::containers`].

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use crate::containers::detect_flavor;
use crate::filter::FilteredView;
use crate::index::TypeIndex;
use crate::model::EntryId;
use crate::model::Workspace;
use crate::registry::Provider;
use crate::registry::SelectorRegistry;
use crate::report::ProgressCallback;
use crate::report::SaveReport;

/// Icon class of a rendered tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeIcon {
    /// Plain directory.
    Directory,
    /// Package directory inside a Java artifact.
    Package,
    /// Plain file.
    File,
    /// Compiled type.
    Class,
    /// Nested archive.
    Archive,
}

/// Renderable descriptor of an entry, produced by the tree-node axis.
/// The widget toolkit that would display it is outside this crate.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Display label.
    pub label: String,
    /// Icon class.
    pub icon: TreeIcon,
    /// Whether the node can be expanded further.
    pub expandable: bool,
}

/// Tree-node rendering axis.
pub trait TreeNodeProvider: Provider {
    /// Produces the renderable descriptor for an entry.
    fn make_node(&self, ws: &Workspace, entry: EntryId) -> TreeNode;
}

/// A field or method declaration with its binary descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    /// Member name.
    pub name: String,
    /// Binary field or method descriptor.
    pub descriptor: String,
}

/// A decoded type declaration.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    /// Binary type name (`/` package separator, `$` nesting separator).
    pub name: String,
    /// Binary name of the superclass, absent for `java/lang/Object` and
    /// module descriptors.
    pub superclass: Option<String>,
    /// Declared fields.
    pub fields: Vec<MemberDecl>,
    /// Declared methods.
    pub methods: Vec<MemberDecl>,
}

/// Type decoding axis: turns a compiled artifact entry into its declared
/// type shape. Source reconstruction is out of scope.
pub trait TypeProvider: Provider {
    /// Decodes the entry, or `None` when the bytes are not a readable
    /// compiled type.
    fn parse_type(&self, ws: &Workspace, entry: EntryId) -> Option<TypeDecl>;
}

/// Indexing axis: contributes declarations from one entry to the
/// container's [`TypeIndex`].
pub trait Indexer: Provider {
    /// Indexes a single entry.
    fn index(&self, ws: &Workspace, entry: EntryId, index: &mut TypeIndex);
}

/// Options for a bulk save operation.
#[derive(Debug, Default)]
pub struct SaveOptions {
    /// Caller-owned cancellation flag, polled between entries. There is
    /// no cancellation primitive inside the save itself.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SaveOptions {
    /// Returns `true` once the caller has requested cancellation.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Everything a source saver needs while walking a save scope.
pub struct SaveContext<'a> {
    /// The workspace being saved from.
    pub ws: &'a mut Workspace,
    /// Saver registry for dispatching child entries.
    pub savers: &'a SelectorRegistry<dyn SourceSaver>,
    /// Optional projection restricting the walk to a kept subset.
    pub view: Option<&'a FilteredView>,
    /// Caller options.
    pub options: &'a SaveOptions,
    /// Accumulating report.
    pub report: &'a mut SaveReport,
    /// Progress sink.
    pub progress: &'a mut dyn ProgressCallback,
    /// Total entries in scope, for progress reporting.
    pub total: usize,
    /// 1-indexed position of the entry being processed.
    pub current: usize,
}

impl SaveContext<'_> {
    /// Children of `entry` within the save scope.
    pub fn scope_children(&mut self, entry: EntryId) -> Vec<EntryId> {
        match self.view {
            Some(view) => {
                let wrapper = view.wrap(entry);
                view.children(self.ws, &wrapper)
                    .into_iter()
                    .map(|child| child.id())
                    .collect()
            }
            None => self.ws.children(entry),
        }
    }
}

/// Source saving axis: writes an entry (and, for directories, its scoped
/// subtree) beneath an output directory.
pub trait SourceSaver: Provider {
    /// Saves one entry. Failures are recorded in the context report; the
    /// bulk walk continues past them.
    fn save(&self, ctx: &mut SaveContext<'_>, entry: EntryId, out_dir: &Path);
}

/// Default expandability rule shared by tree-node providers: directories
/// expand, files expand when their name looks like a mountable archive.
#[must_use]
pub fn default_expandable(ws: &Workspace, entry: EntryId) -> bool {
    ws.is_directory(entry) || detect_flavor(ws.basename(entry)).is_some()
}
