//! Type-declaration index: the read contract consumed by addressing.
//!
//! Indexes are produced per opened container, possibly on a worker
//! thread and possibly never finishing, so every index carries a `complete`
//! flag and consumers must skip incomplete ones rather than block.
//! Nested types share their outer type's compiled artifact; the index is
//! what reconciles an address fragment naming `a/b/Outer$Inner` with the
//! physical entry `a/b/Outer.class`.

use std::collections::HashMap;

use crate::model::ContainerId;
use crate::model::Workspace;
use crate::registry::SelectorRegistry;
use crate::registry::axes::Indexer;

/// Index of type declarations inside one container.
#[derive(Debug, Default)]
pub struct TypeIndex {
    complete: bool,
    /// Binary type name → container-relative path of the declaring entry.
    declarations: HashMap<String, String>,
}

impl TypeIndex {
    /// Creates an empty, incomplete index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a type declaration.
    pub fn record(&mut self, type_name: impl Into<String>, entry_path: impl Into<String>) {
        self.declarations.insert(type_name.into(), entry_path.into());
    }

    /// Marks the index as fully built.
    pub fn mark_complete(&mut self) {
        self.complete = true;
    }

    /// Returns `true` once the index is fully built. Incomplete indexes
    /// must not be consulted for addressing decisions.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Path of the entry declaring `type_name`, if indexed.
    #[must_use]
    pub fn declaration_path(&self, type_name: &str) -> Option<&str> {
        self.declarations.get(type_name).map(String::as_str)
    }

    /// Path of the entry declaring the *outermost* enclosing type of
    /// `type_name`, for nested type names like `a/b/Outer$Inner`.
    /// Returns `None` for top-level names or unindexed outers.
    #[must_use]
    pub fn outer_declaration_path(&self, type_name: &str) -> Option<&str> {
        let outer = outer_type_name(type_name)?;
        self.declaration_path(outer)
    }

    /// Number of indexed declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns `true` if nothing has been indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Outermost enclosing type of a nested binary name (`a/b/Outer$Inner$X`
/// → `a/b/Outer`), or `None` for top-level names.
#[must_use]
pub fn outer_type_name(type_name: &str) -> Option<&str> {
    let basename_start = type_name.rfind('/').map_or(0, |i| i + 1);
    let dollar = type_name[basename_start..].find('$')?;
    Some(&type_name[..basename_start + dollar])
}

/// Per-container indexes for one workspace.
#[derive(Debug, Default)]
pub struct IndexStore {
    indexes: HashMap<ContainerId, TypeIndex>,
}

impl IndexStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the index for a container, replacing any previous one.
    pub fn insert(&mut self, container: ContainerId, index: TypeIndex) {
        self.indexes.insert(container, index);
    }

    /// Index for a container, complete or not.
    #[must_use]
    pub fn get(&self, container: ContainerId) -> Option<&TypeIndex> {
        self.indexes.get(&container)
    }

    /// Index for a container, only when marked complete.
    #[must_use]
    pub fn completed(&self, container: ContainerId) -> Option<&TypeIndex> {
        self.indexes.get(&container).filter(|i| i.is_complete())
    }
}

/// Builds the type index for one container by running every matching
/// indexer over its entries.
///
/// The walk stays inside the container: archive file entries are not
/// expanded into their nested containers (each nested container gets its
/// own index). The returned index is marked complete; callers that want
/// asynchronous production run this on a worker and install the result
/// when done.
pub fn build_index(
    ws: &mut Workspace,
    indexers: &SelectorRegistry<dyn Indexer>,
    container: ContainerId,
) -> TypeIndex {
    let mut index = TypeIndex::new();
    let mut pending = vec![ws.root(container)];
    while let Some(entry) = pending.pop() {
        if ws.is_directory(entry) {
            pending.extend(ws.children(entry));
            continue;
        }
        let provider = indexers.select(
            ws.container_type_of(entry),
            ws.is_directory(entry),
            ws.path(entry),
        );
        if let Some(provider) = provider {
            provider.index(ws, entry, &mut index);
        }
    }
    index.mark_complete();
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outer_type_name() {
        assert_eq!(outer_type_name("a/b/Outer$Inner"), Some("a/b/Outer"));
        assert_eq!(outer_type_name("a/b/Outer$Inner$Deep"), Some("a/b/Outer"));
        assert_eq!(outer_type_name("Outer$Inner"), Some("Outer"));
        assert_eq!(outer_type_name("a/b/Plain"), None);
        assert_eq!(outer_type_name("Plain"), None);
    }

    #[test]
    fn test_declaration_lookup() {
        let mut index = TypeIndex::new();
        index.record("com/x/Outer", "com/x/Outer.class");
        assert_eq!(
            index.declaration_path("com/x/Outer"),
            Some("com/x/Outer.class")
        );
        assert_eq!(
            index.outer_declaration_path("com/x/Outer$Inner"),
            Some("com/x/Outer.class")
        );
        assert_eq!(index.outer_declaration_path("com/x/Outer"), None);
    }

    #[test]
    fn test_store_completed_gate() {
        let mut store = IndexStore::new();
        let container = crate::model::ContainerId(0);

        let mut incomplete = TypeIndex::new();
        incomplete.record("A", "A.class");
        store.insert(container, incomplete);
        assert!(store.get(container).is_some());
        assert!(store.completed(container).is_none());

        let mut complete = TypeIndex::new();
        complete.record("A", "A.class");
        complete.mark_complete();
        store.insert(container, complete);
        assert!(store.completed(container).is_some());
    }
}
