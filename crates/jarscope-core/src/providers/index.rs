//! Stock indexers.

use std::sync::Arc;

use crate::index::TypeIndex;
use crate::model::EntryId;
use crate::model::Workspace;
use crate::providers::class::parse_class;
use crate::registry::Provider;
use crate::registry::SelectorRegistry;
use crate::registry::axes::Indexer;

/// Records the type declared by each `.class` entry.
///
/// The declared name is taken from the class bytes, not the entry path, so
/// a nested type (`com/x/Outer$Inner.class`) is indexed under its real
/// binary name and its outer relation stays derivable.
pub struct ClassIndexer;

impl Provider for ClassIndexer {
    fn selectors(&self) -> Vec<String> {
        vec!["*:file:*.class".to_string()]
    }
}

impl Indexer for ClassIndexer {
    fn index(&self, ws: &Workspace, entry: EntryId, index: &mut TypeIndex) {
        let Ok(bytes) = ws.read(entry) else {
            return;
        };
        if let Some(decl) = parse_class(&bytes) {
            index.record(decl.name, ws.path(entry));
        }
    }
}

/// Stock indexer registry.
#[must_use]
pub fn default_indexers() -> SelectorRegistry<dyn Indexer> {
    let mut registry: SelectorRegistry<dyn Indexer> = SelectorRegistry::new();
    registry.register(Arc::new(ClassIndexer));
    registry
}
