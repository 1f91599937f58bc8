//! Stock providers for the selector-driven axes, plus the bundle that
//! wires them together.

pub mod class;
pub mod index;
pub mod save;
pub mod tree;

use crate::registry::SelectorRegistry;
use crate::registry::axes::Indexer;
use crate::registry::axes::SourceSaver;
use crate::registry::axes::TreeNodeProvider;
use crate::registry::axes::TypeProvider;

/// The per-axis registries of one application instance.
///
/// Constructed once at startup and passed by reference to consumers; the
/// stock set can be extended by registering additional providers on any
/// axis before use.
pub struct ProviderSet {
    /// Tree-node rendering axis.
    pub tree_nodes: SelectorRegistry<dyn TreeNodeProvider>,
    /// Type decoding axis.
    pub types: SelectorRegistry<dyn TypeProvider>,
    /// Indexing axis.
    pub indexers: SelectorRegistry<dyn Indexer>,
    /// Source saving axis.
    pub savers: SelectorRegistry<dyn SourceSaver>,
}

impl ProviderSet {
    /// Empty registries on every axis.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree_nodes: SelectorRegistry::new(),
            types: SelectorRegistry::new(),
            indexers: SelectorRegistry::new(),
            savers: SelectorRegistry::new(),
        }
    }

    /// Registries populated with the stock providers.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            tree_nodes: tree::default_tree_nodes(),
            types: class::default_types(),
            indexers: index::default_indexers(),
            savers: save::default_savers(),
        }
    }
}

impl Default for ProviderSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}
