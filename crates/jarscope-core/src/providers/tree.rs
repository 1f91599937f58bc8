//! Stock tree-node providers.

use std::sync::Arc;

use regex::Regex;

use crate::model::EntryId;
use crate::model::Workspace;
use crate::registry::Provider;
use crate::registry::SelectorRegistry;
use crate::registry::axes::TreeIcon;
use crate::registry::axes::TreeNode;
use crate::registry::axes::TreeNodeProvider;
use crate::registry::axes::default_expandable;

/// Fallback renderer for any file entry.
pub struct FileNodeProvider;

impl Provider for FileNodeProvider {
    fn selectors(&self) -> Vec<String> {
        vec!["*:file:*".to_string()]
    }
}

impl TreeNodeProvider for FileNodeProvider {
    fn make_node(&self, ws: &Workspace, entry: EntryId) -> TreeNode {
        TreeNode {
            label: ws.basename(entry).to_string(),
            icon: TreeIcon::File,
            expandable: default_expandable(ws, entry),
        }
    }
}

/// Fallback renderer for any directory entry.
pub struct DirectoryNodeProvider;

impl Provider for DirectoryNodeProvider {
    fn selectors(&self) -> Vec<String> {
        vec!["*:dir:*".to_string()]
    }
}

impl TreeNodeProvider for DirectoryNodeProvider {
    fn make_node(&self, ws: &Workspace, entry: EntryId) -> TreeNode {
        TreeNode {
            label: ws.basename(entry).to_string(),
            icon: TreeIcon::Directory,
            expandable: true,
        }
    }
}

/// Directories inside Java artifacts render as packages.
pub struct PackageNodeProvider;

impl Provider for PackageNodeProvider {
    fn selectors(&self) -> Vec<String> {
        vec![
            "jar:dir:*".to_string(),
            "war:dir:*".to_string(),
            "ear:dir:*".to_string(),
            "jmod:dir:*".to_string(),
        ]
    }
}

impl TreeNodeProvider for PackageNodeProvider {
    fn make_node(&self, ws: &Workspace, entry: EntryId) -> TreeNode {
        TreeNode {
            label: ws.basename(entry).to_string(),
            icon: TreeIcon::Package,
            expandable: true,
        }
    }
}

/// Compiled types render without the `.class` suffix.
pub struct ClassNodeProvider;

impl Provider for ClassNodeProvider {
    fn selectors(&self) -> Vec<String> {
        vec!["*:file:*.class".to_string()]
    }
}

impl TreeNodeProvider for ClassNodeProvider {
    fn make_node(&self, ws: &Workspace, entry: EntryId) -> TreeNode {
        let basename = ws.basename(entry);
        let label = basename.strip_suffix(".class").unwrap_or(basename);
        TreeNode {
            label: label.to_string(),
            icon: TreeIcon::Class,
            expandable: false,
        }
    }
}

/// Nested archives render expandable with an archive icon.
pub struct ArchiveNodeProvider;

impl Provider for ArchiveNodeProvider {
    fn selectors(&self) -> Vec<String> {
        ["jar", "war", "ear", "jmod", "aar", "zip", "tar", "tgz"]
            .iter()
            .map(|ext| format!("*:file:*.{ext}"))
            .collect()
    }
}

impl TreeNodeProvider for ArchiveNodeProvider {
    fn make_node(&self, ws: &Workspace, entry: EntryId) -> TreeNode {
        TreeNode {
            label: ws.basename(entry).to_string(),
            icon: TreeIcon::Archive,
            expandable: true,
        }
    }
}

/// `.gz` files render as archives only when the name ends in `.tar.gz`;
/// the discriminating pattern keeps plain gzip blobs on the file fallback.
pub struct TarGzNodeProvider {
    pattern: Regex,
}

impl TarGzNodeProvider {
    /// Creates the provider with its `.tar.gz` discriminator.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"\.tar\.gz$").expect("static pattern compiles"),
        }
    }
}

impl Default for TarGzNodeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for TarGzNodeProvider {
    fn selectors(&self) -> Vec<String> {
        vec!["*:file:*.gz".to_string()]
    }

    fn path_pattern(&self) -> Option<&Regex> {
        Some(&self.pattern)
    }
}

impl TreeNodeProvider for TarGzNodeProvider {
    fn make_node(&self, ws: &Workspace, entry: EntryId) -> TreeNode {
        TreeNode {
            label: ws.basename(entry).to_string(),
            icon: TreeIcon::Archive,
            expandable: true,
        }
    }
}

/// Stock tree-node registry.
#[must_use]
pub fn default_tree_nodes() -> SelectorRegistry<dyn TreeNodeProvider> {
    let mut registry: SelectorRegistry<dyn TreeNodeProvider> = SelectorRegistry::new();
    registry.register(Arc::new(FileNodeProvider));
    registry.register(Arc::new(DirectoryNodeProvider));
    registry.register(Arc::new(PackageNodeProvider));
    registry.register(Arc::new(ClassNodeProvider));
    registry.register(Arc::new(ArchiveNodeProvider));
    registry.register(Arc::new(TarGzNodeProvider::new()));
    registry
}
