//! Read-only projection of a container restricted to a kept entry set.
//!
//! Built per bulk-save operation and discarded afterwards. The view never
//! mutates the underlying tree: it intersects real child lists with a
//! valid set (the kept entries plus their ancestor closure) and hands out
//! wrapper objects with referential stability: asking twice for the same
//! underlying entry returns the identical `Rc`, which downstream identity
//! comparisons depend on.

use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::HashSet;
use std::rc::Rc;

use crate::model::ContainerId;
use crate::model::EntryId;
use crate::model::Workspace;

/// Wrapper around an entry visible through a [`FilteredView`].
#[derive(Debug)]
pub struct FilteredEntry {
    entry: EntryId,
}

impl FilteredEntry {
    /// Underlying entry id; all metadata accessors pass through the
    /// workspace unchanged.
    #[must_use]
    pub fn id(&self) -> EntryId {
        self.entry
    }
}

/// Wrapper around a container visible through a [`FilteredView`].
#[derive(Debug)]
pub struct FilteredContainer {
    container: ContainerId,
}

impl FilteredContainer {
    /// Underlying container id.
    #[must_use]
    pub fn id(&self) -> ContainerId {
        self.container
    }
}

/// Lazily built projection of one container onto a kept entry subset.
pub struct FilteredView {
    container: ContainerId,
    root: EntryId,
    valid: HashSet<EntryId>,
    entry_wrappers: RefCell<HashMap<EntryId, Rc<FilteredEntry>>>,
    container_wrappers: RefCell<HashMap<ContainerId, Rc<FilteredContainer>>>,
}

impl FilteredView {
    /// Builds a view over `container` keeping `keep` and every ancestor
    /// of a kept entry. The ancestor walk stops at the first ancestor
    /// already included, or at the root.
    #[must_use]
    pub fn new(
        ws: &Workspace,
        container: ContainerId,
        keep: impl IntoIterator<Item = EntryId>,
    ) -> Self {
        let mut valid = HashSet::new();
        for entry in keep {
            let mut cursor = Some(entry);
            while let Some(id) = cursor {
                if !valid.insert(id) {
                    break;
                }
                cursor = ws.parent(id);
            }
        }
        let root = ws.root(container);
        valid.insert(root);

        Self {
            container,
            root,
            valid,
            entry_wrappers: RefCell::new(HashMap::new()),
            container_wrappers: RefCell::new(HashMap::new()),
        }
    }

    /// Wrapper for the base container.
    #[must_use]
    pub fn container(&self) -> Rc<FilteredContainer> {
        self.wrap_container(self.container)
    }

    /// Wrapper for the base container's root entry.
    #[must_use]
    pub fn root(&self) -> Rc<FilteredEntry> {
        self.wrap(self.root)
    }

    /// Returns `true` if the entry survives the projection.
    #[must_use]
    pub fn contains(&self, entry: EntryId) -> bool {
        self.valid.contains(&entry)
    }

    /// Children of an entry, restricted to the valid set. Base ordering
    /// is preserved.
    pub fn children(&self, ws: &mut Workspace, entry: &FilteredEntry) -> Vec<Rc<FilteredEntry>> {
        ws.children(entry.id())
            .into_iter()
            .filter(|child| self.valid.contains(child))
            .map(|child| self.wrap(child))
            .collect()
    }

    /// Memoized wrapper for an entry: the same underlying entry always
    /// yields the identical wrapper object.
    #[must_use]
    pub fn wrap(&self, entry: EntryId) -> Rc<FilteredEntry> {
        Rc::clone(
            self.entry_wrappers
                .borrow_mut()
                .entry(entry)
                .or_insert_with(|| Rc::new(FilteredEntry { entry })),
        )
    }

    /// Memoized wrapper for a container.
    #[must_use]
    pub fn wrap_container(&self, container: ContainerId) -> Rc<FilteredContainer> {
        Rc::clone(
            self.container_wrappers
                .borrow_mut()
                .entry(container)
                .or_insert_with(|| Rc::new(FilteredContainer { container })),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> (tempfile::TempDir, Workspace, ContainerId) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a/b.txt"), b"b").unwrap();
        fs::write(dir.path().join("a/c.txt"), b"c").unwrap();
        fs::write(dir.path().join("d.txt"), b"d").unwrap();

        let mut ws = Workspace::with_defaults();
        let container = ws.open(dir.path()).unwrap();
        (dir, ws, container)
    }

    #[test]
    fn test_filtered_children_are_intersection() {
        let (_dir, mut ws, container) = fixture();
        let kept = ws.find(container, "a/b.txt").unwrap();
        let view = FilteredView::new(&ws, container, [kept]);

        let root = view.root();
        let top = view.children(&mut ws, &root);
        assert_eq!(top.len(), 1);
        assert_eq!(ws.path(top[0].id()), "a");

        let inner = view.children(&mut ws, &top[0]);
        assert_eq!(inner.len(), 1);
        assert_eq!(ws.path(inner[0].id()), "a/b.txt");
    }

    #[test]
    fn test_wrapper_identity_is_stable() {
        let (_dir, mut ws, container) = fixture();
        let kept = ws.find(container, "a/b.txt").unwrap();
        let view = FilteredView::new(&ws, container, [kept]);

        let first = view.wrap(kept);
        let second = view.wrap(kept);
        assert!(Rc::ptr_eq(&first, &second));

        let c1 = view.wrap_container(container);
        let c2 = view.wrap_container(container);
        assert!(Rc::ptr_eq(&c1, &c2));
    }

    #[test]
    fn test_excluded_sibling_not_visible() {
        let (_dir, mut ws, container) = fixture();
        let kept = ws.find(container, "a/c.txt").unwrap();
        let excluded = ws.find(container, "d.txt").unwrap();
        let view = FilteredView::new(&ws, container, [kept]);

        assert!(view.contains(kept));
        assert!(!view.contains(excluded));
    }
}
