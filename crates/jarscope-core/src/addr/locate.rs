//! Resolving addresses against a workspace, and producing them.

use crate::addr::fragment::Fragment;
use crate::addr::uri::Query;
use crate::addr::uri::Uri;
use crate::index::IndexStore;
use crate::model::ContainerId;
use crate::model::EntryId;
use crate::model::Workspace;

/// Canonical address of an entry.
///
/// Built by walking up the containment tree: each crossing into a nested
/// container contributes one `!` segment, and the top-level container
/// contributes its host path. The walk ascends through opening entries
/// only, so the Entry↔Container back-references are never cycled. Two
/// entries get equal addresses iff they denote the same byte-identical
/// location; the archive file entry and the root of the container
/// mounted from it therefore share one address.
#[must_use]
pub fn entry_uri(ws: &Workspace, entry: EntryId) -> Uri {
    let mut segments = Vec::new();
    let mut current = Some(entry);
    while let Some(id) = current {
        let path = ws.path(id);
        if !path.is_empty() {
            segments.push(path.to_string());
        }
        let container = ws.container_of(id);
        match ws.opened_from(container) {
            Some(host) => current = Some(host),
            None => {
                let origin = ws
                    .origin(container)
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                segments.push(origin);
                current = None;
            }
        }
    }
    segments.reverse();
    Uri::from_segments(segments)
}

/// Resolves an address to an entry, starting from a top-level container.
///
/// Walks the path segment by segment, crossing into nested containers at
/// each `!` (mounting, and materializing if necessary, as it goes).
/// When the final segment names no entry but the address carries a
/// fragment, the container's type-declaration index is consulted to
/// rewrite the path to the outer type's artifact; only indexes marked
/// complete are consulted, and an index miss is simply "not found".
pub fn locate(
    ws: &mut Workspace,
    indexes: &IndexStore,
    root: ContainerId,
    uri: &Uri,
) -> Option<EntryId> {
    let origin = ws.origin(root)?.display().to_string();
    let segments = uri.segments();
    if segments.first().map(String::as_str) != Some(origin.as_str()) {
        return None;
    }

    let mut container = root;
    let mut entry = ws.root(container);
    for (position, segment) in segments.iter().enumerate().skip(1) {
        let last = position == segments.len() - 1;
        match ws.find(container, segment) {
            Some(found) if last => entry = found,
            Some(found) => {
                container = ws.nested_container(found)?;
                entry = ws.root(container);
            }
            None if last => {
                let fragment = uri.fragment()?;
                let index = indexes.completed(container)?;
                let outer_path = index.outer_declaration_path(fragment.type_name())?;
                return ws.find(container, outer_path);
            }
            None => return None,
        }
    }
    Some(entry)
}

/// Resolves address text, mapping malformed input to "not found".
pub fn locate_str(
    ws: &mut Workspace,
    indexes: &IndexStore,
    root: ContainerId,
    input: &str,
) -> Option<EntryId> {
    let uri = Uri::parse(input).ok()?;
    locate(ws, indexes, root, &uri)
}

/// Produces the address for an entry, pointing at the outer artifact when
/// the addressed type is nested.
///
/// `outer_type` is the binary name of the enclosing type (`None` for
/// top-level types): when the entry's container has a complete index that
/// declares it, the final path segment is rewritten to the outer
/// artifact's path. On no relation or index miss the entry's own path
/// stands.
#[must_use]
pub fn make_uri(
    ws: &Workspace,
    indexes: &IndexStore,
    entry: EntryId,
    outer_type: Option<&str>,
    query: Option<Query>,
    fragment: Option<Fragment>,
) -> Uri {
    let mut uri = entry_uri(ws, entry);

    if let Some(outer) = outer_type
        && let Some(index) = indexes.completed(ws.container_of(entry))
        && let Some(outer_path) = index.declaration_path(outer)
    {
        let segments = uri.segments_mut();
        if ws.path(entry).is_empty() {
            segments.push(outer_path.to_string());
        } else if let Some(tail) = segments.last_mut() {
            *tail = outer_path.to_string();
        }
    }

    uri.with_query(query).with_fragment(fragment)
}
