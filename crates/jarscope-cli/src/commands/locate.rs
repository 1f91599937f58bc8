//! Locate command implementation

use crate::cli::LocateArgs;
use crate::error::convert_navigation_error;
use crate::output::Location;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use jarscope_core::ContainerId;
use jarscope_core::IndexStore;
use jarscope_core::ProviderSet;
use jarscope_core::Uri;
use jarscope_core::Workspace;
use jarscope_core::build_index;
use jarscope_core::entry_uri;
use jarscope_core::locate;
use std::path::Path;
use std::path::PathBuf;

pub fn execute(args: &LocateArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let uri = Uri::parse(&args.uri)
        .map_err(|err| convert_navigation_error(err, Path::new(&args.uri)))?;

    let artifact = PathBuf::from(&uri.segments()[0]);
    let mut ws = Workspace::with_defaults();
    let container = ws
        .open(&artifact)
        .map_err(|err| convert_navigation_error(err, &artifact))?;

    let mut indexes = IndexStore::new();
    let mut found = locate(&mut ws, &indexes, container, &uri);

    // A fragment naming a nested type may need the type-declaration index
    // of the innermost container; build it on demand and retry.
    if found.is_none()
        && uri.fragment().is_some()
        && let Some(target) = innermost_container(&mut ws, container, &uri)
    {
        let providers = ProviderSet::with_defaults();
        indexes.insert(target, build_index(&mut ws, &providers.indexers, target));
        found = locate(&mut ws, &indexes, container, &uri);
    }

    let Some(entry) = found else {
        bail!("location not found: {}", args.uri);
    };

    formatter.format_location(&Location {
        uri: entry_uri(&ws, entry).to_string(),
        path: ws.path(entry).to_string(),
        container_type: ws.container_type_of(entry),
        kind: if ws.is_directory(entry) { "dir" } else { "file" },
        length: ws.length(entry),
    })
}

/// Walks every segment but the last, returning the container the final
/// segment would resolve in.
fn innermost_container(
    ws: &mut Workspace,
    root: ContainerId,
    uri: &Uri,
) -> Option<ContainerId> {
    let segments = uri.segments();
    let mut container = root;
    if segments.len() > 1 {
        for segment in &segments[1..segments.len() - 1] {
            let entry = ws.find(container, segment)?;
            container = ws.nested_container(entry)?;
        }
    }
    Some(container)
}
