//! List command implementation

use crate::cli::ListArgs;
use crate::error::convert_navigation_error;
use crate::output::ListingNode;
use crate::output::OutputFormatter;
use anyhow::Result;
use jarscope_core::EntryId;
use jarscope_core::ProviderSet;
use jarscope_core::Workspace;
use jarscope_core::registry::axes::TreeIcon;
use jarscope_core::registry::axes::TreeNode;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let mut ws = Workspace::with_defaults();
    let providers = ProviderSet::with_defaults();

    let container = ws
        .open(&args.artifact)
        .map_err(|err| convert_navigation_error(err, &args.artifact))?;

    let mut nodes = Vec::new();
    let root = ws.root(container);
    collect(&mut ws, &providers, root, 0, args.max_depth, &mut nodes);

    formatter.format_listing(&nodes)
}

fn collect(
    ws: &mut Workspace,
    providers: &ProviderSet,
    entry: EntryId,
    depth: usize,
    max_depth: usize,
    nodes: &mut Vec<ListingNode>,
) {
    if depth >= max_depth {
        return;
    }
    for child in ws.children(entry) {
        let node = make_node(ws, providers, child);
        let expandable = node.expandable;
        nodes.push(ListingNode {
            depth,
            label: node.label,
            icon: icon_name(node.icon),
            path: ws.path(child).to_string(),
            container_type: ws.container_type_of(child),
            length: ws.length(child),
        });
        if expandable {
            collect(ws, providers, child, depth + 1, max_depth, nodes);
        }
    }
}

/// Renders through the tree-node axis; entries with no provider fall back
/// to a plain file node.
fn make_node(ws: &Workspace, providers: &ProviderSet, entry: EntryId) -> TreeNode {
    let provider = providers.tree_nodes.select(
        ws.container_type_of(entry),
        ws.is_directory(entry),
        ws.path(entry),
    );
    provider.map_or_else(
        || TreeNode {
            label: ws.basename(entry).to_string(),
            icon: TreeIcon::File,
            expandable: ws.is_directory(entry),
        },
        |provider| provider.make_node(ws, entry),
    )
}

fn icon_name(icon: TreeIcon) -> &'static str {
    match icon {
        TreeIcon::Directory => "directory",
        TreeIcon::Package => "package",
        TreeIcon::File => "file",
        TreeIcon::Class => "class",
        TreeIcon::Archive => "archive",
    }
}
