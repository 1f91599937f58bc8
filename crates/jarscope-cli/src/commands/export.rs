//! Export command implementation

use crate::cli::ExportArgs;
use crate::error::convert_navigation_error;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use anyhow::bail;
use jarscope_core::EntryId;
use jarscope_core::FilteredView;
use jarscope_core::NoopProgress;
use jarscope_core::Workspace;
use jarscope_core::providers::save::default_savers;
use jarscope_core::providers::save::save_tree;
use jarscope_core::registry::axes::SaveOptions;

pub fn execute(args: &ExportArgs, formatter: &dyn OutputFormatter, silent: bool) -> Result<()> {
    let mut ws = Workspace::with_defaults();
    let container = ws
        .open(&args.artifact)
        .map_err(|err| convert_navigation_error(err, &args.artifact))?;
    let root = ws.root(container);

    // A --only selection keeps each named path plus its whole subtree;
    // the filtered view supplies the ancestor closure.
    let view = if args.only.is_empty() {
        None
    } else {
        let mut keep = Vec::new();
        for path in &args.only {
            let Some(entry) = ws.find(container, path) else {
                bail!("no such entry in {}: {path}", args.artifact.display());
            };
            subtree(&mut ws, entry, &mut keep);
        }
        Some(FilteredView::new(&ws, container, keep))
    };

    let savers = default_savers();
    let options = SaveOptions::default();

    let show_progress = !silent && CliProgress::should_show();
    let report = if show_progress {
        // The bar picks up the real entry total from the first callback.
        let mut progress = CliProgress::new(0, "Exporting");
        save_tree(
            &mut ws,
            &savers,
            view.as_ref(),
            root,
            &args.output_dir,
            &options,
            &mut progress,
        )
    } else {
        save_tree(
            &mut ws,
            &savers,
            view.as_ref(),
            root,
            &args.output_dir,
            &options,
            &mut NoopProgress,
        )
    };

    report
        .warnings
        .iter()
        .for_each(|warning| formatter.format_warning(warning));
    formatter.format_save_result(&report)
}

/// Collects an entry and its full subtree (descending through
/// directories only; nested archives are exported as archive files).
fn subtree(ws: &mut Workspace, entry: EntryId, keep: &mut Vec<EntryId>) {
    keep.push(entry);
    if ws.is_directory(entry) {
        for child in ws.children(entry) {
            subtree(ws, child, keep);
        }
    }
}
