//! Stock source savers and the bulk save driver.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::warn;

use crate::filter::FilteredView;
use crate::model::EntryId;
use crate::model::Workspace;
use crate::registry::Provider;
use crate::registry::SelectorRegistry;
use crate::registry::axes::SaveContext;
use crate::registry::axes::SaveOptions;
use crate::registry::axes::SourceSaver;
use crate::report::ProgressCallback;
use crate::report::SaveReport;

/// Writes file entries as raw bytes.
pub struct FileSaver;

impl Provider for FileSaver {
    fn selectors(&self) -> Vec<String> {
        vec!["*:file:*".to_string()]
    }
}

impl SourceSaver for FileSaver {
    fn save(&self, ctx: &mut SaveContext<'_>, entry: EntryId, out_dir: &Path) {
        let dest = out_dir.join(ctx.ws.basename(entry));
        let entry_path = ctx.ws.path(entry).to_string();

        let bytes = match ctx.ws.read(entry) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(target: "jarscope::save", entry = %entry_path, error = %err, "entry unreadable, continuing");
                ctx.report.add_failure(entry_path, err.to_string());
                return;
            }
        };
        if let Err(err) = fs::write(&dest, &bytes) {
            ctx.report.add_failure(entry_path, err.to_string());
            return;
        }
        ctx.report.files_saved += 1;
        ctx.report.bytes_written += bytes.len() as u64;
        ctx.progress.on_bytes_written(bytes.len() as u64);
    }
}

/// Creates directory entries and recurses through their scoped children.
pub struct DirectorySaver;

impl Provider for DirectorySaver {
    fn selectors(&self) -> Vec<String> {
        vec!["*:dir:*".to_string()]
    }
}

impl SourceSaver for DirectorySaver {
    fn save(&self, ctx: &mut SaveContext<'_>, entry: EntryId, out_dir: &Path) {
        let basename = ctx.ws.basename(entry).to_string();
        let dest = if basename.is_empty() {
            out_dir.to_path_buf()
        } else {
            out_dir.join(&basename)
        };

        if let Err(err) = fs::create_dir_all(&dest) {
            ctx.report.add_failure(ctx.ws.path(entry).to_string(), err.to_string());
            return;
        }
        ctx.report.directories_created += 1;

        for child in ctx.scope_children(entry) {
            save_entry(ctx, child, &dest);
            if ctx.report.cancelled {
                return;
            }
        }
    }
}

/// Stock source-saver registry.
#[must_use]
pub fn default_savers() -> SelectorRegistry<dyn SourceSaver> {
    let mut registry: SelectorRegistry<dyn SourceSaver> = SelectorRegistry::new();
    registry.register(Arc::new(FileSaver));
    registry.register(Arc::new(DirectorySaver));
    registry
}

/// Saves one entry through the registry, updating progress and the report.
///
/// An entry with no matching saver is counted as skipped, an expected
/// outcome rather than a failure.
pub fn save_entry(ctx: &mut SaveContext<'_>, entry: EntryId, out_dir: &Path) {
    if ctx.options.is_cancelled() {
        ctx.report.cancelled = true;
        return;
    }

    ctx.current += 1;
    let display_path = ctx.ws.path(entry).to_string();
    ctx.progress
        .on_entry_start(Path::new(&display_path), ctx.total, ctx.current);

    let provider = ctx.savers.select(
        ctx.ws.container_type_of(entry),
        ctx.ws.is_directory(entry),
        ctx.ws.path(entry),
    );
    match provider {
        Some(provider) => provider.save(ctx, entry, out_dir),
        None => ctx.report.entries_skipped += 1,
    }

    ctx.progress.on_entry_complete(Path::new(&display_path));
}

/// Drives a bulk save of `entry`'s scoped subtree beneath `out_dir`.
///
/// When `view` is given, the walk is restricted to its valid set. The
/// walk continues past failed entries, polls the caller's cancel flag
/// between entries, and reports everything in the returned [`SaveReport`].
pub fn save_tree(
    ws: &mut Workspace,
    savers: &SelectorRegistry<dyn SourceSaver>,
    view: Option<&FilteredView>,
    entry: EntryId,
    out_dir: &Path,
    options: &SaveOptions,
    progress: &mut dyn ProgressCallback,
) -> SaveReport {
    let started = Instant::now();
    let total = count_scope(ws, view, entry);

    let mut report = SaveReport::new();
    let mut ctx = SaveContext {
        ws,
        savers,
        view,
        options,
        report: &mut report,
        progress,
        total,
        current: 0,
    };
    save_entry(&mut ctx, entry, out_dir);

    progress.on_complete();
    report.duration = started.elapsed();
    report
}

/// Counts the entries a save walk will visit, for progress totals.
fn count_scope(ws: &mut Workspace, view: Option<&FilteredView>, entry: EntryId) -> usize {
    let mut count = 1;
    if ws.is_directory(entry) {
        let children: Vec<EntryId> = match view {
            Some(view) => {
                let wrapper = view.wrap(entry);
                view.children(ws, &wrapper)
                    .into_iter()
                    .map(|child| child.id())
                    .collect()
            }
            None => ws.children(entry),
        };
        for child in children {
            count += count_scope(ws, view, child);
        }
    }
    count
}
