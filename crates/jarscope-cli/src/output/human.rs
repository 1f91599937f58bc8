//! Human-readable output formatter with colors and styling.

use super::formatter::ListingNode;
use super::formatter::Location;
use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use jarscope_core::SaveReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn styled_label(&self, node: &ListingNode) -> String {
        if !self.use_colors {
            return node.label.clone();
        }
        match node.icon {
            "directory" | "package" => style(&node.label).blue().bold().to_string(),
            "archive" => style(&node.label).magenta().to_string(),
            "class" => style(&node.label).green().to_string(),
            _ => node.label.clone(),
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_listing(&self, nodes: &[ListingNode]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for node in nodes {
            let indent = "  ".repeat(node.depth);
            let label = self.styled_label(node);
            let line = if self.verbose && node.length > 0 {
                format!("{indent}{label} ({})", Self::format_size(node.length))
            } else {
                format!("{indent}{label}")
            };
            let _ = self.term.write_line(&line);
        }

        Ok(())
    }

    fn format_location(&self, location: &Location) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} {}",
                style("✓").green().bold(),
                location.uri
            ));
        } else {
            let _ = self.term.write_line(&location.uri);
        }

        let _ = self
            .term
            .write_line(&format!("  Path: {}", location.path));
        let _ = self
            .term
            .write_line(&format!("  Container: {}", location.container_type));
        let _ = self.term.write_line(&format!("  Kind: {}", location.kind));
        if location.kind == "file" {
            let _ = self
                .term
                .write_line(&format!("  Size: {}", Self::format_size(location.length)));
        }

        Ok(())
    }

    fn format_save_result(&self, report: &SaveReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if report.cancelled {
            let _ = self.term.write_line("Export cancelled");
        } else if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} Export complete", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line("Export complete");
        }

        let _ = self
            .term
            .write_line(&format!("  Files saved: {}", report.files_saved));
        let _ = self
            .term
            .write_line(&format!("  Directories: {}", report.directories_created));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Skipped: {}", report.entries_skipped));
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
        }

        for failure in &report.failures {
            let line = format!("  failed: {} ({})", failure.path, failure.message);
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style(line).red()));
            } else {
                let _ = self.term.write_line(&line);
            }
        }

        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} {message}",
                style("⚠").yellow().bold()
            ));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
