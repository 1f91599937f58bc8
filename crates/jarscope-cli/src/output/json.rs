//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::ListingNode;
use super::formatter::Location;
use super::formatter::OutputFormatter;
use anyhow::Result;
use jarscope_core::SaveReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_listing(&self, nodes: &[ListingNode]) -> Result<()> {
        let output = JsonOutput::success("list", nodes);
        Self::output(&output)
    }

    fn format_location(&self, location: &Location) -> Result<()> {
        let output = JsonOutput::success("locate", location);
        Self::output(&output)
    }

    fn format_save_result(&self, report: &SaveReport) -> Result<()> {
        #[derive(Serialize)]
        struct SaveOutput {
            files_saved: usize,
            directories_created: usize,
            entries_skipped: usize,
            bytes_written: u64,
            cancelled: bool,
            duration_ms: u128,
            failures: Vec<FailureOutput>,
            warnings: Vec<String>,
        }

        #[derive(Serialize)]
        struct FailureOutput {
            path: String,
            message: String,
        }

        let data = SaveOutput {
            files_saved: report.files_saved,
            directories_created: report.directories_created,
            entries_skipped: report.entries_skipped,
            bytes_written: report.bytes_written,
            cancelled: report.cancelled,
            duration_ms: report.duration.as_millis(),
            failures: report
                .failures
                .iter()
                .map(|failure| FailureOutput {
                    path: failure.path.clone(),
                    message: failure.message.clone(),
                })
                .collect(),
            warnings: report.warnings.clone(),
        };

        let output = JsonOutput::success("export", data);
        Self::output(&output)
    }

    fn format_warning(&self, _message: &str) {
        // Warnings are embedded in the JSON payload
    }
}
