//! Output formatter trait for CLI results.

use anyhow::Result;
use jarscope_core::SaveReport;
use serde::Serialize;

/// One row of a `list` tree.
#[derive(Debug, Serialize)]
pub struct ListingNode {
    /// Nesting depth below the opened artifact.
    pub depth: usize,
    /// Display label from the tree-node axis.
    pub label: String,
    /// Icon class name.
    pub icon: &'static str,
    /// Container-relative path.
    pub path: String,
    /// Type tag of the owning container.
    pub container_type: &'static str,
    /// File length in bytes (0 for directories).
    pub length: u64,
}

/// A resolved `locate` result.
#[derive(Debug, Serialize)]
pub struct Location {
    /// Canonical address of the entry.
    pub uri: String,
    /// Container-relative path.
    pub path: String,
    /// Type tag of the owning container.
    pub container_type: &'static str,
    /// `"dir"` or `"file"`.
    pub kind: &'static str,
    /// File length in bytes (0 for directories).
    pub length: u64,
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format a listing tree
    fn format_listing(&self, nodes: &[ListingNode]) -> Result<()>;

    /// Format a resolved location
    fn format_location(&self, location: &Location) -> Result<()>;

    /// Format an export result
    fn format_save_result(&self, report: &SaveReport) -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    #[allow(dead_code)]
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}
