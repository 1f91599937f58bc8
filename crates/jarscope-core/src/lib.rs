//! Virtual container navigation for nested archives.
//!
//! `jarscope-core` flattens recursive archive containment
//! (jar-in-war-in-ear, zip-in-directory) into one navigable tree of
//! entries, routes entries to plugins through selector-based registries,
//! and gives every location (file, type, field, or method) a stable,
//! round-trippable address.
//!
//! # Examples
//!
//! ```no_run
//! use jarscope_core::Workspace;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut ws = Workspace::with_defaults();
//! let container = ws.open("app.ear")?;
//! let root = ws.root(container);
//! for child in ws.children(root) {
//!     println!("{}", ws.path(child));
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod addr;
pub mod containers;
pub mod descriptor;
pub mod error;
pub mod filter;
pub mod index;
pub mod materialize;
pub mod model;
pub mod providers;
pub mod registry;
pub mod report;
pub mod test_utils;

// Re-export main API types
pub use addr::Fragment;
pub use addr::Query;
pub use addr::Uri;
pub use addr::entry_uri;
pub use addr::locate;
pub use addr::locate_str;
pub use addr::make_uri;
pub use error::NavigationError;
pub use error::Result;
pub use filter::FilteredView;
pub use index::IndexStore;
pub use index::TypeIndex;
pub use index::build_index;
pub use model::ContainerId;
pub use model::EntryId;
pub use model::EntryKind;
pub use model::Workspace;
pub use providers::ProviderSet;
pub use registry::SelectorRegistry;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use report::SaveReport;
