//! URI/fragment addressing protocol.
//!
//! An address names any location (file, type, field, or method) inside
//! an arbitrarily nested archive, and is the bit-exact external contract
//! used by persisted bookmarks, history, and inter-process "open this
//! file" messages.

mod fragment;
mod locate;
mod uri;

pub use fragment::Fragment;
pub use fragment::MemberRef;
pub use locate::entry_uri;
pub use locate::locate;
pub use locate::locate_str;
pub use locate::make_uri;
pub use uri::Query;
pub use uri::SCHEME;
pub use uri::Uri;
