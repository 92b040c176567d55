//! In-memory virtual file system.
//!
//! The tree is built once from a `path,type,encoding,content` table and is
//! read-only afterwards. Paths are handled as [`PathSegments`], which are
//! always absolute and normalized.

pub mod loader;
mod path;
pub mod save;
mod tree;

/// Build a tree from records, a CSV reader, or a CSV file.
pub use loader::{RecordKind, SourceRecord, build, load_csv, load_path};
/// Normalized absolute path and the resolver.
pub use path::{PathSegments, resolve};
/// Write a tree back out as CSV.
pub use save::{save_path, write_csv};
/// Tree and node types.
pub use tree::{Directory, Encoding, FileNode, NodeRef, VfsNode, VfsTree};
