//! Loaders for key bindings and routines stored as RON files.

pub mod bindings;
pub mod routine;

pub use bindings::BindingsLoader;
pub use routine::{RoutineEntry, RoutineLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
