//! Output management.
//!
//! - [`ImportCollector`] - import filtering and ordering per unit
//! - [`FileRegistry`] - declarative file registration and writing

mod imports;
mod registry;

pub use imports::ImportCollector;
pub use registry::{FileCategory, FileEntry, FileRegistry, WriteStats};
