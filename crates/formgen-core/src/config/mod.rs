//! Configuration sources
//!
//! - Output settings resolved from flags, environment and defaults
//! - Saved form snapshots (load, serialize, discover, version check)

pub mod settings;
pub mod snapshot;

pub use settings::OutputSettings;
pub use snapshot::{check_compatibility, discover_snapshots, load_snapshot, LoadedSnapshot};
