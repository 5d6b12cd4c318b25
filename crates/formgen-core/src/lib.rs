//! Formgen Core - form slice generation for React projects
//!
//! This library turns a declarative form configuration into the source files
//! of a working form: the component, its validation schema, optional server
//! action, API route and MongoDB client, plus a snapshot of the configuration
//! itself so the form can be regenerated later.
//!
//! # Architecture
//!
//! - **Configuration model** (`spec`) - `FormSpec` and its validation
//! - **Composition engine** (`generator`) - pure, deterministic artifact generation
//! - **Configuration sources** (`config`) - snapshots and output settings
//! - **Output** (`output`) - writing files and printing setup steps
//! - **TUI** (`tui`) - optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use formgen_core::{generate, ButtonSpec, ButtonVariant, FieldSpec, FieldType, FormSpec};
//!
//! let mut spec = FormSpec::new("Contact");
//! spec.fields.push(FieldSpec::new("email", FieldType::Email).with_validation("required"));
//! spec.buttons.push(ButtonSpec::new("Send", ButtonVariant::Default));
//!
//! let artifacts = generate(&spec)?;
//! for artifact in artifacts.iter() {
//!     println!("{}", artifact.path);
//! }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod output;
pub mod spec;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{load_snapshot, OutputSettings};
pub use error::{GenerateError, SnapshotError, SpecError, WriteError};
pub use generator::{generate, ArtifactRole, ArtifactSet, GeneratedArtifact};
pub use output::{generate_from_snapshot, setup_steps, write_artifacts};
pub use spec::{
    ButtonSpec, ButtonVariant, FieldSpec, FieldType, FormSpec, HorizontalAlign, LayoutStyle,
    LinkSpec, PersistenceTarget, RoutingStyle, ThemeColors, VerticalAlign,
};

#[cfg(feature = "tui")]
pub use tui::run;

/// Generator version, recorded in configuration snapshots
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");
