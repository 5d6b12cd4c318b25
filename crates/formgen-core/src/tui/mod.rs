//! Interactive form creation
//!
//! Asks for a new form configuration (or loads a saved one) with cliclack
//! prompts, then generates and writes the form. Built with the `tui` feature.

mod prompts;

pub use prompts::{run, CreateArgs};
