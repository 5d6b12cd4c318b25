//! Template composition engine
//!
//! Turns one [`FormSpec`] into the set of source artifacts of a form slice:
//! - rule strings are compiled into schema constraint chains ([`rules`])
//! - fields, buttons and the link are rendered to markup ([`render`])
//! - the markup is arranged in one of three layouts ([`layout`])
//! - the submit handler body is chosen and emitted ([`submit`])
//! - every artifact is assembled and cross-checked ([`assemble`])
//!
//! Generation is pure and deterministic: the same spec always yields a
//! byte-identical [`ArtifactSet`], and any failure yields no artifacts.

mod assemble;
pub mod fragment;
pub mod layout;
pub mod naming;
pub mod render;
pub mod rules;
pub mod submit;

use crate::error::GenerateError;
use crate::spec::FormSpec;
use std::fmt;

pub use naming::Names;
pub use rules::{CompiledConstraint, ConstraintKind};

/// Logical role of a generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactRole {
    Component,
    Schema,
    ServerHandler,
    HttpEndpoint,
    PersistenceClient,
    ConfigSnapshot,
}

impl ArtifactRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            ArtifactRole::Component => "component",
            ArtifactRole::Schema => "schema",
            ArtifactRole::ServerHandler => "server action",
            ArtifactRole::HttpEndpoint => "API route",
            ArtifactRole::PersistenceClient => "MongoDB client",
            ArtifactRole::ConfigSnapshot => "configuration snapshot",
        }
    }
}

impl fmt::Display for ArtifactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One complete generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub role: ArtifactRole,
    /// Path relative to the output directory, `/`-separated
    pub path: String,
    pub contents: String,
}

/// Every artifact produced by one generation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    artifacts: Vec<GeneratedArtifact>,
}

impl ArtifactSet {
    fn new(artifacts: Vec<GeneratedArtifact>) -> Self {
        Self { artifacts }
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.artifacts.iter()
    }

    pub fn get(&self, role: ArtifactRole) -> Option<&GeneratedArtifact> {
        self.artifacts.iter().find(|a| a.role == role)
    }

    pub fn roles(&self) -> Vec<ArtifactRole> {
        self.artifacts.iter().map(|a| a.role).collect()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl IntoIterator for ArtifactSet {
    type Item = GeneratedArtifact;
    type IntoIter = std::vec::IntoIter<GeneratedArtifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.into_iter()
    }
}

/// Validate `spec` and generate its complete artifact set
pub fn generate(spec: &FormSpec) -> Result<ArtifactSet, GenerateError> {
    spec.validate()?;
    assemble::assemble(spec)
}
