//! Symbol, path and import derivation shared by every artifact
//!
//! All cross-file references go through [`Names`], so an artifact that
//! imports the schema or the persistence client always points at the file
//! the assembler actually emits.

use super::ArtifactRole;
use crate::spec::{FormSpec, RoutingStyle};

/// Environment variable the generated persistence client reads
pub const PERSISTENCE_ENV_VAR: &str = "MONGODB_URI";

/// Derived names for one form
#[derive(Debug, Clone)]
pub struct Names {
    form: String,
    routing: RoutingStyle,
}

impl Names {
    pub fn new(spec: &FormSpec) -> Self {
        Self {
            form: spec.name.clone(),
            routing: spec.routing,
        }
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    /// Exported validation schema, e.g. `ContactSchema`
    pub fn schema_symbol(&self) -> String {
        format!("{}Schema", self.form)
    }

    /// Default-exported component, e.g. `ContactForm`
    pub fn component_symbol(&self) -> String {
        format!("{}Form", self.form)
    }

    /// Server action, e.g. `ContactAction`
    pub fn action_symbol(&self) -> String {
        format!("{}Action", self.form)
    }

    /// URL the endpoint is served at under either routing style
    pub fn endpoint_url(&self) -> String {
        format!("/api/{}", self.form)
    }

    /// Output path of an artifact, relative to the output directory
    pub fn path(&self, role: ArtifactRole) -> String {
        let router = self.routing.as_str();
        match role {
            ArtifactRole::Component => format!("{}/{}.tsx", router, self.form),
            ArtifactRole::Schema => format!("{}Schema.ts", self.form),
            ArtifactRole::ServerHandler => format!("{}/{}Action.ts", router, self.form),
            ArtifactRole::HttpEndpoint => match self.routing {
                RoutingStyle::App => format!("app/api/{}/route.ts", self.form),
                RoutingStyle::Pages => format!("pages/api/{}.ts", self.form),
            },
            ArtifactRole::PersistenceClient => "lib/mongodb.ts".to_string(),
            ArtifactRole::ConfigSnapshot => format!("{}Config.json", self.form),
        }
    }

    /// Module specifier `from` uses to import `to`
    pub fn import_path(&self, from: ArtifactRole, to: ArtifactRole) -> String {
        relative_import(&self.path(from), &self.path(to))
    }
}

/// Relative module specifier from one output file to another, without extension
pub fn relative_import(from_file: &str, to_file: &str) -> String {
    let from_dirs: Vec<&str> = match from_file.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    let to_parts: Vec<&str> = to_file.split('/').collect();
    let (to_dirs, to_name) = to_parts.split_at(to_parts.len() - 1);

    let common = from_dirs
        .iter()
        .zip(to_dirs)
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<&str> = Vec::new();
    let ups = from_dirs.len() - common;
    if ups == 0 {
        segments.push(".");
    } else {
        segments.extend(std::iter::repeat("..").take(ups));
    }
    segments.extend(&to_dirs[common..]);

    let stem = to_name[0]
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(to_name[0]);
    segments.push(stem);
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(routing: RoutingStyle) -> Names {
        let mut spec = FormSpec::new("Contact");
        spec.routing = routing;
        Names::new(&spec)
    }

    #[test]
    fn test_symbols_derive_from_form_name() {
        let n = names(RoutingStyle::App);
        assert_eq!(n.schema_symbol(), "ContactSchema");
        assert_eq!(n.component_symbol(), "ContactForm");
        assert_eq!(n.action_symbol(), "ContactAction");
        assert_eq!(n.endpoint_url(), "/api/Contact");
    }

    #[test]
    fn test_paths_per_routing_style() {
        let app = names(RoutingStyle::App);
        assert_eq!(app.path(ArtifactRole::Component), "app/Contact.tsx");
        assert_eq!(app.path(ArtifactRole::ServerHandler), "app/ContactAction.ts");
        assert_eq!(app.path(ArtifactRole::HttpEndpoint), "app/api/Contact/route.ts");

        let pages = names(RoutingStyle::Pages);
        assert_eq!(pages.path(ArtifactRole::Component), "pages/Contact.tsx");
        assert_eq!(pages.path(ArtifactRole::HttpEndpoint), "pages/api/Contact.ts");
        assert_eq!(pages.path(ArtifactRole::Schema), "ContactSchema.ts");
    }

    #[test]
    fn test_schema_imports_resolve_from_each_location() {
        let app = names(RoutingStyle::App);
        assert_eq!(
            app.import_path(ArtifactRole::Component, ArtifactRole::Schema),
            "../ContactSchema"
        );
        assert_eq!(
            app.import_path(ArtifactRole::HttpEndpoint, ArtifactRole::Schema),
            "../../../ContactSchema"
        );
        assert_eq!(
            app.import_path(ArtifactRole::Component, ArtifactRole::ServerHandler),
            "./ContactAction"
        );

        let pages = names(RoutingStyle::Pages);
        assert_eq!(
            pages.import_path(ArtifactRole::HttpEndpoint, ArtifactRole::Schema),
            "../../ContactSchema"
        );
        assert_eq!(
            pages.import_path(ArtifactRole::HttpEndpoint, ArtifactRole::PersistenceClient),
            "../../lib/mongodb"
        );
    }

    #[test]
    fn test_relative_import_from_root() {
        assert_eq!(relative_import("Schema.ts", "lib/db.ts"), "./lib/db");
        assert_eq!(relative_import("a/b/c.ts", "a/d.ts"), "../d");
    }
}
