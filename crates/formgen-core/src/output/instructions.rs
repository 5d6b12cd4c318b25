//! Post-generation setup steps

use crate::generator::naming::PERSISTENCE_ENV_VAR;
use crate::spec::{FormSpec, LayoutStyle};

/// Shell steps needed before the generated form can run
pub fn setup_steps(spec: &FormSpec) -> Vec<String> {
    let mut steps = vec![
        "npm install react-hook-form @hookform/resolvers zod".to_string(),
        "npx shadcn@latest init".to_string(),
    ];

    let mut components = vec!["form", "input", "button"];
    if spec.has_textarea() {
        components.push("textarea");
    }
    if spec.layout == LayoutStyle::Card {
        components.push("card");
    }
    steps.push(format!("npx shadcn@latest add {}", components.join(" ")));

    if spec.persistence.is_some() {
        steps.push("npm install mongodb".to_string());
        steps.push(format!(
            "Add your MongoDB connection string to .env:\n  {}=your_mongodb_connection_string_here",
            PERSISTENCE_ENV_VAR
        ));
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{FieldSpec, FieldType, PersistenceTarget};

    #[test]
    fn test_minimal_steps() {
        let mut spec = FormSpec::new("Contact");
        spec.fields = vec![FieldSpec::new("email", FieldType::Email)];
        let steps = setup_steps(&spec);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2], "npx shadcn@latest add form input button");
    }

    #[test]
    fn test_optional_components_and_database() {
        let mut spec = FormSpec::new("Feedback");
        spec.fields = vec![FieldSpec::new("comment", FieldType::Textarea)];
        spec.layout = LayoutStyle::Card;
        spec.persistence = Some(PersistenceTarget {
            database: "app".to_string(),
            collection: "feedback".to_string(),
        });

        let steps = setup_steps(&spec);
        assert_eq!(steps[2], "npx shadcn@latest add form input button textarea card");
        assert_eq!(steps[3], "npm install mongodb");
        assert!(steps[4].contains("MONGODB_URI="));
    }
}
