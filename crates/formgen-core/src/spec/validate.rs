//! Configuration invariants checked before any artifact is generated

use super::{FormSpec, RoutingStyle};
use crate::error::SpecError;
use std::collections::HashSet;

/// Check that `name` can be used as a symbol in the generated source
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Check for a `#RRGGBB` color
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Check that `value` only holds class tokens safe inside `className="..."`
pub fn is_class_list(value: &str) -> bool {
    !value
        .chars()
        .any(|c| matches!(c, '"' | '\'' | '`' | '\\' | '{' | '}' | '<' | '>'))
}

fn is_plain_name(value: &str) -> bool {
    !value
        .chars()
        .any(|c| c == '"' || c == '\'' || c == '`' || c == '\\' || c.is_whitespace())
}

impl FormSpec {
    /// Check every configuration invariant, reporting the first violation
    pub fn validate(&self) -> Result<(), SpecError> {
        if !is_identifier(&self.name) {
            return Err(SpecError::InvalidFormName(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for (index, field) in self.fields.iter().enumerate() {
            if !is_identifier(&field.name) {
                return Err(SpecError::InvalidFieldName {
                    index,
                    name: field.name.clone(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SpecError::DuplicateFieldName {
                    index,
                    name: field.name.clone(),
                });
            }
        }

        if self.buttons.is_empty() {
            return Err(SpecError::NoButtons);
        }
        if let Some(index) = self.buttons.iter().position(|b| b.name.trim().is_empty()) {
            return Err(SpecError::EmptyButtonName { index });
        }
        if self.submit_index < 1 || self.submit_index > self.buttons.len() {
            return Err(SpecError::SubmitIndexOutOfRange {
                index: self.submit_index,
                count: self.buttons.len(),
            });
        }

        if !is_class_list(&self.width) {
            return Err(SpecError::InvalidWidth(self.width.clone()));
        }

        if let Some(link) = &self.link {
            if link.text.trim().is_empty() {
                return Err(SpecError::Missing { key: "linkText" });
            }
            if link.href.trim().is_empty() {
                return Err(SpecError::Missing { key: "linkHref" });
            }
        }

        if let Some(theme) = &self.theme {
            for (key, value) in [
                ("primaryColor", &theme.primary),
                ("secondaryColor", &theme.secondary),
            ] {
                if !is_hex_color(value) {
                    return Err(SpecError::InvalidColor {
                        key,
                        value: value.clone(),
                    });
                }
            }
        }

        if let Some(target) = &self.persistence {
            for (key, value) in [
                ("databaseName", &target.database),
                ("collectionName", &target.collection),
            ] {
                if value.is_empty() {
                    return Err(SpecError::Missing { key });
                }
                if !is_plain_name(value) {
                    return Err(SpecError::InvalidPersistenceName {
                        key,
                        value: value.clone(),
                    });
                }
            }
        }

        if self.delegated_submission && self.routing != RoutingStyle::App {
            return Err(SpecError::DelegatedSubmissionRequiresApp);
        }

        // The component posts to the API route when it cannot call a server action.
        if self.persistence.is_some() && !self.delegated_submission && !self.create_endpoint {
            return Err(SpecError::EndpointRequired);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{
        ButtonSpec, ButtonVariant, FieldSpec, FieldType, LinkSpec, PersistenceTarget,
        ThemeColors,
    };

    fn valid_spec() -> FormSpec {
        let mut spec = FormSpec::new("Contact");
        spec.fields = vec![FieldSpec::new("email", FieldType::Email).with_validation("required")];
        spec.buttons = vec![ButtonSpec::new("Send", ButtonVariant::Default)];
        spec
    }

    #[test]
    fn test_valid_spec_passes() {
        assert_eq!(valid_spec().validate(), Ok(()));
    }

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("email"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("$ref2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2fa"));
        assert!(!is_identifier("first-name"));
        assert!(!is_identifier("first name"));
    }

    #[test]
    fn test_hex_colors() {
        assert!(is_hex_color("#1a2B3c"));
        assert!(!is_hex_color("1a2b3c"));
        assert!(!is_hex_color("#1a2b3"));
        assert!(!is_hex_color("#1a2b3g"));
    }

    #[test]
    fn test_submit_index_out_of_range() {
        let mut spec = valid_spec();
        spec.submit_index = 2;
        assert_eq!(
            spec.validate(),
            Err(SpecError::SubmitIndexOutOfRange { index: 2, count: 1 })
        );

        spec.submit_index = 0;
        assert!(matches!(
            spec.validate(),
            Err(SpecError::SubmitIndexOutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn test_no_buttons_rejected() {
        let mut spec = valid_spec();
        spec.buttons.clear();
        assert_eq!(spec.validate(), Err(SpecError::NoButtons));
    }

    #[test]
    fn test_duplicate_field_names_rejected() {
        let mut spec = valid_spec();
        spec.fields.push(FieldSpec::new("email", FieldType::Text));
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("inputFields[1].name"));
    }

    #[test]
    fn test_invalid_field_name_rejected() {
        let mut spec = valid_spec();
        spec.fields[0].name = "e-mail".to_string();
        assert!(matches!(
            spec.validate(),
            Err(SpecError::InvalidFieldName { index: 0, .. })
        ));
    }

    #[test]
    fn test_theme_colors_checked() {
        let mut spec = valid_spec();
        spec.theme = Some(ThemeColors {
            primary: "#000000".to_string(),
            secondary: "blue".to_string(),
        });
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().starts_with("secondaryColor"));
    }

    #[test]
    fn test_persistence_names_required() {
        let mut spec = valid_spec();
        spec.persistence = Some(PersistenceTarget {
            database: "shop".to_string(),
            collection: String::new(),
        });
        assert_eq!(
            spec.validate(),
            Err(SpecError::Missing {
                key: "collectionName"
            })
        );

        spec.persistence = Some(PersistenceTarget {
            database: "my\"shop".to_string(),
            collection: "orders".to_string(),
        });
        assert!(matches!(
            spec.validate(),
            Err(SpecError::InvalidPersistenceName { key: "databaseName", .. })
        ));
    }

    #[test]
    fn test_database_without_actions_needs_endpoint() {
        let mut spec = valid_spec();
        spec.persistence = Some(PersistenceTarget {
            database: "crm".to_string(),
            collection: "leads".to_string(),
        });
        assert_eq!(spec.validate(), Err(SpecError::EndpointRequired));
        assert!(spec.validate().unwrap_err().to_string().starts_with("createApiRoute"));

        spec.create_endpoint = true;
        assert_eq!(spec.validate(), Ok(()));

        spec.create_endpoint = false;
        spec.delegated_submission = true;
        assert_eq!(spec.validate(), Ok(()));
    }

    #[test]
    fn test_width_must_be_plain_classes() {
        let mut spec = valid_spec();
        spec.width = "max-w-md\" onClick={alert}".to_string();
        let err = spec.validate().unwrap_err();
        assert!(matches!(err, SpecError::InvalidWidth(_)));
        assert!(err.to_string().starts_with("formWidth"));

        spec.width = "w-full md:max-w-lg lg:w-[40rem]".to_string();
        assert_eq!(spec.validate(), Ok(()));
    }

    #[test]
    fn test_empty_link_rejected() {
        let mut spec = valid_spec();
        spec.link = Some(LinkSpec {
            text: "Sign in".to_string(),
            href: " ".to_string(),
        });
        assert_eq!(spec.validate(), Err(SpecError::Missing { key: "linkHref" }));
    }

    #[test]
    fn test_server_actions_need_app_router() {
        let mut spec = valid_spec();
        spec.delegated_submission = true;
        spec.routing = RoutingStyle::Pages;
        assert_eq!(
            spec.validate(),
            Err(SpecError::DelegatedSubmissionRequiresApp)
        );
    }
}
