//! Snapshot representation of a [`FormSpec`]
//!
//! Keys follow the answers recorded by the prompt flow. Keys for disabled
//! features may be missing, so everything except the form name and the
//! submit index has a default.

use super::{
    ButtonSpec, ButtonVariant, FieldSpec, FieldType, FormSpec, HorizontalAlign, LayoutStyle,
    LinkSpec, PersistenceTarget, RoutingStyle, ThemeColors, VerticalAlign, DEFAULT_ERROR_MESSAGE,
    DEFAULT_SUCCESS_MESSAGE, DEFAULT_WIDTH,
};
use crate::error::SpecError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotForm {
    form_name: String,
    #[serde(default)]
    input_count: Option<usize>,
    #[serde(default)]
    button_count: Option<usize>,
    submit_button_index: usize,
    #[serde(default)]
    add_link: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link_href: Option<String>,
    #[serde(default = "default_router")]
    router_type: String,
    #[serde(default)]
    use_server_actions: bool,
    #[serde(default)]
    create_api_route: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    use_type_script: Option<bool>,
    #[serde(default = "default_style")]
    form_style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    horizontal_alignment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vertical_alignment: Option<String>,
    #[serde(default = "default_width")]
    form_width: String,
    #[serde(default)]
    use_custom_colors: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secondary_color: Option<String>,
    #[serde(default)]
    add_loading_state: bool,
    #[serde(default)]
    add_error_handling: bool,
    #[serde(default = "default_success")]
    success_message: String,
    #[serde(default = "default_error")]
    error_message: String,
    #[serde(default)]
    include_database: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    database_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    collection_name: Option<String>,
    #[serde(default)]
    input_fields: Vec<SnapshotField>,
    #[serde(default)]
    buttons: Vec<SnapshotButton>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generator_version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotField {
    name: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    placeholder: String,
    #[serde(rename = "type", default = "default_field_type")]
    field_type: String,
    #[serde(default)]
    validation: String,
    #[serde(default)]
    error_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotButton {
    name: String,
    #[serde(default = "default_variant")]
    variant: String,
}

fn default_router() -> String {
    RoutingStyle::App.as_str().to_string()
}

fn default_style() -> String {
    LayoutStyle::Default.as_str().to_string()
}

fn default_width() -> String {
    DEFAULT_WIDTH.to_string()
}

fn default_success() -> String {
    DEFAULT_SUCCESS_MESSAGE.to_string()
}

fn default_error() -> String {
    DEFAULT_ERROR_MESSAGE.to_string()
}

fn default_field_type() -> String {
    FieldType::Text.as_str().to_string()
}

fn default_variant() -> String {
    ButtonVariant::Default.as_str().to_string()
}

impl SnapshotForm {
    /// Version of the generator that wrote this snapshot, if recorded
    pub fn generator_version(&self) -> Option<&str> {
        self.generator_version.as_deref()
    }

    pub(crate) fn stamp_version(&mut self, version: &str) {
        self.generator_version = Some(version.to_string());
    }
}

fn required(key: &'static str, value: Option<String>) -> Result<String, SpecError> {
    value.ok_or(SpecError::Missing { key })
}

impl TryFrom<SnapshotForm> for FormSpec {
    type Error = SpecError;

    fn try_from(raw: SnapshotForm) -> Result<Self, Self::Error> {
        let routing = RoutingStyle::from_name(&raw.router_type)
            .ok_or_else(|| SpecError::UnknownRoutingStyle(raw.router_type.clone()))?;

        let fields = raw
            .input_fields
            .into_iter()
            .enumerate()
            .map(|(index, f)| {
                let field_type = FieldType::from_name(&f.field_type).ok_or_else(|| {
                    SpecError::UnknownFieldType {
                        index,
                        value: f.field_type.clone(),
                    }
                })?;
                let error_message = Some(f.error_message).filter(|m| !m.trim().is_empty());
                Ok(FieldSpec {
                    name: f.name,
                    label: f.label,
                    placeholder: f.placeholder,
                    field_type,
                    validation: f.validation,
                    error_message,
                })
            })
            .collect::<Result<Vec<_>, SpecError>>()?;

        let buttons = raw
            .buttons
            .into_iter()
            .enumerate()
            .map(|(index, b)| {
                let variant = ButtonVariant::from_name(&b.variant).ok_or_else(|| {
                    SpecError::UnknownButtonVariant {
                        index,
                        value: b.variant.clone(),
                    }
                })?;
                Ok(ButtonSpec {
                    name: b.name,
                    variant,
                })
            })
            .collect::<Result<Vec<_>, SpecError>>()?;

        let link = if raw.add_link {
            Some(LinkSpec {
                text: required("linkText", raw.link_text)?,
                href: required("linkHref", raw.link_href)?,
            })
        } else {
            None
        };

        let theme = if raw.use_custom_colors {
            Some(ThemeColors {
                primary: required("primaryColor", raw.primary_color)?,
                secondary: required("secondaryColor", raw.secondary_color)?,
            })
        } else {
            None
        };

        let persistence = if raw.include_database {
            Some(PersistenceTarget {
                database: required("databaseName", raw.database_name)?,
                collection: required("collectionName", raw.collection_name)?,
            })
        } else {
            None
        };

        Ok(FormSpec {
            name: raw.form_name,
            fields,
            buttons,
            submit_index: raw.submit_button_index,
            layout: LayoutStyle::from_name(&raw.form_style),
            horizontal: raw
                .horizontal_alignment
                .as_deref()
                .and_then(HorizontalAlign::from_name),
            vertical: raw
                .vertical_alignment
                .as_deref()
                .and_then(VerticalAlign::from_name),
            width: raw.form_width,
            loading_state: raw.add_loading_state,
            error_display: raw.add_error_handling,
            theme,
            persistence,
            delegated_submission: raw.use_server_actions,
            create_endpoint: raw.create_api_route,
            routing,
            success_message: raw.success_message,
            error_message: raw.error_message,
            link,
        })
    }
}

impl From<FormSpec> for SnapshotForm {
    fn from(spec: FormSpec) -> Self {
        let (link_text, link_href) = match spec.link {
            Some(link) => (Some(link.text), Some(link.href)),
            None => (None, None),
        };
        let (primary_color, secondary_color) = match spec.theme {
            Some(theme) => (Some(theme.primary), Some(theme.secondary)),
            None => (None, None),
        };
        let (database_name, collection_name) = match spec.persistence {
            Some(target) => (Some(target.database), Some(target.collection)),
            None => (None, None),
        };

        SnapshotForm {
            form_name: spec.name,
            input_count: Some(spec.fields.len()),
            button_count: Some(spec.buttons.len()),
            submit_button_index: spec.submit_index,
            add_link: link_text.is_some(),
            link_text,
            link_href,
            router_type: spec.routing.as_str().to_string(),
            use_server_actions: spec.delegated_submission,
            create_api_route: spec.create_endpoint,
            use_type_script: Some(true),
            form_style: spec.layout.as_str().to_string(),
            horizontal_alignment: spec.horizontal.map(|h| h.as_str().to_string()),
            vertical_alignment: spec.vertical.map(|v| v.as_str().to_string()),
            form_width: spec.width,
            use_custom_colors: primary_color.is_some(),
            primary_color,
            secondary_color,
            add_loading_state: spec.loading_state,
            add_error_handling: spec.error_display,
            success_message: spec.success_message,
            error_message: spec.error_message,
            include_database: database_name.is_some(),
            database_name,
            collection_name,
            input_fields: spec
                .fields
                .into_iter()
                .map(|f| SnapshotField {
                    name: f.name,
                    label: f.label,
                    placeholder: f.placeholder,
                    field_type: f.field_type.as_str().to_string(),
                    validation: f.validation,
                    error_message: f.error_message.unwrap_or_default(),
                })
                .collect(),
            buttons: spec
                .buttons
                .into_iter()
                .map(|b| SnapshotButton {
                    name: b.name,
                    variant: b.variant.as_str().to_string(),
                })
                .collect(),
            generator_version: None,
        }
    }
}
