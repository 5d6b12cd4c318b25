//! Form configuration model
//!
//! A [`FormSpec`] is the single input of the generator. It is collected by
//! the prompt flow or loaded from a saved snapshot; the serde representation
//! lives in [`wire`] and matches the snapshot files written by earlier
//! versions of the tool.

mod validate;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use validate::{is_class_list, is_hex_color, is_identifier};

/// Default responsive width classes for the form container
pub const DEFAULT_WIDTH: &str = "w-full max-w-md";

/// Default message shown after a successful submission
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// Default message shown when a submission fails without its own message
pub const DEFAULT_ERROR_MESSAGE: &str =
    "An error occurred while submitting the form. Please try again.";

/// Root configuration describing one form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "wire::SnapshotForm", into = "wire::SnapshotForm")]
pub struct FormSpec {
    /// Identifier used as the root of every symbol and file name
    pub name: String,
    pub fields: Vec<FieldSpec>,
    pub buttons: Vec<ButtonSpec>,
    /// 1-based index into `buttons`
    pub submit_index: usize,
    pub layout: LayoutStyle,
    pub horizontal: Option<HorizontalAlign>,
    pub vertical: Option<VerticalAlign>,
    /// Free-text sizing classes appended to the container
    pub width: String,
    pub loading_state: bool,
    pub error_display: bool,
    pub theme: Option<ThemeColors>,
    pub persistence: Option<PersistenceTarget>,
    /// Submit through a colocated server action instead of a network call
    pub delegated_submission: bool,
    pub create_endpoint: bool,
    pub routing: RoutingStyle,
    pub success_message: String,
    pub error_message: String,
    pub link: Option<LinkSpec>,
}

impl FormSpec {
    /// Create a form with the prompt flow's defaults and no fields or buttons
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            buttons: Vec::new(),
            submit_index: 1,
            layout: LayoutStyle::Default,
            horizontal: Some(HorizontalAlign::Center),
            vertical: Some(VerticalAlign::Center),
            width: DEFAULT_WIDTH.to_string(),
            loading_state: true,
            error_display: true,
            theme: None,
            persistence: None,
            delegated_submission: false,
            create_endpoint: false,
            routing: RoutingStyle::App,
            success_message: DEFAULT_SUCCESS_MESSAGE.to_string(),
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            link: None,
        }
    }

    /// Whether the button at the 1-based `position` submits the form
    pub fn is_submit(&self, position: usize) -> bool {
        position == self.submit_index
    }

    pub fn has_textarea(&self) -> bool {
        self.fields
            .iter()
            .any(|f| f.field_type == FieldType::Textarea)
    }

    pub fn has_single_line_input(&self) -> bool {
        self.fields
            .iter()
            .any(|f| f.field_type != FieldType::Textarea)
    }
}

/// One input of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub field_type: FieldType,
    /// Comma-separated `rule[:value]` tokens, e.g. `required,min:3,max:50`
    pub validation: String,
    pub error_message: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            placeholder: String::new(),
            field_type,
            validation: String::new(),
            error_message: None,
        }
    }

    pub fn with_validation(mut self, rules: impl Into<String>) -> Self {
        self.validation = rules.into();
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}

/// One button of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    /// Display text
    pub name: String,
    pub variant: ButtonVariant,
}

impl ButtonSpec {
    pub fn new(name: impl Into<String>, variant: ButtonVariant) -> Self {
        Self {
            name: name.into(),
            variant,
        }
    }
}

/// Link rendered next to the buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
    pub text: String,
    pub href: String,
}

/// Custom color theme, both `#RRGGBB`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
}

/// Database and collection the submitted data is stored in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceTarget {
    pub database: String,
    pub collection: String,
}

/// Input control type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Email,
    Password,
    Number,
    Date,
    Tel,
    Url,
    Textarea,
}

impl FieldType {
    pub const ALL: [FieldType; 8] = [
        FieldType::Text,
        FieldType::Email,
        FieldType::Password,
        FieldType::Number,
        FieldType::Date,
        FieldType::Tel,
        FieldType::Url,
        FieldType::Textarea,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Password => "password",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Tel => "tel",
            FieldType::Url => "url",
            FieldType::Textarea => "textarea",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual style of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonVariant {
    Default,
    Destructive,
    Outline,
    Secondary,
    Ghost,
    Link,
}

impl ButtonVariant {
    pub const ALL: [ButtonVariant; 6] = [
        ButtonVariant::Default,
        ButtonVariant::Destructive,
        ButtonVariant::Outline,
        ButtonVariant::Secondary,
        ButtonVariant::Ghost,
        ButtonVariant::Link,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonVariant::Default => "default",
            ButtonVariant::Destructive => "destructive",
            ButtonVariant::Outline => "outline",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Ghost => "ghost",
            ButtonVariant::Link => "link",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == name)
    }
}

impl fmt::Display for ButtonVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole-form layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutStyle {
    Default,
    Card,
    Inline,
}

impl LayoutStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutStyle::Default => "Default",
            LayoutStyle::Card => "Card",
            LayoutStyle::Inline => "Inline",
        }
    }

    /// Unrecognized names fall back to the stacked default layout
    pub fn from_name(name: &str) -> Self {
        match name {
            "Card" => LayoutStyle::Card,
            "Inline" => LayoutStyle::Inline,
            _ => LayoutStyle::Default,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

impl HorizontalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            HorizontalAlign::Left => "Left",
            HorizontalAlign::Center => "Center",
            HorizontalAlign::Right => "Right",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Left" => Some(HorizontalAlign::Left),
            "Center" => Some(HorizontalAlign::Center),
            "Right" => Some(HorizontalAlign::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "Top",
            VerticalAlign::Center => "Center",
            VerticalAlign::Bottom => "Bottom",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Top" => Some(VerticalAlign::Top),
            "Center" => Some(VerticalAlign::Center),
            "Bottom" => Some(VerticalAlign::Bottom),
            _ => None,
        }
    }
}

/// Endpoint registration convention of the target application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutingStyle {
    /// Directory-per-route handlers exporting HTTP method functions
    App,
    /// Flat files exporting a request/response handler
    Pages,
}

impl RoutingStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingStyle::App => "app",
            RoutingStyle::Pages => "pages",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "app" => Some(RoutingStyle::App),
            "pages" => Some(RoutingStyle::Pages),
            _ => None,
        }
    }
}

impl fmt::Display for RoutingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_names_round_trip() {
        for t in FieldType::ALL {
            assert_eq!(FieldType::from_name(t.as_str()), Some(t));
        }
        for v in ButtonVariant::ALL {
            assert_eq!(ButtonVariant::from_name(v.as_str()), Some(v));
        }
        assert_eq!(FieldType::from_name("checkbox"), None);
    }

    #[test]
    fn test_unknown_layout_falls_back_to_default() {
        assert_eq!(LayoutStyle::from_name("Card"), LayoutStyle::Card);
        assert_eq!(LayoutStyle::from_name("Grid"), LayoutStyle::Default);
        assert_eq!(LayoutStyle::from_name(""), LayoutStyle::Default);
    }

    #[test]
    fn test_submit_button_lookup() {
        let mut spec = FormSpec::new("Contact");
        spec.buttons = vec![
            ButtonSpec::new("Cancel", ButtonVariant::Ghost),
            ButtonSpec::new("Send", ButtonVariant::Default),
        ];
        spec.submit_index = 2;
        assert!(spec.is_submit(2));
        assert!(!spec.is_submit(1));
    }
}
