//! Validation rule compiler
//!
//! Turns a field's rule string (`required,min:3,max:50,email`) into the
//! ordered constraint chain of its schema entry. Checks short-circuit in
//! chain order, so the order here decides which message the user sees.

use super::fragment::js_string;
use crate::spec::{FieldSpec, FieldType};
use tracing::warn;

/// Kind of a compiled validation check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Non-empty string
    Required,
    /// Minimum length
    Min,
    /// Maximum length
    Max,
    Email,
    /// Numeric fields replace the whole chain with this
    Integer,
}

/// Rule names accepted in a validation string
const RULES: &[(&str, ConstraintKind)] = &[
    ("required", ConstraintKind::Required),
    ("min", ConstraintKind::Min),
    ("max", ConstraintKind::Max),
    ("email", ConstraintKind::Email),
];

impl ConstraintKind {
    fn takes_value(&self) -> bool {
        matches!(self, ConstraintKind::Min | ConstraintKind::Max)
    }

    fn default_message(&self, param: Option<u32>) -> String {
        match (self, param) {
            (ConstraintKind::Required, _) => "This field is required".to_string(),
            (ConstraintKind::Min, Some(n)) => format!("Minimum {} characters required", n),
            (ConstraintKind::Max, Some(n)) => format!("Maximum {} characters allowed", n),
            (ConstraintKind::Min | ConstraintKind::Max, None) => "Invalid length".to_string(),
            (ConstraintKind::Email, _) => "Invalid email address".to_string(),
            (ConstraintKind::Integer, _) => "Must be a valid integer".to_string(),
        }
    }
}

/// One check in a field's schema chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledConstraint {
    pub kind: ConstraintKind,
    /// Length bound for `Min`/`Max`
    pub param: Option<u32>,
    pub message: String,
}

impl CompiledConstraint {
    fn new(kind: ConstraintKind, param: Option<u32>, custom: Option<&str>) -> Self {
        let message = custom
            .map(str::to_string)
            .unwrap_or_else(|| kind.default_message(param));
        Self {
            kind,
            param,
            message,
        }
    }

    /// The chained schema method for this check
    fn method(&self) -> String {
        let message = js_string(&self.message);
        match (self.kind, self.param) {
            (ConstraintKind::Required, _) => format!(".nonempty({})", message),
            (ConstraintKind::Min, Some(n)) => format!(".min({}, {})", n, message),
            (ConstraintKind::Max, Some(n)) => format!(".max({}, {})", n, message),
            (ConstraintKind::Min | ConstraintKind::Max, None) => String::new(),
            (ConstraintKind::Email, _) => format!(".email({})", message),
            (ConstraintKind::Integer, _) => format!(".int({})", message),
        }
    }
}

/// Compile a field's rule string into its ordered constraint chain
///
/// Unknown rule names and `min`/`max` tokens without a non-negative integer
/// value are skipped with a warning. Email fields always end with an email
/// check; number fields compile to a single integer check whatever the rules
/// say.
pub fn compile(field: &FieldSpec) -> Vec<CompiledConstraint> {
    let custom = field.error_message.as_deref();

    if field.field_type == FieldType::Number {
        return vec![CompiledConstraint::new(ConstraintKind::Integer, None, custom)];
    }

    let mut chain = Vec::new();
    for token in field.validation.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let (rule, value) = match token.split_once(':') {
            Some((rule, value)) => (rule.trim(), Some(value.trim())),
            None => (token, None),
        };

        let Some(&(_, kind)) = RULES.iter().find(|(name, _)| *name == rule) else {
            warn!(field = %field.name, rule, "ignoring unknown validation rule");
            continue;
        };

        let param = if kind.takes_value() {
            match value.and_then(|v| v.parse::<u32>().ok()) {
                Some(n) => Some(n),
                None => {
                    warn!(
                        field = %field.name,
                        rule,
                        value = value.unwrap_or(""),
                        "ignoring length rule without a numeric value"
                    );
                    continue;
                }
            }
        } else {
            None
        };

        chain.push(CompiledConstraint::new(kind, param, custom));
    }

    if field.field_type == FieldType::Email {
        chain.push(CompiledConstraint::new(ConstraintKind::Email, None, custom));
    }

    chain
}

/// Schema expression for a compiled chain, e.g. `z.string().nonempty("...")`
pub fn schema_expression(chain: &[CompiledConstraint]) -> String {
    let base = if chain.iter().any(|c| c.kind == ConstraintKind::Integer) {
        "z.number()"
    } else {
        "z.string()"
    };
    let mut expr = base.to_string();
    for constraint in chain {
        expr.push_str(&constraint.method());
    }
    expr
}
