//! Request bodies and query strings accepted by the HTTP layer, together with
//! their conversion into validated domain payloads.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod products;

/// Rule a field failed to satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationRule {
    /// The field is missing or blank.
    Required,
    /// The value is below its allowed minimum.
    Min,
    /// The value is not a well-formed URL.
    Url,
    /// Any rule not covered above.
    Invalid,
}

impl ValidationRule {
    fn from_code(code: &str) -> Self {
        match code {
            "required" | "length" => Self::Required,
            "min" | "range" => Self::Min,
            "url" => Self::Url,
            _ => Self::Invalid,
        }
    }
}

/// A single failed field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule: ValidationRule,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, rule: ValidationRule, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule,
            message: message.into(),
        }
    }
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<TypeConstraintError> for FieldViolation {
    fn from(value: TypeConstraintError) -> Self {
        let rule = match value {
            TypeConstraintError::EmptyString(_) => ValidationRule::Required,
            TypeConstraintError::BelowMinimum(..)
            | TypeConstraintError::NegativeNumber(_)
            | TypeConstraintError::NonPositiveId(_) => ValidationRule::Min,
            TypeConstraintError::InvalidUrl(_) => ValidationRule::Url,
            TypeConstraintError::InvalidValue(_) => ValidationRule::Invalid,
        };
        let field = value.field().unwrap_or("value");
        Self::new(field, rule, value.to_string())
    }
}

/// Wire name of a struct field (`image_url` -> `imageUrl`).
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            name.extend(ch.to_uppercase());
            upper = false;
        } else {
            name.push(ch);
        }
    }
    name
}

/// Flatten `validator` output into field violations ordered by field name.
pub fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            let field = wire_name(field.as_ref());
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                FieldViolation::new(field.clone(), ValidationRule::from_code(&error.code), message)
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

/// Keep the value of a constrained constructor, or record why it failed.
pub(crate) fn check<T>(
    violations: &mut Vec<FieldViolation>,
    result: Result<T, TypeConstraintError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            violations.push(err.into());
            None
        }
    }
}
