//! Inbound request validation.
//!
//! Schemas derive [`validator::Validate`]; a rejection is reported as a
//! [`ValidationFailure`] naming each offending field and the rule it broke.

mod post;

use std::borrow::Cow;

use convert_case::{Case, Casing};
use thiserror::Error;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::domain::parse_sort_by;

pub use post::{CreatePostBody, ListPostsQuery, PostIdParams, UpdatePostBody, validate_update};

/// A single broken rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Wire (camelCase) name of the field, or `body` for whole-object rules.
    pub field: String,
    /// Rule code, e.g. `required`, `length`, `object_id`.
    pub rule: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, rule: impl Into<String>) -> Self {
        let rule = rule.into();
        Self {
            field: field.into(),
            message: default_message(&rule).to_string(),
            rule,
        }
    }

    fn from_error(field: String, error: &ValidationError) -> Self {
        let rule = error.code.to_string();
        let message = error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| default_message(&rule).to_string());
        Self {
            field,
            rule,
            message,
        }
    }
}

/// Input rejected before it reaches the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", describe(.violations))]
pub struct ValidationFailure {
    pub violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    pub fn single(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation::new(field, rule)],
        }
    }

    /// Whether `field` broke `rule`.
    pub fn has(&self, field: &str, rule: &str) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.rule == rule)
    }

    /// Human-readable `field: message` lines.
    pub fn messages(&self) -> Vec<String> {
        self.violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect()
    }

    fn merge(mut self, other: ValidationFailure) -> Self {
        self.violations.extend(other.violations);
        self.sort();
        self
    }

    fn sort(&mut self) {
        self.violations
            .sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.rule.cmp(&b.rule)));
    }
}

impl From<ValidationErrors> for ValidationFailure {
    fn from(errors: ValidationErrors) -> Self {
        let mut failure = Self {
            violations: errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    let field = wire_name(&field);
                    errs.iter()
                        .map(move |e| FieldViolation::from_error(field.clone(), e))
                })
                .collect(),
        };
        failure.sort();
        failure
    }
}

fn describe(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join(", ")
}

fn default_message(rule: &str) -> &'static str {
    match rule {
        "required" => "is required",
        "length" => "must not be empty",
        "object_id" => "must be a valid id",
        "sort_by" => "must be a list of field:asc|desc",
        "at_least_one" => "must contain at least one of text, images",
        "range" => "is out of range",
        _ => "is invalid",
    }
}

/// `created_by` -> `createdBy`; struct-level errors are reported against `body`.
fn wire_name(field: &str) -> String {
    match field {
        "__all__" => "body".to_string(),
        field => field.to_case(Case::Camel),
    }
}

/// Identifier format check. Existence is not checked.
fn object_id(value: &str) -> Result<(), ValidationError> {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("object_id"))
}

fn sort_by(value: &str) -> Result<(), ValidationError> {
    parse_sort_by(value).map(|_| ()).map_err(|e| {
        ValidationError::new("sort_by").with_message(Cow::Owned(e.to_string()))
    })
}

/// Parse an identifier that has already passed `object_id`, reporting it against `field` otherwise.
fn parse_id(field: &str, value: Option<&str>) -> Result<Uuid, ValidationFailure> {
    let value = value.ok_or_else(|| ValidationFailure::single(field, "required"))?;
    Uuid::parse_str(value).map_err(|_| ValidationFailure::single(field, "object_id"))
}
