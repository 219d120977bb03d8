//! Field rules and the per-form check builder.
//!
//! Rules are plain predicates. [`Checks`] walks a [`Fields`] snapshot and
//! records the first failing rule per field; it never touches form state.

use std::sync::OnceLock;

use regex::Regex;

use crate::fields::{FieldErrors, Fields};

static EMAIL_SHAPE: OnceLock<Regex> = OnceLock::new();

fn email_shape() -> &'static Regex {
    EMAIL_SHAPE.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

/// Non-empty after trimming surrounding whitespace.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Loose `x@y.z` shape check, not RFC validation.
pub fn is_email_shaped(value: &str) -> bool {
    email_shape().is_match(value)
}

/// Length in characters, not bytes.
pub fn has_min_len(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

pub fn is_one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value)
}

pub struct Checks<'a> {
    fields: &'a Fields,
    errors: FieldErrors,
}

impl<'a> Checks<'a> {
    pub fn new(fields: &'a Fields) -> Self {
        Self {
            fields,
            errors: FieldErrors::new(),
        }
    }

    pub fn field(&mut self, name: &'static str) -> FieldCheck<'_, 'a> {
        let fields: &'a Fields = self.fields;
        let value = fields.text(name);
        FieldCheck {
            checks: self,
            name,
            value,
            failed: false,
        }
    }

    pub fn finish(self) -> FieldErrors {
        self.errors
    }
}

/// Rule chain for one field. Once a rule fails the rest are skipped.
pub struct FieldCheck<'c, 'a> {
    checks: &'c mut Checks<'a>,
    name: &'static str,
    value: &'a str,
    failed: bool,
}

impl<'a> FieldCheck<'_, 'a> {
    pub fn rule(mut self, passes: impl FnOnce(&str) -> bool, message: &str) -> Self {
        if !self.failed && !passes(self.value) {
            self.checks
                .errors
                .insert(self.name.to_string(), message.to_string());
            self.failed = true;
        }
        self
    }

    pub fn required(self, message: &str) -> Self {
        self.rule(is_present, message)
    }

    pub fn email(self, message: &str) -> Self {
        self.rule(is_email_shaped, message)
    }

    pub fn min_len(self, min: usize, message: &str) -> Self {
        self.rule(|v| has_min_len(v, min), message)
    }

    pub fn one_of(self, allowed: &[&str], message: &str) -> Self {
        self.rule(|v| is_one_of(v, allowed), message)
    }

    /// Exact, case-sensitive equality with another field's raw value.
    pub fn equals_field(self, other: &'static str, message: &str) -> Self {
        let fields: &'a Fields = self.checks.fields;
        let expected = fields.text(other);
        self.rule(|v| v == expected, message)
    }
}
