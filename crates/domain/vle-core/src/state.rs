use serde::Serialize;

use crate::fields::{FieldErrors, FieldValue, Fields, FormError};

/// Banner shown when local validation blocks a submission.
pub const VALIDATION_FAILED_MESSAGE: &str = "Please correct the errors in the form.";

/// Banner shown when the request could not complete or the reply was unreadable.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    None,
    Success,
    Error,
}

/// The single form-wide banner.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ApiMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl ApiMessage {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind == MessageKind::None
    }
}

/// Everything one mounted form knows about itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub fields: Fields,
    pub errors: FieldErrors,
    pub api_message: ApiMessage,
    pub is_submitting: bool,
    /// Values restored by a reset. Starts as the form defaults and picks up
    /// session prefills.
    #[serde(skip)]
    pub baseline: Fields,
}

impl FormState {
    pub fn new(defaults: Fields) -> Self {
        Self {
            fields: defaults.clone(),
            errors: FieldErrors::new(),
            api_message: ApiMessage::none(),
            is_submitting: false,
            baseline: defaults,
        }
    }

    /// A user edit: replaces one value, drops that field's error and the banner.
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        self.fields.set(name, value)?;
        self.errors.remove(name);
        self.api_message = ApiMessage::none();
        Ok(())
    }

    /// A value that arrives from stored session data. It becomes part of the
    /// baseline so resets keep it, and it leaves the banner alone.
    pub fn prefill_field(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        self.fields.set(name, value.clone())?;
        self.baseline.set(name, value)?;
        self.errors.remove(name);
        Ok(())
    }

    pub fn reset_fields(&mut self) {
        self.fields = self.baseline.clone();
    }

    /// Replace `errors`, keeping only non-empty messages for fields this form has.
    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors
            .into_iter()
            .filter(|(name, message)| !message.is_empty() && self.fields.contains(name))
            .collect();
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> FormState {
        FormState::new(Fields::new([
            ("title", FieldValue::text("")),
            ("instructor_id", FieldValue::text("")),
        ]))
    }

    #[test]
    fn edit_clears_field_error_and_banner() {
        let mut s = state();
        s.errors.insert("title".into(), "Course title is required".into());
        s.api_message = ApiMessage::error(VALIDATION_FAILED_MESSAGE);

        s.set_field("title", "Rust 101".into()).unwrap();

        assert_eq!(s.fields.text("title"), "Rust 101");
        assert!(s.error("title").is_none());
        assert!(s.api_message.is_none());
    }

    #[test]
    fn set_errors_drops_unknown_and_empty_entries() {
        let mut s = state();
        s.set_errors(FieldErrors::from([
            ("title".to_string(), "Taken".to_string()),
            ("slug".to_string(), "Bad slug".to_string()),
            ("instructor_id".to_string(), String::new()),
        ]));
        assert_eq!(s.errors.len(), 1);
        assert_eq!(s.error("title"), Some("Taken"));
    }

    #[test]
    fn prefill_survives_reset() {
        let mut s = state();
        s.prefill_field("instructor_id", "42".into()).unwrap();
        s.set_field("title", "Rust 101".into()).unwrap();
        s.reset_fields();
        assert_eq!(s.fields.text("title"), "");
        assert_eq!(s.fields.text("instructor_id"), "42");
    }
}
