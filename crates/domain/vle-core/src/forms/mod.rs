//! The three forms the application ships: login, registration and course creation.
//!
//! Each form is a unit type implementing [`FormDefinition`]. Field sets and
//! rules are fixed here; nothing about them is configurable at runtime.

mod course;
mod login;
mod register;

use std::time::Duration;

use serde_json::Value;

use crate::fields::{FieldErrors, FieldName, FieldValue, Fields};
use crate::outcome::Acceptance;
use crate::session::Session;

pub use course::{CourseForm, COURSE_CATEGORIES, COURSE_LEVELS};
pub use login::LoginForm;
pub use register::{RegisterForm, REGISTER_ROLES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Path relative to the API base, without a leading slash.
    pub path: &'static str,
    pub acceptance: Acceptance,
    /// Send the stored session token as a bearer credential.
    pub authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub path: String,
    pub delay: Duration,
}

impl Redirect {
    pub fn after_ms(path: impl Into<String>, delay_ms: u64) -> Self {
        Self {
            path: path.into(),
            delay: Duration::from_millis(delay_ms),
        }
    }
}

/// What a form does with an accepted reply.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessPlan {
    pub message: String,
    /// Put the fields back to the baseline.
    pub reset_fields: bool,
    pub redirect: Option<Redirect>,
    /// Session to persist before anything else happens.
    pub session: Option<Session>,
}

/// An accepted reply that lacks something the form depends on.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("success response is missing {0}")]
pub struct MalformedSuccess(pub &'static str);

pub trait FormDefinition: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn endpoint(&self) -> Endpoint;

    fn initial_fields(&self) -> Fields;

    /// Pure: same fields, same errors.
    fn validate(&self, fields: &Fields) -> FieldErrors;

    /// Request body. Only the fields the API expects, never confirmation or
    /// client-only toggles.
    fn payload(&self, fields: &Fields) -> Value;

    fn on_success(&self, payload: &Value) -> Result<SuccessPlan, MalformedSuccess>;

    /// Banner text for a rejection whose body carried no message.
    fn failure_message(&self) -> &'static str;

    /// Values to seed from stored session data.
    fn prefill(&self, _session: &Session) -> Vec<(FieldName, FieldValue)> {
        Vec::new()
    }
}
