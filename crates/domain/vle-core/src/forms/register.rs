use serde_json::Value;

use crate::fields::{FieldErrors, FieldValue, Fields};
use crate::outcome::Acceptance;
use crate::validation::Checks;

use super::{Endpoint, FormDefinition, MalformedSuccess, Redirect, SuccessPlan};

pub const REGISTER_ROLES: &[&str] = &["student", "instructor"];

#[derive(Debug, Clone, Copy, Default)]
pub struct RegisterForm;

impl FormDefinition for RegisterForm {
    fn name(&self) -> &'static str {
        "register"
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint {
            path: "users",
            acceptance: Acceptance::Envelope,
            authenticated: false,
        }
    }

    fn initial_fields(&self) -> Fields {
        Fields::new([
            ("name", FieldValue::text("")),
            ("email", FieldValue::text("")),
            ("password", FieldValue::text("")),
            ("confirmPassword", FieldValue::text("")),
            ("role", FieldValue::text("student")),
        ])
    }

    fn validate(&self, fields: &Fields) -> FieldErrors {
        let mut checks = Checks::new(fields);
        checks.field("name").required("Name is required");
        checks
            .field("email")
            .required("Email is required")
            .email("Email is invalid");
        checks
            .field("password")
            .required("Password is required")
            .min_len(
                vle_config::MIN_PASSWORD_LEN,
                "Password must be at least 8 characters",
            );
        checks
            .field("confirmPassword")
            .required("Confirm password is required")
            .equals_field("password", "Passwords do not match");
        checks
            .field("role")
            .required("Role is required")
            .one_of(REGISTER_ROLES, "Please select a valid role");
        checks.finish()
    }

    fn payload(&self, fields: &Fields) -> Value {
        fields.project(&["name", "email", "password", "role"])
    }

    fn on_success(&self, payload: &Value) -> Result<SuccessPlan, MalformedSuccess> {
        let message = match payload
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
        {
            Some(name) => {
                format!("Account created successfully! Welcome, {name}. Redirecting to login...")
            }
            None => "Account created successfully! Redirecting to login...".to_string(),
        };

        Ok(SuccessPlan {
            message,
            reset_fields: true,
            redirect: Some(Redirect::after_ms(
                vle_config::REGISTER_REDIRECT_PATH,
                vle_config::REGISTER_REDIRECT_DELAY_MS,
            )),
            session: None,
        })
    }

    fn failure_message(&self) -> &'static str {
        "Registration failed."
    }
}
