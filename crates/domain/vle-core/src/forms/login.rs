use serde_json::Value;

use crate::fields::{FieldErrors, FieldValue, Fields};
use crate::outcome::Acceptance;
use crate::session::Session;
use crate::validation::Checks;

use super::{Endpoint, FormDefinition, MalformedSuccess, Redirect, SuccessPlan};

#[derive(Debug, Clone, Copy, Default)]
pub struct LoginForm;

impl FormDefinition for LoginForm {
    fn name(&self) -> &'static str {
        "login"
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint {
            path: "login",
            acceptance: Acceptance::Envelope,
            authenticated: false,
        }
    }

    fn initial_fields(&self) -> Fields {
        Fields::new([
            ("email", FieldValue::text("")),
            ("password", FieldValue::text("")),
            ("rememberMe", FieldValue::Toggle(false)),
        ])
    }

    fn validate(&self, fields: &Fields) -> FieldErrors {
        let mut checks = Checks::new(fields);
        checks
            .field("email")
            .required("Email is required")
            .email("Email is invalid");
        checks.field("password").required("Password is required");
        checks.finish()
    }

    fn payload(&self, fields: &Fields) -> Value {
        fields.project(&["email", "password"])
    }

    fn on_success(&self, payload: &Value) -> Result<SuccessPlan, MalformedSuccess> {
        let token = payload
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or(MalformedSuccess("data.token"))?;
        let user = payload.get("user").cloned().unwrap_or(Value::Null);

        Ok(SuccessPlan {
            message: "Login successful! Redirecting...".to_string(),
            reset_fields: false,
            redirect: Some(Redirect::after_ms(
                vle_config::LOGIN_REDIRECT_PATH,
                vle_config::LOGIN_REDIRECT_DELAY_MS,
            )),
            session: Some(Session {
                token: Some(token.to_string()),
                user: Some(user),
            }),
        })
    }

    fn failure_message(&self) -> &'static str {
        "Login failed."
    }
}
