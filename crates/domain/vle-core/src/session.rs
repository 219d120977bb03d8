use serde_json::Value;

/// What the login flow leaves behind in storage. Either part may be missing;
/// a missing part means "no active session" for whoever asks for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<Value>,
}

impl Session {
    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }

    /// The stored user's `id`, rendered as text. Numbers and strings are accepted.
    pub fn user_id(&self) -> Option<String> {
        match self.user.as_ref()?.get("id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_id_accepts_numbers_and_strings() {
        let numeric = Session {
            token: None,
            user: Some(json!({ "id": 7, "name": "Ada" })),
        };
        assert_eq!(numeric.user_id().as_deref(), Some("7"));

        let textual = Session {
            token: None,
            user: Some(json!({ "id": "u-7" })),
        };
        assert_eq!(textual.user_id().as_deref(), Some("u-7"));

        assert_eq!(Session::default().user_id(), None);
    }
}
