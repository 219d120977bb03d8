use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type FieldName = &'static str;

/// Per-field error messages. Only failing fields are present.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("form has no field named `{0}`")]
    UnknownField(String),
    #[error("field `{field}` holds a {expected} value")]
    FieldKindMismatch {
        field: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Toggle(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Toggle(_) => None,
        }
    }

    pub fn as_toggle(&self) -> Option<bool> {
        match self {
            Self::Toggle(b) => Some(*b),
            Self::Text(_) => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Toggle(_) => "toggle",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Toggle(value)
    }
}

/// The current values of a form. The key set is fixed when the form is built;
/// [`Fields::set`] only ever replaces an existing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, FieldValue>);

impl Fields {
    pub fn new(entries: impl IntoIterator<Item = (FieldName, FieldValue)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Text value of `name`, or `""` for missing and toggle fields.
    pub fn text(&self, name: &str) -> &str {
        self.0
            .get(name)
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
    }

    pub fn toggle(&self, name: &str) -> bool {
        self.0
            .get(name)
            .and_then(FieldValue::as_toggle)
            .unwrap_or(false)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Whether `value` could be stored under `name`.
    pub fn check(&self, name: &str, value: &FieldValue) -> Result<(), FormError> {
        let current = self
            .0
            .get(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        if current.kind() != value.kind() {
            return Err(FormError::FieldKindMismatch {
                field: name.to_string(),
                expected: current.kind(),
            });
        }
        Ok(())
    }

    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        self.check(name, &value)?;
        self.0.insert(name.to_string(), value);
        Ok(())
    }

    /// JSON object holding exactly the listed fields.
    pub fn project(&self, names: &[FieldName]) -> serde_json::Value {
        let map = names
            .iter()
            .filter_map(|name| {
                self.0.get(*name).map(|value| {
                    let json = match value {
                        FieldValue::Text(s) => serde_json::Value::String(s.clone()),
                        FieldValue::Toggle(b) => serde_json::Value::Bool(*b),
                    };
                    (name.to_string(), json)
                })
            })
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}
