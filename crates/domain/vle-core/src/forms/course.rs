use serde_json::Value;

use crate::fields::{FieldErrors, FieldName, FieldValue, Fields};
use crate::outcome::Acceptance;
use crate::session::Session;
use crate::validation::Checks;

use super::{Endpoint, FormDefinition, MalformedSuccess, SuccessPlan};

pub const COURSE_CATEGORIES: &[&str] = &[
    "Computer Science",
    "Mathematics",
    "Business",
    "Arts & Humanities",
    "Science",
    "Social Sciences",
    "Language",
    "Health & Medicine",
];

pub const COURSE_LEVELS: &[&str] = &["beginner", "intermediate", "advanced"];

#[derive(Debug, Clone, Copy, Default)]
pub struct CourseForm;

impl FormDefinition for CourseForm {
    fn name(&self) -> &'static str {
        "create-course"
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint {
            path: "courses",
            acceptance: Acceptance::Status,
            authenticated: true,
        }
    }

    fn initial_fields(&self) -> Fields {
        Fields::new([
            ("title", FieldValue::text("")),
            ("description", FieldValue::text("")),
            ("category", FieldValue::text("")),
            ("level", FieldValue::text("beginner")),
            ("instructor_id", FieldValue::text("")),
        ])
    }

    fn validate(&self, fields: &Fields) -> FieldErrors {
        let mut checks = Checks::new(fields);
        checks.field("title").required("Course title is required");
        checks.field("description").required("Description is required");
        checks
            .field("category")
            .required("Category is required")
            .one_of(COURSE_CATEGORIES, "Please select a valid category");
        checks
            .field("level")
            .one_of(COURSE_LEVELS, "Please select a valid difficulty level");
        checks.finish()
    }

    fn payload(&self, fields: &Fields) -> Value {
        fields.project(&["title", "description", "category", "level", "instructor_id"])
    }

    fn on_success(&self, _payload: &Value) -> Result<SuccessPlan, MalformedSuccess> {
        Ok(SuccessPlan {
            message: "Course created successfully! You can now add content to your course."
                .to_string(),
            reset_fields: true,
            redirect: None,
            session: None,
        })
    }

    fn failure_message(&self) -> &'static str {
        "There was an error creating your course. Please check your inputs and try again."
    }

    fn prefill(&self, session: &Session) -> Vec<(FieldName, FieldValue)> {
        session
            .user_id()
            .map(|id| vec![("instructor_id", FieldValue::Text(id))])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_must_be_a_declared_choice() {
        let mut fields = CourseForm.initial_fields();
        fields.set("title", "Rust".into()).unwrap();
        fields.set("description", "Ownership".into()).unwrap();
        fields.set("category", "Astrology".into()).unwrap();
        let errors = CourseForm.validate(&fields);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["category"], "Please select a valid category");

        fields.set("category", "Computer Science".into()).unwrap();
        assert!(CourseForm.validate(&fields).is_empty());
    }

    #[test]
    fn prefill_reads_instructor_from_session_user() {
        let session = Session {
            token: Some("t".into()),
            user: Some(json!({ "id": 12 })),
        };
        assert_eq!(
            CourseForm.prefill(&session),
            vec![("instructor_id", FieldValue::text("12"))]
        );
        assert!(CourseForm.prefill(&Session::default()).is_empty());
    }
}
