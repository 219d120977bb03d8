use tracing::warn;
use vle_core::{ApiMessage, FieldErrors, FormState, NETWORK_ERROR_MESSAGE, VALIDATION_FAILED_MESSAGE};

use super::events::FormEvent;

pub fn reduce(mut state: FormState, ev: FormEvent) -> FormState {
    match ev {
        FormEvent::FieldEdited { name, value } => {
            if let Err(e) = state.set_field(&name, value) {
                warn!("ignoring edit: {e}");
            }
        }

        FormEvent::FieldPrefilled { name, value } => {
            if let Err(e) = state.prefill_field(&name, value) {
                warn!("ignoring prefill: {e}");
            }
        }

        FormEvent::ResetRequested => {
            if !state.is_submitting {
                state.reset_fields();
                state.errors = FieldErrors::new();
                state.api_message = ApiMessage::none();
            }
        }

        FormEvent::SubmitRequested => {
            state.api_message = ApiMessage::none();
        }

        FormEvent::ValidationFailed { errors } => {
            state.set_errors(errors);
            state.api_message = ApiMessage::error(VALIDATION_FAILED_MESSAGE);
        }

        FormEvent::RequestStarted => {
            state.errors = FieldErrors::new();
            state.is_submitting = true;
        }

        FormEvent::RequestSucceeded {
            message,
            reset_fields,
        } => {
            if reset_fields {
                state.reset_fields();
            }
            state.errors = FieldErrors::new();
            state.api_message = ApiMessage::success(message);
            state.is_submitting = false;
        }

        FormEvent::RequestRejected {
            message,
            field_errors,
        } => {
            state.set_errors(field_errors);
            state.api_message = ApiMessage::error(message);
            state.is_submitting = false;
        }

        FormEvent::TransportFailed => {
            state.api_message = ApiMessage::error(NETWORK_ERROR_MESSAGE);
            state.is_submitting = false;
        }

        FormEvent::RequestAbandoned => {
            state.is_submitting = false;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use vle_core::{FieldValue, Fields, MessageKind};

    fn course_state() -> FormState {
        FormState::new(Fields::new([
            ("title", FieldValue::text("")),
            ("instructor_id", FieldValue::text("")),
        ]))
    }

    fn edit(name: &str, value: &str) -> FormEvent {
        FormEvent::FieldEdited {
            name: name.into(),
            value: FieldValue::text(value),
        }
    }

    #[test]
    fn edit_of_unknown_field_changes_nothing() {
        let before = course_state();
        let after = reduce(before.clone(), edit("slug", "x"));
        assert_eq!(before, after);
    }

    #[test]
    fn validation_failure_sets_generic_banner() {
        let s = reduce(
            course_state(),
            FormEvent::ValidationFailed {
                errors: FieldErrors::from([("title".into(), "Course title is required".into())]),
            },
        );
        assert_eq!(s.api_message.kind, MessageKind::Error);
        assert_eq!(s.api_message.text, VALIDATION_FAILED_MESSAGE);
        assert_eq!(s.error("title"), Some("Course title is required"));
        assert!(!s.is_submitting);
    }

    #[test]
    fn late_prefill_does_not_disturb_user_edits_or_banner() {
        let s = reduce(course_state(), edit("title", "Rust 101"));
        let s = reduce(
            s,
            FormEvent::ValidationFailed {
                errors: FieldErrors::new(),
            },
        );
        let s = reduce(
            s,
            FormEvent::FieldPrefilled {
                name: "instructor_id".into(),
                value: FieldValue::text("42"),
            },
        );
        assert_eq!(s.fields.text("title"), "Rust 101");
        assert_eq!(s.fields.text("instructor_id"), "42");
        assert_eq!(s.api_message.text, VALIDATION_FAILED_MESSAGE);
    }

    #[test]
    fn every_terminal_event_releases_the_guard() {
        let terminals = [
            FormEvent::RequestSucceeded {
                message: "ok".into(),
                reset_fields: true,
            },
            FormEvent::RequestRejected {
                message: "no".into(),
                field_errors: FieldErrors::new(),
            },
            FormEvent::TransportFailed,
            FormEvent::RequestAbandoned,
        ];
        for ev in terminals {
            let busy = reduce(course_state(), FormEvent::RequestStarted);
            assert!(busy.is_submitting);
            assert!(!reduce(busy, ev).is_submitting);
        }
    }

    #[test]
    fn reset_is_ignored_while_submitting() {
        let s = reduce(course_state(), edit("title", "Rust 101"));
        let s = reduce(s, FormEvent::RequestStarted);
        let s = reduce(s, FormEvent::ResetRequested);
        assert_eq!(s.fields.text("title"), "Rust 101");

        let s = reduce(s, FormEvent::TransportFailed);
        let s = reduce(s, FormEvent::ResetRequested);
        assert_eq!(s.fields.text("title"), "");
        assert!(s.api_message.is_none());
    }
}
