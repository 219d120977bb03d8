use vle_core::{FieldErrors, FieldValue};

#[derive(Debug, Clone)]
pub enum FormEvent {
    // Editing
    FieldEdited {
        name: String,
        value: FieldValue,
    },
    FieldPrefilled {
        name: String,
        value: FieldValue,
    },
    ResetRequested,

    // Submission lifecycle
    SubmitRequested,
    ValidationFailed {
        errors: FieldErrors,
    },
    RequestStarted,
    RequestSucceeded {
        message: String,
        reset_fields: bool,
    },
    RequestRejected {
        message: String,
        field_errors: FieldErrors,
    },
    TransportFailed,
    /// The submission future went away before a response was handled.
    RequestAbandoned,
}
