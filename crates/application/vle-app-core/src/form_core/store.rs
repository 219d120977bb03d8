use std::sync::{Arc, Mutex, MutexGuard};

use vle_core::{FieldErrors, FieldValue, Fields, FormError, FormState};

use super::{events::FormEvent, reducer::reduce};

/// How a submit attempt got past (or stopped at) the local checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// Another submission is outstanding. Nothing changed.
    Busy,
    Invalid(FieldErrors),
    /// The guard is held; these are the values to send.
    Ready(Fields),
}

#[derive(Clone)]
pub struct FormStore {
    inner: Arc<Mutex<FormState>>,
}

impl FormStore {
    pub fn new(state: FormState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    fn guard(&self) -> MutexGuard<'_, FormState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> FormState {
        self.guard().clone()
    }

    pub fn apply(&self, ev: FormEvent) {
        let mut guard = self.guard();
        let next = reduce(guard.clone(), ev);
        *guard = next;
    }

    /// Apply a user edit, refusing names and kinds the form does not have.
    pub fn edit(&self, name: &str, value: FieldValue) -> Result<(), FormError> {
        let mut guard = self.guard();
        guard.fields.check(name, &value)?;
        let next = reduce(
            guard.clone(),
            FormEvent::FieldEdited {
                name: name.to_string(),
                value,
            },
        );
        *guard = next;
        Ok(())
    }

    /// Guard check, banner clear, validation and guard acquisition as one step.
    pub fn begin_submit(&self, validate: impl FnOnce(&Fields) -> FieldErrors) -> SubmitStart {
        let mut guard = self.guard();
        if guard.is_submitting {
            return SubmitStart::Busy;
        }

        let next = reduce(guard.clone(), FormEvent::SubmitRequested);
        let errors = validate(&next.fields);
        if !errors.is_empty() {
            *guard = reduce(
                next,
                FormEvent::ValidationFailed {
                    errors: errors.clone(),
                },
            );
            return SubmitStart::Invalid(errors);
        }

        let next = reduce(next, FormEvent::RequestStarted);
        let fields = next.fields.clone();
        *guard = next;
        SubmitStart::Ready(fields)
    }
}
