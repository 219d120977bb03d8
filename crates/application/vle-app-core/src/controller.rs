use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;
use vle_core::{FieldErrors, FieldValue, FormDefinition, FormError, FormState, SubmissionResult};

use crate::form_core::{FormEvent, FormStore, SubmitStart};
use crate::navigation::NavigationScheduler;
use crate::ports::{ApiTransport, Navigator, SessionStorage};
use crate::session::{load_session, store_session};

/// What one call to [`SubmissionController::submit`] ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already outstanding; nothing happened.
    Skipped,
    Invalid(FieldErrors),
    Succeeded,
    Rejected,
    Unreachable,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Releases the submit guard if the in-flight request is dropped before a
/// terminal event is applied.
struct InFlight<'a> {
    store: &'a FormStore,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, ev: FormEvent) {
        self.store.apply(ev);
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("submission abandoned before a response was handled");
            self.store.apply(FormEvent::RequestAbandoned);
        }
    }
}

/// One mounted form: its state, its submit lifecycle and its pending redirect.
/// Dropping the controller unmounts the form and cancels the redirect.
pub struct SubmissionController<D, T, S, N> {
    id: Uuid,
    definition: D,
    store: FormStore,
    transport: Arc<T>,
    storage: Arc<S>,
    navigation: NavigationScheduler<N>,
}

impl<D, T, S, N> SubmissionController<D, T, S, N>
where
    D: FormDefinition,
    T: ApiTransport,
    S: SessionStorage,
    N: Navigator,
{
    /// Fresh form state from the definition's defaults. Call
    /// [`Self::load_session_prefill`] once stored session data is available.
    pub fn mount(definition: D, transport: Arc<T>, storage: Arc<S>, navigator: Arc<N>) -> Self {
        let state = FormState::new(definition.initial_fields());
        let id = Uuid::new_v4();
        debug!(form = definition.name(), %id, "form mounted");
        Self {
            id,
            definition,
            store: FormStore::new(state),
            transport,
            storage,
            navigation: NavigationScheduler::new(navigator),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn definition(&self) -> &D {
        &self.definition
    }

    pub fn state(&self) -> FormState {
        self.store.state()
    }

    pub fn navigation(&self) -> &NavigationScheduler<N> {
        &self.navigation
    }

    /// Seed fields from stored session data. Safe to call at any point after mount.
    pub fn load_session_prefill(&self) {
        let session = load_session(self.storage.as_ref());
        for (name, value) in self.definition.prefill(&session) {
            self.store.apply(FormEvent::FieldPrefilled {
                name: name.to_string(),
                value,
            });
        }
    }

    /// A user edit. Unknown names and kind changes are refused up front.
    pub fn set_field(&self, name: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        self.store.edit(name, value.into())
    }

    pub fn reset(&self) {
        self.store.apply(FormEvent::ResetRequested);
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let span = info_span!("submit", form = self.definition.name(), id = %self.id);
        self.submit_inner().instrument(span).await
    }

    async fn submit_inner(&self) -> SubmitOutcome {
        let fields = match self.store.begin_submit(|f| self.definition.validate(f)) {
            SubmitStart::Busy => {
                debug!("submission already in flight, ignoring");
                return SubmitOutcome::Skipped;
            }
            SubmitStart::Invalid(errors) => {
                debug!(failing = errors.len(), "validation failed");
                return SubmitOutcome::Invalid(errors);
            }
            SubmitStart::Ready(fields) => fields,
        };
        let in_flight = InFlight {
            store: &self.store,
            settled: false,
        };

        let endpoint = self.definition.endpoint();
        let body = self.definition.payload(&fields);
        let bearer = if endpoint.authenticated {
            load_session(self.storage.as_ref()).token
        } else {
            None
        };

        let result = self
            .transport
            .submit(&endpoint, &body, bearer.as_deref())
            .await;

        match result {
            SubmissionResult::Success { payload } => {
                let plan = match self.definition.on_success(&payload) {
                    Ok(plan) => plan,
                    Err(e) => {
                        warn!("treating accepted response as a failure: {e}");
                        in_flight.settle(FormEvent::RequestRejected {
                            message: self.definition.failure_message().to_string(),
                            field_errors: FieldErrors::new(),
                        });
                        return SubmitOutcome::Rejected;
                    }
                };

                if let Some(session) = &plan.session {
                    if let Err(e) = store_session(self.storage.as_ref(), session) {
                        warn!("failed to persist session: {e}");
                    }
                }

                in_flight.settle(FormEvent::RequestSucceeded {
                    message: plan.message,
                    reset_fields: plan.reset_fields,
                });
                if let Some(redirect) = plan.redirect {
                    self.navigation.arm_redirect(redirect.path, redirect.delay);
                }
                info!("submission succeeded");
                SubmitOutcome::Succeeded
            }

            SubmissionResult::Rejected {
                message,
                field_errors,
            } => {
                let message =
                    message.unwrap_or_else(|| self.definition.failure_message().to_string());
                info!(%message, fields = field_errors.len(), "submission rejected");
                in_flight.settle(FormEvent::RequestRejected {
                    message,
                    field_errors,
                });
                SubmitOutcome::Rejected
            }

            SubmissionResult::Unreachable { message } => {
                warn!("submission did not get through: {message}");
                in_flight.settle(FormEvent::TransportFailed);
                SubmitOutcome::Unreachable
            }
        }
    }
}
