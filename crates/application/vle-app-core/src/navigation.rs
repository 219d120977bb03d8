use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::ports::Navigator;

struct ArmedRedirect {
    path: String,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Drop for ArmedRedirect {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// One-shot delayed redirect owned by a form instance.
///
/// Arming replaces any pending redirect. Dropping the scheduler cancels it.
pub struct NavigationScheduler<N> {
    navigator: Arc<N>,
    armed: Mutex<Option<ArmedRedirect>>,
}

impl<N: Navigator> NavigationScheduler<N> {
    pub fn new(navigator: Arc<N>) -> Self {
        Self {
            navigator,
            armed: Mutex::new(None),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<ArmedRedirect>> {
        self.armed.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Must be called from within a tokio runtime.
    pub fn arm_redirect(&self, path: impl Into<String>, delay: Duration) {
        let path = path.into();
        let mut slot = self.slot();
        if let Some(previous) = slot.take() {
            debug!(previous = %previous.path, next = %path, "replacing armed redirect");
        }

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let navigator = self.navigator.clone();
        let target = path.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    debug!(path = %target, "redirect cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    info!(path = %target, "redirecting");
                    navigator.navigate(&target);
                }
            }
        });

        debug!(%path, delay_ms = delay.as_millis() as u64, "redirect armed");
        *slot = Some(ArmedRedirect {
            path,
            token,
            handle,
        });
    }

    /// Returns whether a pending redirect was stopped.
    pub fn cancel(&self) -> bool {
        self.slot()
            .take()
            .is_some_and(|armed| !armed.handle.is_finished())
    }

    /// Path of the redirect that has not fired yet.
    pub fn pending(&self) -> Option<String> {
        self.slot()
            .as_ref()
            .filter(|armed| !armed.handle.is_finished())
            .map(|armed| armed.path.clone())
    }

    pub fn is_armed(&self) -> bool {
        self.pending().is_some()
    }

    /// Wait until the armed redirect has fired or been cancelled.
    pub async fn settle(&self) {
        let armed = self.slot().take();
        if let Some(mut armed) = armed {
            let _ = (&mut armed.handle).await;
        }
    }
}
