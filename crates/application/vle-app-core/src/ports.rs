pub use vle_infra::{ApiTransport, SessionStorage};

/// Performs a page transition. Called from the redirect timer task.
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, path: &str);
}
