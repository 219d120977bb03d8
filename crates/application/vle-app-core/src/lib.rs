pub mod controller;
pub mod form_core;
pub mod navigation;
pub mod ports;
pub mod session;

pub use controller::{SubmissionController, SubmitOutcome};
pub use form_core::*;
pub use navigation::NavigationScheduler;
pub use ports::*;
pub use session::{clear_session, load_session, store_session};
