pub mod fields;
pub mod forms;
pub mod outcome;
pub mod session;
pub mod state;
pub mod validation;

pub use fields::{FieldErrors, FieldName, FieldValue, Fields, FormError};
pub use forms::{
    CourseForm, Endpoint, FormDefinition, LoginForm, MalformedSuccess, Redirect, RegisterForm,
    SuccessPlan,
};
pub use outcome::{decode_response, Acceptance, SubmissionResult};
pub use session::Session;
pub use state::{ApiMessage, FormState, MessageKind, NETWORK_ERROR_MESSAGE, VALIDATION_FAILED_MESSAGE};
