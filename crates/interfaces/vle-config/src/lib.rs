//! Central configuration constants for the API contract, session storage and navigation.

/// API base URL used when neither a flag nor the environment provides one.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Environment variable consulted for the API base URL.
pub const API_BASE_URL_ENV: &str = "VLE_API_BASE_URL";

/// Environment variable consulted for the session file location.
pub const SESSION_FILE_ENV: &str = "VLE_SESSION_FILE";

/// Per-request timeout for form submissions (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Storage key holding the bearer token written on login.
pub const SESSION_TOKEN_KEY: &str = "userToken";

/// Storage key holding the JSON snapshot of the logged-in user.
pub const USER_PROFILE_KEY: &str = "userData";

/// Where a successful login navigates to.
pub const LOGIN_REDIRECT_PATH: &str = "/Courses";

/// Delay before the post-login redirect fires (milliseconds).
pub const LOGIN_REDIRECT_DELAY_MS: u64 = 1500;

/// Where a successful registration navigates to.
pub const REGISTER_REDIRECT_PATH: &str = "/login";

/// Delay before the post-registration redirect fires (milliseconds).
pub const REGISTER_REDIRECT_DELAY_MS: u64 = 2000;

/// Minimum password length accepted by the registration form.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Pick the API base URL: explicit value first, then the built-in default.
/// Surrounding whitespace and trailing slashes are dropped.
pub fn resolve_api_base_url(explicit: Option<&str>) -> String {
    let raw = explicit
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL);
    raw.trim_end_matches('/').to_string()
}
