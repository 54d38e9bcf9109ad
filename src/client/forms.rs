use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tracing::debug;

use crate::auth::dto::{LoginRequest, SignupRequest};
use crate::auth::service::validate_signup;
use crate::client::api::{ApiError, AuthApi};

/// Local key the login form stores the token under.
pub const TOKEN_KEY: &str = "token";

/// How long a successful form lingers before navigating away.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Lifecycle of a form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
    Success,
    Failed,
}

impl Default for FormPhase {
    fn default() -> Self {
        FormPhase::Idle
    }
}

/// Screens the forms navigate to on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Products,
}

/// A navigation the rendering layer should perform after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub route: Route,
    pub delay: Duration,
}

/// Client-side persistent key/value storage for the token.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// `TokenStore` over a mutex-guarded map.
#[derive(Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().expect("token store poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .expect("token store poisoned")
            .insert(key.into(), value.into());
    }
}

/// Signup form: collects names, email and a password pair, probes for an
/// existing email, then calls signup. The token in the response is not
/// stored; the flow lands on the login screen.
#[derive(Default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,

    phase: FormPhase,
    message: Option<String>,
    email_invalid: bool,
    redirect: Option<Redirect>,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether the email field should render as invalid.
    pub fn email_invalid(&self) -> bool {
        self.email_invalid
    }

    pub fn redirect(&self) -> Option<Redirect> {
        self.redirect
    }

    /// The submit control is disabled while a request is in flight.
    pub fn can_submit(&self) -> bool {
        self.phase != FormPhase::Submitting
    }

    /// Pre-validation run before any network call. Password policy is the
    /// same one the server enforces.
    fn precheck(&self) -> Result<(), String> {
        if self.password != self.confirm_password {
            return Err("Passwords do not match.".into());
        }
        validate_signup(&self.request()).map_err(|e| e.to_string())
    }

    fn request(&self) -> SignupRequest {
        SignupRequest {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub async fn submit(&mut self, api: &AuthApi) {
        if !self.can_submit() {
            return;
        }
        self.message = None;
        self.email_invalid = false;
        self.redirect = None;

        if let Err(msg) = self.precheck() {
            self.phase = FormPhase::Failed;
            self.message = Some(msg);
            return;
        }

        self.phase = FormPhase::Submitting;

        // Existence probe first. A probe failure is not fatal; signup itself
        // still reports the conflict.
        match api.check_email(&self.email).await {
            Ok(true) => {
                self.phase = FormPhase::Failed;
                self.email_invalid = true;
                self.message = Some("Email already exists. Please use a different email.".into());
                return;
            }
            Ok(false) => {}
            Err(e) => debug!(error = %e, "check-email probe failed"),
        }

        match api.signup(&self.request()).await {
            Ok(_) => {
                self.phase = FormPhase::Success;
                self.message = Some("Signup successful! Redirecting...".into());
                self.redirect = Some(Redirect {
                    route: Route::Login,
                    delay: REDIRECT_DELAY,
                });
            }
            Err(ApiError::Api { msg, .. }) => {
                self.phase = FormPhase::Failed;
                self.message = Some(msg);
            }
            Err(ApiError::Network(_)) => {
                self.phase = FormPhase::Failed;
                self.message = Some("Signup failed. Please try again.".into());
            }
        }
    }
}

/// Login form: email and password, no format validation beyond presence.
/// On success the token lands in the store under [`TOKEN_KEY`].
#[derive(Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Placeholder with no effect on the flow.
    pub remember_me: bool,

    phase: FormPhase,
    message: Option<String>,
    redirect: Option<Redirect>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn redirect(&self) -> Option<Redirect> {
        self.redirect
    }

    pub fn can_submit(&self) -> bool {
        self.phase != FormPhase::Submitting
    }

    pub async fn submit(&mut self, api: &AuthApi, tokens: &dyn TokenStore) {
        if !self.can_submit() {
            return;
        }
        self.message = None;
        self.redirect = None;

        if self.email.is_empty() || self.password.is_empty() {
            self.phase = FormPhase::Failed;
            self.message = Some("Email and password are required.".into());
            return;
        }

        self.phase = FormPhase::Submitting;

        let req = LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        };
        match api.login(&req).await {
            Ok(res) => {
                tokens.set(TOKEN_KEY, &res.token);
                self.phase = FormPhase::Success;
                self.message = Some("Login successful! Redirecting...".into());
                self.redirect = Some(Redirect {
                    route: Route::Products,
                    delay: REDIRECT_DELAY,
                });
            }
            Err(ApiError::Api { msg, .. }) => {
                self.phase = FormPhase::Failed;
                self.message = Some(msg);
            }
            Err(ApiError::Network(_)) => {
                self.phase = FormPhase::Failed;
                self.message = Some("Invalid email or password".into());
            }
        }
    }
}
