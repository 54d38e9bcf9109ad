//! Client side of the auth flow: an HTTP wrapper over the service and the
//! form state machines that drive it. No rendering layer lives here; a UI
//! binds the form fields and reads back phase, message and redirect.

pub mod api;
pub mod forms;

pub use api::{ApiError, AuthApi};
pub use forms::{FormPhase, LoginForm, MemoryTokenStore, Redirect, Route, SignupForm, TokenStore};
