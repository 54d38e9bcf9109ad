use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::auth::dto::{AuthResponse, LoginRequest, PublicUser, SignupRequest};
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::error::AuthError;
use crate::store::{NewUser, UserStore};

/// Minimum accepted password length. One policy for both the server and the
/// client forms.
pub const PASSWORD_MIN_LEN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Check a signup request field by field, reporting only the first problem.
pub fn validate_signup(req: &SignupRequest) -> Result<(), AuthError> {
    if req.first_name.is_empty() {
        return Err(AuthError::Validation("\"firstName\" is required".into()));
    }
    if req.last_name.is_empty() {
        return Err(AuthError::Validation("\"lastName\" is required".into()));
    }
    if req.email.is_empty() {
        return Err(AuthError::Validation("\"email\" is required".into()));
    }
    if !is_valid_email(&req.email) {
        return Err(AuthError::Validation(
            "\"email\" must be a valid email".into(),
        ));
    }
    if req.password.is_empty() {
        return Err(AuthError::Validation("\"password\" is required".into()));
    }
    if req.password.chars().count() < PASSWORD_MIN_LEN {
        return Err(AuthError::Validation(format!(
            "\"password\" length must be at least {PASSWORD_MIN_LEN} characters long"
        )));
    }
    Ok(())
}

/// Create a user and hand back a freshly signed token.
///
/// The existence check and the insert are two steps; when two signups race
/// past the check, the store's uniqueness backstop rejects the loser and the
/// `StoreError` conversion turns that into `Conflict` rather than `Server`.
pub async fn signup(
    store: &dyn UserStore,
    keys: &JwtKeys,
    req: SignupRequest,
) -> Result<AuthResponse, AuthError> {
    validate_signup(&req)?;

    if store.find_by_email(&req.email).await?.is_some() {
        warn!(email = %req.email, "signup for existing email");
        return Err(AuthError::Conflict);
    }

    let password_hash = hash_password(&req.password).map_err(AuthError::Server)?;
    let user = store
        .insert(NewUser {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            password_hash,
        })
        .await?;

    let token = keys.sign(user.id).map_err(AuthError::Server)?;
    info!(user_id = %user.id, email = %user.email, "user signed up");
    Ok(AuthResponse {
        token,
        user: PublicUser::from(&user),
    })
}

/// Check credentials and hand back a freshly signed token.
pub async fn login(
    store: &dyn UserStore,
    keys: &JwtKeys,
    req: LoginRequest,
) -> Result<AuthResponse, AuthError> {
    let user = match store.find_by_email(&req.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %req.email, "login for unknown email");
            return Err(AuthError::NotFound);
        }
    };

    let ok = verify_password(&req.password, &user.password_hash).map_err(AuthError::Server)?;
    if !ok {
        warn!(email = %req.email, user_id = %user.id, "login with wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    let token = keys.sign(user.id).map_err(AuthError::Server)?;
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(AuthResponse {
        token,
        user: PublicUser::from(&user),
    })
}

/// Thin existence probe over the store lookup.
pub async fn email_exists(store: &dyn UserStore, email: &str) -> Result<bool, AuthError> {
    Ok(store.find_by_email(email).await?.is_some())
}
