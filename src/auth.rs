//! Login and registration against the social API.

use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError, LoginRequest, Profile, RegisterRequest};
use crate::constants::ALLOWED_EMAIL_DOMAINS;
use crate::session::{Session, SessionError, SessionStore};

// @(noroff\.no|stud\.noroff\.no)$
static ALLOWED_EMAIL: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    let domains: Vec<String> = ALLOWED_EMAIL_DOMAINS.iter().map(|d| regex::escape(d)).collect();
    Regex::new(&format!("@({})$", domains.join("|"))).expect("Invalid email domain regex")
});

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Only emails with @noroff.no or @stud.noroff.no domains are allowed.")]
    DisallowedEmailDomain,

    #[error("Login failed.")]
    MissingAccessToken,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Whether `email` belongs to one of the accepted domains.
#[must_use]
pub fn is_valid_email_domain(email: &str) -> bool {
    ALLOWED_EMAIL.is_match(email)
}

/// Log in and persist the returned token, and the returned email if any.
///
/// # Errors
///
/// Returns [`AuthError::MissingAccessToken`] if the server answers without a
/// token, or the underlying API or storage error.
pub async fn login(
    api: &ApiClient,
    store: &dyn SessionStore,
    credentials: &LoginRequest,
) -> Result<Session, AuthError> {
    let response = api.login(credentials).await?;

    let Some(token) = response.access_token.filter(|t| !t.is_empty()) else {
        warn!(email = %credentials.email, "Login response carried no access token");
        return Err(AuthError::MissingAccessToken);
    };

    // The email is stored only when the server returns one
    let session = Session::new(token, response.email);
    store.save(&session).await?;

    info!(email = ?session.email(), "Logged in");
    Ok(session)
}

/// Register a new account. The email domain is checked before any request.
///
/// # Errors
///
/// Returns [`AuthError::DisallowedEmailDomain`] for other domains, or the
/// API error if registration is rejected.
pub async fn register(api: &ApiClient, registration: &RegisterRequest) -> Result<Profile, AuthError> {
    if !is_valid_email_domain(&registration.email) {
        warn!(email = %registration.email, "Registration rejected: email domain not allowed");
        return Err(AuthError::DisallowedEmailDomain);
    }

    let profile = api.register(registration).await?;
    info!(name = %profile.name, "Registered");
    Ok(profile)
}

/// Forget the stored session.
///
/// # Errors
///
/// Returns an error if the session store cannot be cleared.
pub async fn logout(store: &dyn SessionStore) -> Result<(), AuthError> {
    store.clear().await?;
    info!("Logged out");
    Ok(())
}
