//! Login and logout.
//!
//! Credentials are exchanged for a bearer token once; the resulting session is
//! persisted and handed to every later operation explicitly.

use crate::api::ApiClient;
use crate::errors::AppError;
use crate::models::{Role, Session, TokenResponse};

/// Log in and persist the new session.
pub async fn login(api: &ApiClient, username: &str, password: &str) -> Result<Session, AppError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    tracing::info!("Logging in as {}", username);
    let token = api.request_token(username, password).await?;
    let session = session_from_token(token)?;

    api.store().save(&session).await?;
    tracing::info!("Logged in as {} ({})", session.display_name(), session.role);

    Ok(session)
}

/// Drop the stored session.
pub async fn logout(api: &ApiClient) -> Result<(), AppError> {
    api.store().clear().await
}

/// Validate a token reply and turn it into a session.
fn session_from_token(token: TokenResponse) -> Result<Session, AppError> {
    if token.is_active == Some(false) {
        return Err(AppError::Forbidden(
            "User disabled: you do not have access".to_string(),
        ));
    }

    let role = Role::from_str(&token.role).ok_or_else(|| {
        AppError::Forbidden(format!(
            "Role not recognized ({}): your account has no assigned access",
            token.role
        ))
    })?;

    if token.access_token.trim().is_empty() {
        return Err(AppError::Unauthorized(
            "The backend did not issue a session token".to_string(),
        ));
    }

    Ok(Session {
        user_id: token.user_id,
        role,
        patent: token.patent,
        access_token: token.access_token,
        token_type: token.token_type,
        first_name: token.first_name.unwrap_or_default(),
        last_name: token.last_name.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(role: &str, active: Option<bool>) -> TokenResponse {
        TokenResponse {
            access_token: "abc".to_string(),
            token_type: "bearer".to_string(),
            user_id: 3,
            role: role.to_string(),
            first_name: Some("Luis".to_string()),
            last_name: None,
            patent: None,
            is_active: active,
        }
    }

    #[test]
    fn test_session_from_token_maps_roles() {
        assert_eq!(session_from_token(token("bodega", None)).unwrap().role, Role::Warehouse);
        assert_eq!(session_from_token(token("pioneta", Some(true))).unwrap().role, Role::Driver);
        assert_eq!(session_from_token(token("admin", None)).unwrap().role, Role::Admin);
    }

    #[test]
    fn test_inactive_user_rejected() {
        let err = session_from_token(token("bodega", Some(false))).unwrap_err();
        assert_eq!(err.error_code(), "FORBIDDEN");
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = session_from_token(token("auditor", None)).unwrap_err();
        assert!(err.message().contains("auditor"));
    }

    #[test]
    fn test_display_name_trims_missing_last_name() {
        let session = session_from_token(token("bodega", None)).unwrap();
        assert_eq!(session.display_name(), "Luis");
    }
}
