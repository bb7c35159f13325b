//! services/api/src/web/auth.rs
//!
//! Bearer-token checks for write access.
//!
//! Tokens are issued outside this service. The service only knows the Argon2
//! hash of the admin token (`ADMIN_TOKEN_HASH`) and verifies presented tokens
//! against it.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::http::{header, HeaderMap, StatusCode};
use tracing::error;

/// Hashes a token into the PHC string expected in `ADMIN_TOKEN_HASH`.
pub fn hash_token(token: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(token.as_bytes(), &salt)?
        .to_string())
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Checks a presented token against the configured PHC hash.
pub fn verify_token(token: &str, phc_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(phc_hash) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to parse admin token hash: {:?}", e);
            return false;
        }
    };
    Argon2::default()
        .verify_password(token.as_bytes(), &parsed_hash)
        .is_ok()
}

/// GET /auth/check - Confirms that the presented bearer token grants write access.
#[utoipa::path(
    get,
    path = "/auth/check",
    tag = "auth",
    security(("bearer_token" = [])),
    responses(
        (status = 204, description = "Token accepted"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn check_auth_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(bearer_token(&headers_with("Bearer s3cret")), Some("s3cret"));
        assert_eq!(bearer_token(&headers_with("Basic s3cret")), None);
        assert_eq!(bearer_token(&headers_with("Bearer    ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn hashed_token_verifies_and_others_do_not() {
        let hash = hash_token("harbour-master").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_token("harbour-master", &hash));
        assert!(!verify_token("stowaway", &hash));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_token("anything", "not-a-phc-string"));
    }

    #[tokio::test]
    async fn check_handler_returns_no_content() {
        assert_eq!(check_auth_handler().await, StatusCode::NO_CONTENT);
    }
}
