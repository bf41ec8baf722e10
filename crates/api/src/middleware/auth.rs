//! # Authentication Module
//!
//! Bearer-token identity for the protected booking endpoints. Tokens are
//! issued elsewhere; this service only verifies them and extracts the user
//! id from the `id` claim.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use evslot_core::errors::{SlotError, SlotResult};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::{middleware::error_handling::AppError, ApiState};

pub const INVALID_FORMAT_MESSAGE: &str = "Invalid token format";
pub const NO_TOKEN_MESSAGE: &str = "No token provided";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub id: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Resolves a bearer credential to the id of the user it was issued to.
pub trait IdentityProvider: Send + Sync {
    fn verify(&self, token: &str) -> SlotResult<String>;
}

/// HS256 JWT verification.
pub struct JwtIdentity {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentity {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl IdentityProvider for JwtIdentity {
    fn verify(&self, token: &str) -> SlotResult<String> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims.id)
            .map_err(|err| {
                tracing::debug!("Rejected bearer token: {}", err);
                SlotError::Authentication(INVALID_TOKEN_MESSAGE.to_string())
            })
    }
}

/// Id of the caller, taken from a verified `Authorization: Bearer` header.
///
/// Adding this extractor to a handler makes the route require
/// authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

/// The token part of a `Bearer <token>` header value.
///
/// A header without the `Bearer ` scheme is malformed; one with the scheme
/// but nothing after it carries no token.
pub fn bearer_token(header_value: Option<&str>) -> SlotResult<&str> {
    let credentials = header_value
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| SlotError::Authentication(INVALID_FORMAT_MESSAGE.to_string()))?;

    match credentials.split(' ').next() {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(SlotError::Authentication(NO_TOKEN_MESSAGE.to_string())),
    }
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let token = bearer_token(header_value)?;

        let user_id = state.identity.verify(token)?;
        Ok(AuthenticatedUser { user_id })
    }
}
