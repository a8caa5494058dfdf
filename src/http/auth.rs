//! Authentication boundary. Credential verification lives outside this
//! service; the bearer token body is the caller's opaque user id, and the
//! admin user is designated by configuration.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::{Result, StorefrontError};
use crate::http::AppState;

#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub is_admin: bool,
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(StorefrontError::Forbidden)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = StorefrontError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(StorefrontError::Unauthorized)?;
        let id = Uuid::parse_str(token.trim()).map_err(|_| StorefrontError::Unauthorized)?;
        Ok(Self {
            id,
            is_admin: state.admin_user == Some(id),
        })
    }
}
