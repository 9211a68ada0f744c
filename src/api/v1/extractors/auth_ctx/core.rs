use axum::extract::{FromRequestParts, Query};
use axum::http::{header, request::Parts};
use serde::Deserialize;

use crate::error::AppError;
use crate::services::auth::AuthService;

use super::AuthCtx;

/// Request に載っている未検証の bearer token
///
/// 抽出自体は失敗しない。検証は handler が決めた順序で `authenticate` を呼んだ時点で行う
/// (body の検証を認証より先に済ませたいエンドポイントがあるため middleware にしていない)
///
/// 探す順序:
/// 1. `?token=<jwt>` query parameter
/// 2. `Authorization: Bearer <jwt>`
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

impl Credentials {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Verify the token and return the caller. Any failure is a 401.
    pub fn authenticate(&self, auth: &AuthService) -> Result<AuthCtx, AppError> {
        let verified = auth.identify(self.token())?;
        Ok(verified.into())
    }

    fn from_parts(parts: &Parts) -> Self {
        let from_query = Query::<TokenQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.token)
            .filter(|t| !t.is_empty());

        let token = from_query.or_else(|| {
            parts
                .headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(str::to_string)
        });

        Self::new(token)
    }
}

impl<S> FromRequestParts<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
