use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no bearer token in request")]
    MissingToken,
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("invalid 'user_id' claim (expected a positive integer)")]
    InvalidUserId,
    #[error("verification secret is empty")]
    EmptySecret,
}

/// Access token (JWT) claims as issued by the auth server.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub user_id: i64,
    pub exp: u64,
}

/// AuthService が返す「検証済み・アプリ側で使う型」
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedAccessToken {
    pub user_id: i64,
}

/// HS256 access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &str, leeway_seconds: u64) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    // Verify signature + exp and decode the claims.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Token Extractor entry point: raw bearer token → caller identity.
    ///
    /// `None` (no token found in the request) fails closed like a bad token.
    pub fn identify(&self, token: Option<&str>) -> Result<VerifiedAccessToken, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = self.verify(token)?;
        if claims.user_id <= 0 {
            return Err(AuthError::InvalidUserId);
        }

        Ok(VerifiedAccessToken {
            user_id: claims.user_id,
        })
    }
}
