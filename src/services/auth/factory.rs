/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AuthError, AuthService};

pub fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, AuthError> {
    let auth = AuthService::new(&config.api_secret, config.access_token_leeway_seconds)?;

    Ok(Arc::new(auth))
}
