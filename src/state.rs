/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - companies / users: 永続化 (trait object。本番は Pg 実装、テストは fake)
 *   - auth: Bearer トークン検証
 * - Clone 前提で持つ (内部は Arc なので cheap)
 */
use std::sync::Arc;

use crate::repos::{CompanyRepo, UserRepo};
use crate::services::auth::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<dyn CompanyRepo>,
    pub users: Arc<dyn UserRepo>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        companies: Arc<dyn CompanyRepo>,
        users: Arc<dyn UserRepo>,
        auth: Arc<AuthService>,
    ) -> Self {
        Self {
            companies,
            users,
            auth,
        }
    }
}
