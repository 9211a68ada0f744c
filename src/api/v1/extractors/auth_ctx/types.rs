/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 *
 * Notes
 * - JWT の検証ロジックは services/auth 側の責務
 * - ここは「型（契約）」として固定化する
 */
use crate::services::auth::VerifiedAccessToken;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は users.id (トークンの `user_id` claim)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: i64,
}

impl AuthCtx {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}

impl From<VerifiedAccessToken> for AuthCtx {
    fn from(v: VerifiedAccessToken) -> Self {
        Self::new(v.user_id)
    }
}
