/*
 * Responsibility
 * - users テーブルの読み取り (role 判定用)
 * - users の作成/更新はこのサービスの責務ではない (auth 側が持つ)
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub role_id: i32,
}

impl UserRow {
    pub fn role(&self) -> Role {
        Role::from_id(self.role_id)
    }
}

/// Roles stored in `users.role_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Developer,
    Admin,
    Unknown(i32),
}

impl Role {
    pub const DEVELOPER_ID: i32 = 1;
    pub const ADMIN_ID: i32 = 2;

    pub fn from_id(id: i32) -> Self {
        match id {
            Self::DEVELOPER_ID => Self::Developer,
            Self::ADMIN_ID => Self::Admin,
            other => Self::Unknown(other),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserRow>>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, role_id
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
