/*
 * Responsibility
 * - companies テーブル向けの CRUD
 * - handler からは CompanyRepo trait 経由で使う (テストでは in-memory 実装に差し替え)
 * - user_id は users.id への FK (ON DELETE CASCADE)。FK 違反は RepoError::Constraint
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CompanyRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable columns of a company. The id is never part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyFields {
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub user_id: i64,
}

#[async_trait]
pub trait CompanyRepo: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<CompanyRow>>;

    // Ordered by id ascending. No paging.
    async fn find_all(&self) -> RepoResult<Vec<CompanyRow>>;

    async fn save(&self, fields: &CompanyFields) -> RepoResult<CompanyRow>;

    // Full replacement of the writable columns. `Ok(None)` when the row is gone.
    async fn update(&self, id: i64, fields: &CompanyFields) -> RepoResult<Option<CompanyRow>>;

    // Returns whether a row was removed.
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgCompanyRepo {
    pool: PgPool,
}

impl PgCompanyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepo for PgCompanyRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<CompanyRow>> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r#"
            SELECT id, name, description, website, user_id, created_at, updated_at
            FROM companies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self) -> RepoResult<Vec<CompanyRow>> {
        let rows = sqlx::query_as::<_, CompanyRow>(
            r#"
            SELECT id, name, description, website, user_id, created_at, updated_at
            FROM companies
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn save(&self, fields: &CompanyFields) -> RepoResult<CompanyRow> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r#"
            INSERT INTO companies (name, description, website, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, website, user_id, created_at, updated_at
            "#,
        )
        .bind(&fields.name)
        .bind(fields.description.as_deref())
        .bind(fields.website.as_deref())
        .bind(fields.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, fields: &CompanyFields) -> RepoResult<Option<CompanyRow>> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r#"
            UPDATE companies
            SET
                name = $2,
                description = $3,
                website = $4,
                user_id = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, website, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(fields.description.as_deref())
        .bind(fields.website.as_deref())
        .bind(fields.user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM companies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
