/*
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - SQLSTATE class 23 (integrity constraint violation) だけは区別して返す
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[source] sqlx::Error),
    #[error("constraint violation: {0}")]
    Constraint(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().is_some_and(|code| code.starts_with("23"))
        {
            return RepoError::Constraint(dbe.message().to_string());
        }
        RepoError::Db(e)
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        Self::from_sqlx(e)
    }
}
