/*
 * Responsibility
 * - 永続化層の公開インターフェース
 * - handler は trait (CompanyRepo / UserRepo) だけを見る。Pg 実装は app.rs で注入
 */
pub mod company_repo;
pub mod error;
pub mod user_repo;

pub use company_repo::{CompanyFields, CompanyRepo, CompanyRow, PgCompanyRepo};
pub use error::{RepoError, RepoResult};
pub use user_repo::{PgUserRepo, Role, UserRepo, UserRow};
