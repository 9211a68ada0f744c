/**
 * Responsibility
 *  - リソースごとの「意味付き ID 型」を宣言する
 *  - 以下に pub で列挙するものは ./mod.rs 経由で全て公開される
 */
use super::core::PathId;

// companies
pub enum CompanyTag {}
pub type CompanyId = PathId<CompanyTag>;
