/*
 * Responsibility
 * - Router 全体に掛ける middleware の公開インターフェース
 * - 認証はここには置かない (handler 側で Credentials を検証する)
 */
pub mod cors;
pub mod http;
pub mod security_headers;
