/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /companies は GET が公開、POST/PUT/DELETE は handler 内で Bearer を検証する
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::companies::{
    create_company, delete_company, get_company, list_companies, update_company,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/companies/{id}",
            get(get_company).put(update_company).delete(delete_company),
        )
}
