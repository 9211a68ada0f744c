/*
 * Responsibility
 * - /companies 系 CRUD handler
 * - 読み取り (GET) は認証なし。作成/更新/削除は Bearer token の user_id で所有者チェック
 * - 認可チェックは全て永続化呼び出しより前。失敗時は deny (fail closed)
 *
 * Notes
 * - token 検証は各 handler 内の所定の位置で行う (create: body 検証の後、update: body パースの前)
 * - body は Bytes で受けて handler 内でパースする
 * - 同一レコードへの同時 update の競合は検出しない (version 列なし)
 */
use axum::{
    Json,
    body::Bytes,
    extract::{OriginalUri, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
};

use crate::{
    api::v1::{
        dto::companies::{CompanyRequest, CompanyResponse},
        extractors::{AuthCtx, CompanyId, Credentials},
    },
    error::AppError,
    repos::{CompanyRow, RepoError},
    state::AppState,
};

fn parse_body(body: &Bytes) -> Result<CompanyRequest, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::unprocessable(e.to_string()))
}

async fn find_existing(state: &AppState, id: i64) -> Result<CompanyRow, AppError> {
    state
        .companies
        .find_by_id(id)
        .await?
        .ok_or(AppError::not_found("company"))
}

fn ensure_owner(caller: AuthCtx, company: &CompanyRow) -> Result<(), AppError> {
    if caller.user_id != company.user_id {
        tracing::warn!(
            caller = caller.user_id,
            owner = company.user_id,
            company_id = company.id,
            "caller does not own the company"
        );
        return Err(AppError::Unauthorized("user does not own this company"));
    }
    Ok(())
}

pub async fn get_company(
    State(state): State<AppState>,
    company_id: CompanyId,
) -> Result<Json<CompanyResponse>, AppError> {
    let row = find_existing(&state, company_id.id).await?;
    Ok(Json(row.into()))
}

pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyResponse>>, AppError> {
    let rows = state.companies.find_all().await?;
    Ok(Json(rows.into_iter().map(CompanyResponse::from).collect()))
}

pub async fn create_company(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    credentials: Credentials,
    body: Bytes,
) -> Result<(StatusCode, [(HeaderName, HeaderValue); 1], Json<CompanyResponse>), AppError> {
    let mut req = parse_body(&body)?;
    req.normalize();
    req.validate()?;

    let caller = credentials.authenticate(&state.auth)?;
    if caller.user_id != req.user_id {
        tracing::warn!(
            caller = caller.user_id,
            declared_owner = req.user_id,
            "create rejected: caller is not the declared owner"
        );
        return Err(AppError::Unauthorized(
            "user_id in the body does not match the authenticated user",
        ));
    }

    let user = state
        .users
        .find_by_id(caller.user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;
    if !user.role().is_admin() {
        tracing::warn!(
            caller = caller.user_id,
            role_id = user.role_id,
            "create rejected: caller is not an admin"
        );
        return Err(AppError::Unauthorized("only admins can create companies"));
    }

    let row = state
        .companies
        .save(&req.into_fields())
        .await
        .map_err(|e| match e {
            RepoError::Constraint(message) => {
                tracing::info!(%message, "company rejected by a storage constraint");
                AppError::unprocessable("company violates a data constraint")
            }
            RepoError::Db(err) => {
                tracing::error!(error = ?err, "company_repo::save failed");
                AppError::unprocessable("company could not be saved")
            }
        })?;

    tracing::info!(company_id = row.id, owner = row.user_id, "company created");

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let location = HeaderValue::from_str(&format!("{host}{}/{}", uri.path(), row.id))
        .map_err(|_| AppError::Internal)?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(row.into()),
    ))
}

pub async fn update_company(
    State(state): State<AppState>,
    company_id: CompanyId,
    credentials: Credentials,
    body: Bytes,
) -> Result<Json<CompanyResponse>, AppError> {
    let caller = credentials.authenticate(&state.auth)?;

    let existing = find_existing(&state, company_id.id).await?;
    ensure_owner(caller, &existing)?;

    let mut req = parse_body(&body)?;
    if req.user_id != caller.user_id {
        tracing::warn!(
            caller = caller.user_id,
            body_owner = req.user_id,
            company_id = existing.id,
            "update rejected: owner in body does not match caller"
        );
        return Err(AppError::Unauthorized(
            "user_id in the body does not match the company owner",
        ));
    }

    req.normalize();
    req.validate()?;

    let row = state
        .companies
        .update(existing.id, &req.into_fields())
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, company_id = existing.id, "company_repo::update failed");
            AppError::Internal
        })?
        .ok_or(AppError::not_found("company"))?;

    tracing::info!(company_id = row.id, "company updated");
    Ok(Json(row.into()))
}

pub async fn delete_company(
    State(state): State<AppState>,
    company_id: CompanyId,
    credentials: Credentials,
) -> Result<(StatusCode, [(HeaderName, HeaderValue); 1]), AppError> {
    let caller = credentials.authenticate(&state.auth)?;

    let existing = find_existing(&state, company_id.id).await?;
    ensure_owner(caller, &existing)?;

    let deleted = state.companies.delete(existing.id).await.map_err(|e| {
        tracing::warn!(error = ?e, company_id = existing.id, "company_repo::delete failed");
        AppError::bad_request("company could not be deleted")
    })?;
    if !deleted {
        return Err(AppError::not_found("company"));
    }

    tracing::info!(company_id = existing.id, "company deleted");
    Ok((
        StatusCode::NO_CONTENT,
        [(
            HeaderName::from_static("entity"),
            HeaderValue::from(existing.id),
        )],
    ))
}
