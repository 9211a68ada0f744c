/*
 * Responsibility
 *  - Path の {id} を内部 ID (i64) に変換する extractor
 *  - 10 進の非負整数 (u32 の範囲) だけを受け付ける。符号付き・桁あふれ・非数値は 400
 *  - handler より前で弾くので、不正な ID では repo は呼ばれない
 * 置かないもの
 *  - Company など具体リソース名 (types.rs 側)
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

#[derive(Clone, Copy)]
pub struct PathId<T> {
    pub id: i64,
    _marker: PhantomData<T>,
}

impl<T> PathId<T> {
    fn new(id: i64) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

pub(super) fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<u32>().ok().map(i64::from)
}

impl<T, S> FromRequestParts<S> for PathId<T>
where
    T: Send + Sync,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("invalid id"))?;

        let id = parse_id(&raw).ok_or_else(|| {
            tracing::debug!(raw = %raw, "rejecting malformed path id");
            AppError::bad_request("invalid id")
        })?;

        Ok(Self::new(id))
    }
}

impl<T> std::fmt::Debug for PathId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathId").field("id", &self.id).finish()
    }
}
