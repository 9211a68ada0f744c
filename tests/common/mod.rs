//! Shared fixtures for the HTTP integration tests: in-memory repositories,
//! token minting and a request helper.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use chrono::Utc;
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

use company_api::app::build_router;
use company_api::repos::{
    CompanyFields, CompanyRepo, CompanyRow, RepoError, RepoResult, Role, UserRepo, UserRow,
};
use company_api::services::auth::AuthService;
use company_api::state::AppState;

pub const SECRET: &str = "integration-test-secret";

#[derive(Default)]
pub struct FakeCompanyRepo {
    rows: Mutex<BTreeMap<i64, CompanyRow>>,
    calls: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_save: AtomicBool,
    pub reject_save: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl FakeCompanyRepo {
    pub fn insert(&self, id: i64, name: &str, user_id: i64) -> CompanyRow {
        let now = Utc::now();
        let row = CompanyRow {
            id,
            name: name.to_string(),
            description: None,
            website: None,
            user_id,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(id, row.clone());
        row
    }

    pub fn get(&self, id: i64) -> Option<CompanyRow> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn db_error() -> RepoError {
        RepoError::Db(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait]
impl CompanyRepo for FakeCompanyRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<CompanyRow>> {
        self.record_call();
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::db_error());
        }
        Ok(self.get(id))
    }

    async fn find_all(&self) -> RepoResult<Vec<CompanyRow>> {
        self.record_call();
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::db_error());
        }
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn save(&self, fields: &CompanyFields) -> RepoResult<CompanyRow> {
        self.record_call();
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(Self::db_error());
        }
        if self.reject_save.load(Ordering::SeqCst) {
            return Err(RepoError::Constraint(
                "duplicate key value violates unique constraint".to_string(),
            ));
        }

        let mut rows = self.rows.lock().unwrap();
        let id = rows.keys().max().copied().unwrap_or(0) + 1;
        let now = Utc::now();
        let row = CompanyRow {
            id,
            name: fields.name.clone(),
            description: fields.description.clone(),
            website: fields.website.clone(),
            user_id: fields.user_id,
            created_at: now,
            updated_at: now,
        };
        rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, fields: &CompanyFields) -> RepoResult<Option<CompanyRow>> {
        self.record_call();
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(Self::db_error());
        }

        let mut rows = self.rows.lock().unwrap();
        Ok(rows.get_mut(&id).map(|row| {
            row.name = fields.name.clone();
            row.description = fields.description.clone();
            row.website = fields.website.clone();
            row.user_id = fields.user_id;
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        self.record_call();
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::db_error());
        }
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct FakeUserRepo {
    users: Mutex<HashMap<i64, UserRow>>,
    pub fail_reads: AtomicBool,
}

impl FakeUserRepo {
    pub fn insert(&self, id: i64, role_id: i32) {
        self.users
            .lock()
            .unwrap()
            .insert(id, UserRow { id, role_id });
    }
}

#[async_trait]
impl UserRepo for FakeUserRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserRow>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }
}

pub struct TestApp {
    pub router: Router,
    pub companies: Arc<FakeCompanyRepo>,
    pub users: Arc<FakeUserRepo>,
}

impl TestApp {
    /// Users: 7 (admin), 3 (admin), 4 (developer).
    pub fn new() -> Self {
        let companies = Arc::new(FakeCompanyRepo::default());
        let users = Arc::new(FakeUserRepo::default());
        users.insert(7, Role::ADMIN_ID);
        users.insert(3, Role::ADMIN_ID);
        users.insert(4, Role::DEVELOPER_ID);

        let auth = Arc::new(AuthService::new(SECRET, 0).unwrap());
        let state = AppState::new(companies.clone(), users.clone(), auth);

        Self {
            router: build_router(state),
            companies,
            users,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub fn token_for(user_id: i64) -> String {
    let exp = Utc::now().timestamp() + 3600;
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &json!({"authorized": true, "user_id": user_id, "exp": exp}),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn expired_token_for(user_id: i64) -> String {
    let exp = Utc::now().timestamp() - 3600;
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &json!({"user_id": user_id, "exp": exp}),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn with_json(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    with_raw_body(method, uri, token, body.to_string())
}

pub fn with_raw_body(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: impl Into<String>,
) -> Request<Body> {
    let body: String = body.into();
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("host", "localhost:3000")
        .header("content-type", "application/json")
        .header("content-length", body.len());
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

pub fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}
