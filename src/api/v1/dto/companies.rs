/*
 * Responsibility
 * - Companies の request/response DTO
 * - normalize() (trim, 空文字 → None) と validate() (必須・形式チェック)
 * - body の id は読まない (未知フィールドとして無視、対象は常に path の id)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::repos::{CompanyFields, CompanyRow};

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const WEBSITE_MAX_CHARS: usize = 255;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name is required")]
    NameRequired,
    #[error("name must be <= 100 chars")]
    NameTooLong,
    #[error("description must be <= 1000 chars")]
    DescriptionTooLong,
    #[error("website must be <= 255 chars")]
    WebsiteTooLong,
    #[error("website must be an http(s) URL")]
    WebsiteInvalid,
    #[error("user_id is required")]
    UserIdRequired,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    pub user_id: i64,
}

impl CompanyRequest {
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.description = trimmed(self.description.take());
        self.website = trimmed(self.website.take());
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.name.chars().count() > NAME_MAX_CHARS {
            return Err(ValidationError::NameTooLong);
        }
        if let Some(description) = &self.description
            && description.chars().count() > DESCRIPTION_MAX_CHARS
        {
            return Err(ValidationError::DescriptionTooLong);
        }
        if let Some(website) = &self.website {
            if website.chars().count() > WEBSITE_MAX_CHARS {
                return Err(ValidationError::WebsiteTooLong);
            }
            if !looks_like_http_url(website) {
                return Err(ValidationError::WebsiteInvalid);
            }
        }
        if self.user_id <= 0 {
            return Err(ValidationError::UserIdRequired);
        }

        Ok(())
    }

    pub fn into_fields(self) -> CompanyFields {
        CompanyFields {
            name: self.name,
            description: self.description,
            website: self.website,
            user_id: self.user_id,
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn looks_like_http_url(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CompanyRow> for CompanyResponse {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            website: row.website,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
