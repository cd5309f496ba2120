use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::{IntoModel, non_empty};
use crate::document::Stored;
use crate::error::{Result, StorageError};
use crate::models::Club;

const NAMES_REQUIRED: &str = "Club must have a full name, common name, and short name";

/// Request payload for creating or replacing a club
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClubRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Club must have a full name, common name, and short name"))]
    pub full_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Club must have a full name, common name, and short name"))]
    pub common_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Club must have a full name, common name, and short name"))]
    pub short_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Club must have a country"))]
    pub country: String,

    #[validate(url)]
    pub club_logo_url: Option<String>,

    pub stadium: Option<String>,
}

impl IntoModel for ClubRequest {
    type Model = Club;

    fn into_model(self) -> Result<Club> {
        let names = [&self.full_name, &self.common_name, &self.short_name];
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(StorageError::Validation(NAMES_REQUIRED.to_string()));
        }
        if self.country.trim().is_empty() {
            return Err(StorageError::Validation("Club must have a country".to_string()));
        }

        Ok(Club {
            full_name: self.full_name.trim().to_string(),
            common_name: self.common_name.trim().to_string(),
            short_name: self.short_name.trim().to_string(),
            country: self.country.trim().to_string(),
            club_logo_url: non_empty(self.club_logo_url),
            stadium: non_empty(self.stadium),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClubResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub full_name: String,
    pub common_name: String,
    pub short_name: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club_logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stadium: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Stored<Club>> for ClubResponse {
    fn from(stored: Stored<Club>) -> Self {
        let club = stored.doc;
        Self {
            id: stored.id,
            full_name: club.full_name,
            common_name: club.common_name,
            short_name: club.short_name,
            country: club.country,
            club_logo_url: club.club_logo_url,
            stadium: club.stadium,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClubList {
    pub clubs: Vec<ClubResponse>,
    pub clubs_count: u64,
}
