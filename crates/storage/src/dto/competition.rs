use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::club::ClubResponse;
use super::common::{IntoModel, non_empty, required};
use crate::document::{Stored, parse_ids};
use crate::error::Result;
use crate::models::Competition;

pub const TOO_FEW_CLUBS: &str = "Competition must have at least two clubs";

/// Request payload for creating or replacing a competition.
///
/// `clubs` lists club ids in display order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Competition must have a name"))]
    pub full_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Competition must have a short name"))]
    pub short_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Competition must have a country"))]
    pub country: String,

    #[serde(default, rename = "type")]
    #[validate(length(min = 1, message = "Competition must have a type"))]
    pub kind: String,

    #[validate(url)]
    pub logo_url: Option<String>,

    #[serde(default)]
    #[validate(length(min = 2, message = "Competition must have at least two clubs"))]
    pub clubs: Vec<String>,
}

impl IntoModel for CompetitionRequest {
    type Model = Competition;

    /// Parses the club ids. Whether they exist is checked by the repository.
    fn into_model(self) -> Result<Competition> {
        Ok(Competition {
            full_name: required(&self.full_name, "Competition must have a name")?,
            short_name: required(&self.short_name, "Competition must have a short name")?,
            country: required(&self.country, "Competition must have a country")?,
            kind: required(&self.kind, "Competition must have a type")?,
            logo_url: non_empty(self.logo_url),
            clubs: parse_ids(&self.clubs, "club")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub full_name: String,
    pub short_name: String,
    pub country: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Clubs that still exist, in competition order.
    pub clubs: Vec<ClubResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompetitionResponse {
    pub fn new(stored: Stored<Competition>, clubs: Vec<ClubResponse>) -> Self {
        let competition = stored.doc;
        Self {
            id: stored.id,
            full_name: competition.full_name,
            short_name: competition.short_name,
            country: competition.country,
            kind: competition.kind,
            logo_url: competition.logo_url,
            clubs,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionList {
    pub competitions: Vec<CompetitionResponse>,
    pub competitions_count: u64,
}
