use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::club::ClubResponse;
use super::common::{IntoModel, non_empty, required};
use crate::document::{Stored, parse_id};
use crate::error::{Result, StorageError};
use crate::models::Player;
use crate::query::accessor::parse_time;

const NAMES_REQUIRED: &str = "Player must have first name and last name";

/// Request payload for creating or replacing a player
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Player must have first name and last name"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Player must have first name and last name"))]
    pub last_name: String,

    /// `YYYY-MM-DD` or an RFC 3339 instant.
    #[serde(default)]
    #[validate(length(min = 1, message = "Player must have a birth date"))]
    pub birth_date: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Player must have a country"))]
    pub country: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Player must have a position"))]
    pub position: String,

    #[validate(url)]
    pub photo_url: Option<String>,

    #[validate(range(min = 1, max = 99))]
    pub number: Option<u32>,

    /// Club id.
    pub club: Option<String>,
}

impl IntoModel for PlayerRequest {
    type Model = Player;

    fn into_model(self) -> Result<Player> {
        let birth_date = required(&self.birth_date, "Player must have a birth date")?;
        let birth_date = parse_time(&birth_date)
            .ok_or_else(|| StorageError::Validation("Invalid birth date".to_string()))?;

        Ok(Player {
            first_name: required(&self.first_name, NAMES_REQUIRED)?,
            last_name: required(&self.last_name, NAMES_REQUIRED)?,
            birth_date,
            country: required(&self.country, "Player must have a country")?,
            position: required(&self.position, "Player must have a position")?,
            photo_url: non_empty(self.photo_url),
            number: self.number,
            club: non_empty(self.club)
                .map(|id| parse_id(&id, "club"))
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: DateTime<Utc>,
    pub country: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// `null` when the player has no club or the club was deleted.
    pub club: Option<ClubResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlayerResponse {
    pub fn new(stored: Stored<Player>, club: Option<ClubResponse>) -> Self {
        let player = stored.doc;
        Self {
            id: stored.id,
            first_name: player.first_name,
            last_name: player.last_name,
            birth_date: player.birth_date,
            country: player.country,
            position: player.position,
            photo_url: player.photo_url,
            number: player.number,
            club,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerList {
    pub players: Vec<PlayerResponse>,
    pub players_count: u64,
}
