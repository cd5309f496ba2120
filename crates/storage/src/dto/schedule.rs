use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::club::ClubResponse;
use super::common::{IntoModel, non_empty, required};
use super::competition::CompetitionResponse;
use crate::document::{Stored, parse_id};
use crate::error::Result;
use crate::models::{Game, Matchweek, Schedule, Side};

/// Request payload for creating or replacing a schedule
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// Competition id.
    #[serde(default)]
    #[validate(length(min = 1, message = "Schedule must have a competition"))]
    pub competition: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Schedule must have a season value"))]
    pub season: String,

    #[serde(default)]
    pub fixture: Vec<MatchweekRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchweekRequest {
    /// Generated when empty.
    #[serde(default)]
    pub id: String,
    pub matchweek_name: String,
    pub basic_date: DateTime<Utc>,
    #[serde(default)]
    pub games: Vec<GameRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameRequest {
    /// Generated when empty.
    #[serde(default)]
    pub id: String,
    pub home: SideRequest,
    pub away: SideRequest,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub score: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SideRequest {
    /// Club id.
    pub club: String,
    pub points: Option<u32>,
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
}

fn id_or_new(id: String) -> String {
    non_empty(Some(id)).unwrap_or_else(|| Uuid::new_v4().to_string())
}

impl SideRequest {
    fn into_side(self) -> Result<Side> {
        Ok(Side {
            club: parse_id(&self.club, "club")?,
            points: self.points,
            goals_for: self.goals_for,
            goals_against: self.goals_against,
        })
    }
}

impl GameRequest {
    fn into_game(self) -> Result<Game> {
        Ok(Game {
            id: id_or_new(self.id),
            home: self.home.into_side()?,
            away: self.away.into_side()?,
            date: self.date,
            location: non_empty(self.location),
            score: non_empty(self.score),
        })
    }
}

impl MatchweekRequest {
    fn into_matchweek(self) -> Result<Matchweek> {
        Ok(Matchweek {
            id: id_or_new(self.id),
            matchweek_name: self.matchweek_name,
            basic_date: self.basic_date,
            games: self
                .games
                .into_iter()
                .map(GameRequest::into_game)
                .collect::<Result<_>>()?,
        })
    }
}

impl IntoModel for ScheduleRequest {
    type Model = Schedule;

    fn into_model(self) -> Result<Schedule> {
        let competition = required(&self.competition, "Schedule must have a competition")?;

        Ok(Schedule {
            competition: parse_id(&competition, "competition")?,
            season: required(&self.season, "Schedule must have a season value")?,
            fixture: self
                .fixture
                .into_iter()
                .map(MatchweekRequest::into_matchweek)
                .collect::<Result<_>>()?,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LeagueScheduleQuery {
    pub season: String,
    /// Competition id.
    pub league_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ClubScheduleQuery {
    pub season: String,
    pub club_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentMatchesQuery {
    pub season: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SideResponse {
    /// `null` when the club was deleted.
    pub club: Option<ClubResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals_for: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals_against: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub id: String,
    pub home: SideResponse,
    pub away: SideResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchweekResponse {
    pub id: String,
    pub matchweek_name: String,
    pub basic_date: DateTime<Utc>,
    pub games: Vec<GameResponse>,
}

impl SideResponse {
    fn new(side: Side, clubs: &HashMap<Uuid, ClubResponse>) -> Self {
        Self {
            club: clubs.get(&side.club).cloned(),
            points: side.points,
            goals_for: side.goals_for,
            goals_against: side.goals_against,
        }
    }
}

impl GameResponse {
    pub fn new(game: Game, clubs: &HashMap<Uuid, ClubResponse>) -> Self {
        Self {
            id: game.id,
            home: SideResponse::new(game.home, clubs),
            away: SideResponse::new(game.away, clubs),
            date: game.date,
            location: game.location,
            score: game.score,
        }
    }
}

impl MatchweekResponse {
    pub fn new(matchweek: Matchweek, clubs: &HashMap<Uuid, ClubResponse>) -> Self {
        Self {
            id: matchweek.id,
            matchweek_name: matchweek.matchweek_name,
            basic_date: matchweek.basic_date,
            games: matchweek
                .games
                .into_iter()
                .map(|game| GameResponse::new(game, clubs))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// `null` when the competition was deleted.
    pub competition: Option<CompetitionResponse>,
    pub season: String,
    pub fixture: Vec<MatchweekResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScheduleResponse {
    pub fn new(
        stored: Stored<Schedule>,
        competition: Option<CompetitionResponse>,
        clubs: &HashMap<Uuid, ClubResponse>,
    ) -> Self {
        Self {
            id: stored.id,
            competition,
            season: stored.doc.season,
            fixture: stored
                .doc
                .fixture
                .into_iter()
                .map(|matchweek| MatchweekResponse::new(matchweek, clubs))
                .collect(),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleList {
    pub schedules: Vec<ScheduleResponse>,
    pub schedules_count: u64,
}

/// The games of one club within one competition.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClubSchedule {
    pub competition: Option<CompetitionResponse>,
    pub games: Vec<GameResponse>,
}

/// The matchweek of one competition closest to now.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentMatches {
    pub competition: Option<CompetitionResponse>,
    pub matchweek: MatchweekResponse,
}
