use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::document::{Collection, Document};
use crate::query::{
    Accessor, FilterParams, Listing, Predicate, PredicateBuilder, Projection, QueryError,
    SortIndicator,
};

/// The fixture list of one competition for one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub competition: Uuid,
    pub season: String,
    #[serde(default)]
    pub fixture: Vec<Matchweek>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Matchweek {
    pub id: String,
    pub matchweek_name: String,
    pub basic_date: DateTime<Utc>,
    #[serde(default)]
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub home: Side,
    pub away: Side,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
}

impl Game {
    pub fn involves(&self, club: Uuid) -> bool {
        self.home.club == club || self.away.club == club
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Side {
    pub club: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals_for: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals_against: Option<u32>,
}

impl Document for Schedule {
    const COLLECTION: Collection = Collection::Schedules;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleIndicator {
    CreatedAt,
    Season,
    Competition,
    Country,
    TeamsCount,
}

impl SortIndicator for ScheduleIndicator {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("createdAt", Self::CreatedAt),
        ("season", Self::Season),
        ("competition", Self::Competition),
        ("country", Self::Country),
        ("teamsCount", Self::TeamsCount),
    ];

    fn accessor(self) -> Accessor {
        match self {
            Self::CreatedAt => Accessor::CREATED_AT,
            Self::Season => Accessor::text("season"),
            Self::Competition => competition(Projection::Text("fullName")),
            Self::Country => competition(Projection::Text("country")),
            Self::TeamsCount => competition(Projection::Length("clubs")),
        }
    }
}

const fn competition(projection: Projection) -> Accessor {
    Accessor::related("competition", Collection::Competitions, projection)
}

impl Listing for Schedule {
    type Indicator = ScheduleIndicator;

    const FILTER_FIELDS: &'static [&'static str] =
        &["competition", "country", "season", "dateFrom", "dateTo"];

    fn predicate(filter: &FilterParams) -> Result<Predicate, QueryError> {
        Ok(PredicateBuilder::new(filter)
            .equals("competition", Accessor::text("competition"))
            .equals("country", competition(Projection::Text("country")))
            .equals("season", Accessor::text("season"))
            .date_range(Accessor::CREATED_AT)?
            .build())
    }
}
