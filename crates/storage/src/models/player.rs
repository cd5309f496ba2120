use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::document::{Collection, Document};
use crate::query::{
    Accessor, FilterParams, Listing, Predicate, PredicateBuilder, Projection, QueryError,
    SortIndicator,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: DateTime<Utc>,
    pub country: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default)]
    pub club: Option<Uuid>,
}

impl Document for Player {
    const COLLECTION: Collection = Collection::Players;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerIndicator {
    CreatedAt,
    FirstName,
    LastName,
    BirthDate,
    Country,
    Position,
    Number,
    Club,
}

impl SortIndicator for PlayerIndicator {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("createdAt", Self::CreatedAt),
        ("firstName", Self::FirstName),
        ("lastName", Self::LastName),
        ("birthDate", Self::BirthDate),
        ("country", Self::Country),
        ("position", Self::Position),
        ("number", Self::Number),
        ("club", Self::Club),
    ];

    fn accessor(self) -> Accessor {
        match self {
            Self::CreatedAt => Accessor::CREATED_AT,
            Self::FirstName => Accessor::text("firstName"),
            Self::LastName => Accessor::text("lastName"),
            Self::BirthDate => Accessor::time("birthDate"),
            Self::Country => Accessor::text("country"),
            Self::Position => Accessor::text("position"),
            Self::Number => Accessor::number("number"),
            Self::Club => {
                Accessor::related("club", Collection::Clubs, Projection::Text("commonName"))
            }
        }
    }
}

impl Listing for Player {
    type Indicator = PlayerIndicator;

    const FILTER_FIELDS: &'static [&'static str] =
        &["club", "position", "country", "dateFrom", "dateTo"];

    fn predicate(filter: &FilterParams) -> Result<Predicate, QueryError> {
        Ok(PredicateBuilder::new(filter)
            .equals("club", Accessor::text("club"))
            .equals("position", Accessor::text("position"))
            .equals("country", Accessor::text("country"))
            .date_range(Accessor::time("birthDate"))?
            .build())
    }
}

pub fn name_search(value: &str) -> Predicate {
    Predicate::Any(vec![
        Predicate::contains(Accessor::text("firstName"), value),
        Predicate::contains(Accessor::text("lastName"), value),
    ])
}
