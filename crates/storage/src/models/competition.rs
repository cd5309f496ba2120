use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::document::{Collection, Document};
use crate::query::{
    Accessor, FilterParams, Listing, Predicate, PredicateBuilder, Projection, QueryError,
    SortIndicator,
};

/// A league or cup. `clubs` keeps the order the clubs were given in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub full_name: String,
    pub short_name: String,
    pub country: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub clubs: Vec<Uuid>,
}

impl Document for Competition {
    const COLLECTION: Collection = Collection::Competitions;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompetitionIndicator {
    CreatedAt,
    FullName,
    ShortName,
    Country,
    Type,
    ClubsCount,
}

impl SortIndicator for CompetitionIndicator {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("createdAt", Self::CreatedAt),
        ("fullName", Self::FullName),
        ("shortName", Self::ShortName),
        ("country", Self::Country),
        ("type", Self::Type),
        ("clubsCount", Self::ClubsCount),
    ];

    fn accessor(self) -> Accessor {
        match self {
            Self::CreatedAt => Accessor::CREATED_AT,
            Self::FullName => Accessor::text("fullName"),
            Self::ShortName => Accessor::text("shortName"),
            Self::Country => Accessor::text("country"),
            Self::Type => Accessor::text("type"),
            Self::ClubsCount => Accessor::own(Projection::Length("clubs")),
        }
    }
}

impl Listing for Competition {
    type Indicator = CompetitionIndicator;

    const FILTER_FIELDS: &'static [&'static str] = &["country", "type"];

    fn predicate(filter: &FilterParams) -> Result<Predicate, QueryError> {
        Ok(PredicateBuilder::new(filter)
            .equals("country", Accessor::text("country"))
            .equals("type", Accessor::text("type"))
            .build())
    }
}
