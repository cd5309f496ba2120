use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::document::{Collection, Document};
use crate::query::{Accessor, FilterParams, Listing, Predicate, PredicateBuilder, QueryError, SortIndicator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub full_name: String,
    pub common_name: String,
    pub short_name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stadium: Option<String>,
}

impl Document for Club {
    const COLLECTION: Collection = Collection::Clubs;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClubIndicator {
    CreatedAt,
    FullName,
    CommonName,
    ShortName,
    Country,
}

impl SortIndicator for ClubIndicator {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("createdAt", Self::CreatedAt),
        ("fullName", Self::FullName),
        ("commonName", Self::CommonName),
        ("shortName", Self::ShortName),
        ("country", Self::Country),
    ];

    fn accessor(self) -> Accessor {
        match self {
            Self::CreatedAt => Accessor::CREATED_AT,
            Self::FullName => Accessor::text("fullName"),
            Self::CommonName => Accessor::text("commonName"),
            Self::ShortName => Accessor::text("shortName"),
            Self::Country => Accessor::text("country"),
        }
    }
}

impl Listing for Club {
    type Indicator = ClubIndicator;

    const FILTER_FIELDS: &'static [&'static str] = &["country"];

    fn predicate(filter: &FilterParams) -> Result<Predicate, QueryError> {
        Ok(PredicateBuilder::new(filter)
            .equals("country", Accessor::text("country"))
            .build())
    }
}

/// Case-insensitive substring match on any of the club's names.
pub fn name_search(value: &str) -> Predicate {
    Predicate::Any(
        ["fullName", "commonName", "shortName"]
            .into_iter()
            .map(|field| Predicate::contains(Accessor::text(field), value))
            .collect(),
    )
}
