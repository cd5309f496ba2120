use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::document::{Collection, Document};
use crate::query::{
    Accessor, FilterParams, Listing, Predicate, PredicateBuilder, QueryError, SortIndicator,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Reader,
    Author,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reader => "reader",
            Self::Author => "author",
            Self::Admin => "admin",
        }
    }
}

/// A registered user. `password` is an argon2 PHC string and never leaves
/// the storage crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Document for User {
    const COLLECTION: Collection = Collection::Users;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserIndicator {
    CreatedAt,
    FirstName,
    LastName,
    Email,
    Role,
    Location,
}

impl SortIndicator for UserIndicator {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("createdAt", Self::CreatedAt),
        ("firstName", Self::FirstName),
        ("lastName", Self::LastName),
        ("email", Self::Email),
        ("role", Self::Role),
        ("location", Self::Location),
    ];

    fn accessor(self) -> Accessor {
        match self {
            Self::CreatedAt => Accessor::CREATED_AT,
            Self::FirstName => Accessor::text("firstName"),
            Self::LastName => Accessor::text("lastName"),
            Self::Email => Accessor::text("email"),
            Self::Role => Accessor::text("role"),
            Self::Location => Accessor::text("location"),
        }
    }
}

impl Listing for User {
    type Indicator = UserIndicator;

    const FILTER_FIELDS: &'static [&'static str] = &["role", "location", "dateFrom", "dateTo"];

    fn predicate(filter: &FilterParams) -> Result<Predicate, QueryError> {
        Ok(PredicateBuilder::new(filter)
            .equals("role", Accessor::text("role"))
            .equals("location", Accessor::text("location"))
            .date_range(Accessor::CREATED_AT)?
            .build())
    }
}

pub fn with_email(email: &str) -> Predicate {
    Predicate::equals(Accessor::text("email"), email)
}

pub fn with_role(role: Role) -> Predicate {
    Predicate::equals(Accessor::text("role"), role.as_str())
}
