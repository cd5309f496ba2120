use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::document::{Collection, Document};
use crate::query::{
    Accessor, Condition, FilterParams, Listing, Predicate, PredicateBuilder, Projection,
    QueryError, SortIndicator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Article,
    Note,
    Post,
}

impl MaterialType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Note => "note",
            Self::Post => "post",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub user: Uuid,
    pub message: String,
}

/// An article, note or post. `likes` holds the ids of the users who liked it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub author: Uuid,
    #[serde(rename = "type")]
    pub kind: MaterialType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub is_main: bool,
    pub status: String,
    pub publication_date: DateTime<Utc>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: Vec<Uuid>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Material {
    /// Adds the like of `user`, or removes it when already present.
    /// Returns whether the user likes the material afterwards.
    pub fn toggle_like(&mut self, user: Uuid) -> bool {
        if let Some(pos) = self.likes.iter().position(|id| *id == user) {
            self.likes.remove(pos);
            false
        } else {
            self.likes.push(user);
            true
        }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

impl Document for Material {
    const COLLECTION: Collection = Collection::Materials;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialIndicator {
    CreatedAt,
    Title,
    Type,
    Status,
    Views,
    Likes,
    PublicationDate,
    Author,
}

impl SortIndicator for MaterialIndicator {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("createdAt", Self::CreatedAt),
        ("title", Self::Title),
        ("type", Self::Type),
        ("status", Self::Status),
        ("views", Self::Views),
        ("likes", Self::Likes),
        ("publicationDate", Self::PublicationDate),
        ("author", Self::Author),
    ];

    fn accessor(self) -> Accessor {
        match self {
            Self::CreatedAt => Accessor::CREATED_AT,
            Self::Title => Accessor::text("title"),
            Self::Type => Accessor::text("type"),
            Self::Status => Accessor::text("status"),
            Self::Views => Accessor::number("views"),
            Self::Likes => Accessor::own(Projection::Length("likes")),
            Self::PublicationDate => Accessor::time("publicationDate"),
            Self::Author => Accessor::related("author", Collection::Users, Projection::DisplayName),
        }
    }
}

impl Listing for Material {
    type Indicator = MaterialIndicator;

    const FILTER_FIELDS: &'static [&'static str] = &["author", "type", "dateFrom", "dateTo"];

    fn predicate(filter: &FilterParams) -> Result<Predicate, QueryError> {
        Ok(PredicateBuilder::new(filter)
            .equals("author", Accessor::text("author"))
            .equals("type", Accessor::text("type"))
            .date_range(Accessor::CREATED_AT)?
            .build())
    }
}

pub fn is_main() -> Predicate {
    Predicate::equals(Accessor::text("isMain"), "true")
}

pub fn of_types(types: &[MaterialType]) -> Predicate {
    Predicate::Match(Condition::OneOf {
        accessor: Accessor::text("type"),
        values: types.iter().map(|t| t.as_str().to_string()).collect(),
    })
}

/// Case-insensitive substring match on the title or any label.
pub fn label_or_title_search(value: &str) -> Predicate {
    Predicate::Any(vec![
        Predicate::contains(Accessor::text("title"), value),
        Predicate::Match(Condition::ElementContains {
            field: "labels",
            needle: value.to_string(),
        }),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material() -> Material {
        Material {
            author: Uuid::new_v4(),
            kind: MaterialType::Article,
            title: Some("Derby day".into()),
            content: "...".into(),
            preview: None,
            image: None,
            is_main: false,
            status: "published".into(),
            publication_date: Utc::now(),
            views: 0,
            likes: Vec::new(),
            comments: Vec::new(),
            labels: vec!["Premier League".into()],
        }
    }

    #[test]
    fn toggling_a_like_twice_restores_the_list() {
        let mut material = material();
        let user = Uuid::new_v4();

        assert!(material.toggle_like(user));
        assert_eq!(material.likes, vec![user]);
        assert!(!material.toggle_like(user));
        assert!(material.likes.is_empty());
    }

    #[test]
    fn serializes_type_and_flags_in_camel_case() {
        let value = serde_json::to_value(material()).unwrap();
        assert_eq!(value["type"], "article");
        assert_eq!(value["isMain"], false);
        assert!(value.get("preview").is_none());
    }
}
