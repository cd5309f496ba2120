use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::{IntoModel, non_empty, required};
use crate::document::{Stored, parse_id, parse_ids};
use crate::error::{Result, StorageError};
use crate::models::{Comment, Material, MaterialType, User};
use crate::query::params::parse_count;

/// Request payload for creating or replacing a material
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRequest {
    /// Author (user) id.
    #[serde(default)]
    #[validate(length(min = 1, message = "Material must have an author"))]
    pub author: String,

    #[serde(default, rename = "type")]
    #[validate(required(message = "Material must have a type"))]
    pub kind: Option<MaterialType>,

    pub title: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Material must have content"))]
    pub content: String,

    pub preview: Option<String>,

    #[validate(url)]
    pub image: Option<String>,

    #[serde(default)]
    pub is_main: bool,

    #[serde(default)]
    #[validate(length(min = 1, message = "Material must have a status"))]
    pub status: String,

    /// Defaults to now.
    pub publication_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub views: u64,

    /// User ids.
    #[serde(default)]
    pub likes: Vec<String>,

    #[serde(default)]
    pub comments: Vec<CommentRequest>,

    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentRequest {
    /// User id.
    pub user: String,
    pub message: String,
}

/// Comment posted by the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewCommentRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 2000, message = "Comment must have a message"))]
    pub message: String,
}

impl IntoModel for MaterialRequest {
    type Model = Material;

    fn into_model(self) -> Result<Material> {
        let author = required(&self.author, "Material must have an author")?;
        let kind = self
            .kind
            .ok_or_else(|| StorageError::Validation("Material must have a type".to_string()))?;

        let mut likes: Vec<Uuid> = Vec::with_capacity(self.likes.len());
        for id in parse_ids(&self.likes, "user")? {
            if !likes.contains(&id) {
                likes.push(id);
            }
        }

        let comments = self
            .comments
            .into_iter()
            .map(|c| {
                Ok(Comment {
                    user: parse_id(&c.user, "user")?,
                    message: c.message,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut labels: Vec<String> = Vec::new();
        for label in self.labels.into_iter().filter_map(|l| non_empty(Some(l))) {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }

        Ok(Material {
            author: parse_id(&author, "author")?,
            kind,
            title: non_empty(self.title),
            content: required(&self.content, "Material must have content")?,
            preview: non_empty(self.preview),
            image: non_empty(self.image),
            is_main: self.is_main,
            status: required(&self.status, "Material must have a status")?,
            publication_date: self.publication_date.unwrap_or_else(Utc::now),
            views: self.views,
            likes,
            comments,
            labels,
        })
    }
}

/// Public profile of a material's author
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInfo {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl From<Stored<User>> for AuthorInfo {
    fn from(stored: Stored<User>) -> Self {
        let user = stored.doc;
        Self {
            id: stored.id,
            first_name: user.first_name,
            last_name: user.last_name,
            user_photo_url: user.user_photo_url,
            organization: user.organization,
            position: user.position,
        }
    }
}

/// Liker ids on single-material reads, a plain count in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Likes {
    Ids(Vec<Uuid>),
    Count(u64),
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// `null` when the author was deleted.
    pub author: Option<AuthorInfo>,
    #[serde(rename = "type")]
    pub kind: MaterialType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub is_main: bool,
    pub status: String,
    pub publication_date: DateTime<Utc>,
    pub views: u64,
    pub likes: Likes,
    pub comments: Vec<Comment>,
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaterialResponse {
    /// Single-material shape: likes as the list of liker ids.
    pub fn full(stored: Stored<Material>, author: Option<AuthorInfo>) -> Self {
        let likes = Likes::Ids(stored.doc.likes.clone());
        Self::with_likes(stored, author, likes)
    }

    /// Listing shape: likes collapsed to a count.
    pub fn preview(stored: Stored<Material>, author: Option<AuthorInfo>) -> Self {
        let likes = Likes::Count(stored.doc.likes.len() as u64);
        Self::with_likes(stored, author, likes)
    }

    fn with_likes(stored: Stored<Material>, author: Option<AuthorInfo>, likes: Likes) -> Self {
        let material = stored.doc;
        Self {
            id: stored.id,
            author,
            kind: material.kind,
            title: material.title,
            content: material.content,
            preview: material.preview,
            image: material.image,
            is_main: material.is_main,
            status: material.status,
            publication_date: material.publication_date,
            views: material.views,
            likes,
            comments: material.comments,
            labels: material.labels,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialList {
    pub materials: Vec<MaterialResponse>,
    pub materials_count: u64,
}

/// Materials whose labels name one competition.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeagueMaterials {
    pub league_id: Uuid,
    pub league: String,
    pub materials_count: u64,
    pub materials: Vec<MaterialResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryMaterials {
    pub top_materials: Vec<MaterialResponse>,
    pub posts: Vec<MaterialResponse>,
    pub league_materials: Vec<LeagueMaterials>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub liked: bool,
    pub likes: u64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SecondaryMaterialsQuery {
    #[serde(default)]
    pub top_materials_num: u64,
    #[serde(default)]
    pub posts_num: u64,
}

/// Query of `GET /materials/recent`. `materialTypes` may repeat or be
/// comma-separated.
#[derive(Debug, Default, PartialEq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RecentMaterialsQuery {
    pub materials_number: u64,
    pub material_types: Vec<MaterialType>,
}

/// Query of `GET /materials/search`.
#[derive(Debug, Default, PartialEq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MaterialSearchQuery {
    pub value: String,
    /// Restricts the search to these types; `type` may repeat.
    #[serde(rename = "type")]
    pub types: Vec<MaterialType>,
    pub materials_num: u64,
}

fn parse_types(value: &str) -> Result<Vec<MaterialType>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            serde_json::from_value(serde_json::Value::String(t.to_string())).map_err(|_| {
                StorageError::Validation(format!("Unknown material type: {}", t))
            })
        })
        .collect()
}

fn push_types(types: &mut Vec<MaterialType>, value: &str) -> Result<()> {
    for kind in parse_types(value)? {
        if !types.contains(&kind) {
            types.push(kind);
        }
    }
    Ok(())
}

impl RecentMaterialsQuery {
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "materialsNumber" => {
                    query.materials_number = parse_count("materialsNumber", &value)?
                }
                "materialTypes" | "materialTypes[]" => push_types(&mut query.material_types, &value)?,
                _ => {}
            }
        }
        Ok(query)
    }
}

impl MaterialSearchQuery {
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "value" => query.value = value.trim().to_string(),
                "type" | "type[]" => push_types(&mut query.types, &value)?,
                "materialsNum" => query.materials_num = parse_count("materialsNum", &value)?,
                _ => {}
            }
        }
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn recent_query_accepts_repeated_and_comma_separated_types() {
        let query = RecentMaterialsQuery::from_pairs(pairs(&[
            ("materialsNumber", "4"),
            ("materialTypes", "article,note"),
            ("materialTypes[]", "article"),
        ]))
        .unwrap();

        assert_eq!(query.materials_number, 4);
        assert_eq!(
            query.material_types,
            vec![MaterialType::Article, MaterialType::Note]
        );
    }

    #[test]
    fn unknown_types_are_rejected() {
        let err = MaterialSearchQuery::from_pairs(pairs(&[("type", "video")])).unwrap_err();
        assert_eq!(err.to_string(), "Unknown material type: video");
    }

    #[test]
    fn listing_shape_counts_likes() {
        let stored = Stored {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            doc: Material {
                author: Uuid::new_v4(),
                kind: MaterialType::Post,
                title: None,
                content: "Goal!".into(),
                preview: None,
                image: None,
                is_main: false,
                status: "published".into(),
                publication_date: Utc::now(),
                views: 3,
                likes: vec![Uuid::new_v4(), Uuid::new_v4()],
                comments: Vec::new(),
                labels: Vec::new(),
            },
        };

        let preview = serde_json::to_value(MaterialResponse::preview(stored.clone(), None)).unwrap();
        let full = serde_json::to_value(MaterialResponse::full(stored.clone(), None)).unwrap();

        assert_eq!(preview["likes"], 2);
        assert_eq!(full["likes"].as_array().map(Vec::len), Some(2));
        assert_eq!(stored.doc.likes.len(), 2);
    }
}
