use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::{IntoModel, required};
use super::material::MaterialResponse;
use crate::document::{Stored, parse_ids};
use crate::error::{Result, StorageError};
use crate::models::ContentSection;

/// Request payload for creating or replacing a content section
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentSectionRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Content section must have a name"))]
    pub name: String,

    #[serde(default)]
    #[validate(range(min = 1, message = "Content section must have a max length"))]
    pub max_length: u32,

    /// Material ids, in display order.
    #[serde(default)]
    pub materials: Vec<String>,
}

impl IntoModel for ContentSectionRequest {
    type Model = ContentSection;

    fn into_model(self) -> Result<ContentSection> {
        if self.max_length == 0 {
            return Err(StorageError::Validation(
                "Content section must have a max length".to_string(),
            ));
        }
        if self.materials.len() > self.max_length as usize {
            return Err(StorageError::Validation(format!(
                "Content section cannot hold more than {} materials",
                self.max_length
            )));
        }

        Ok(ContentSection {
            name: required(&self.name, "Content section must have a name")?,
            max_length: self.max_length,
            materials: parse_ids(&self.materials, "material")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentSectionResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub max_length: u32,
    /// Materials that still exist, in section order, likes as counts.
    pub materials: Vec<MaterialResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentSectionResponse {
    pub fn new(stored: Stored<ContentSection>, materials: Vec<MaterialResponse>) -> Self {
        Self {
            id: stored.id,
            name: stored.doc.name,
            max_length: stored.doc.max_length,
            materials,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}
