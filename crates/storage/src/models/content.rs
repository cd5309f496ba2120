use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::document::{Collection, Document};

/// A named homepage slot holding up to `max_length` materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentSection {
    pub name: String,
    pub max_length: u32,
    #[serde(default)]
    pub materials: Vec<Uuid>,
}

impl Document for ContentSection {
    const COLLECTION: Collection = Collection::ContentSections;
}
