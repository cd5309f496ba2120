use uuid::Uuid;

use super::Repository;
use super::material::MaterialRepository;
use crate::document::Stored;
use crate::dto::common::IntoModel;
use crate::dto::content::{ContentSectionRequest, ContentSectionResponse};
use crate::error::Result;
use crate::models::ContentSection;
use crate::store::DocumentStore;

/// Repository for homepage content sections
pub struct ContentRepository<'a> {
    store: &'a dyn DocumentStore,
    sections: Repository<'a, ContentSection>,
}

impl<'a> ContentRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            sections: Repository::new(store),
        }
    }

    pub async fn list(&self) -> Result<Vec<ContentSectionResponse>> {
        let mut sections = Vec::new();
        for section in self.sections.all().await? {
            sections.push(self.populate(section).await?);
        }
        Ok(sections)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<ContentSectionResponse> {
        let section = self.sections.find_by_id(id).await?;
        self.populate(section).await
    }

    pub async fn create(&self, request: ContentSectionRequest) -> Result<ContentSectionResponse> {
        let section = request.into_model()?;
        let created = self.sections.create(&section).await?;
        self.populate(created).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: ContentSectionRequest,
    ) -> Result<ContentSectionResponse> {
        let section = request.into_model()?;
        let updated = self.sections.replace(id, &section).await?;
        self.populate(updated).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.sections.delete(id).await
    }

    async fn populate(&self, section: Stored<ContentSection>) -> Result<ContentSectionResponse> {
        let materials = MaterialRepository::new(self.store)
            .previews(&section.doc.materials)
            .await?;
        Ok(ContentSectionResponse::new(section, materials))
    }
}
