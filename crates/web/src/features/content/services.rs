use storage::{
    dto::content::{ContentSectionRequest, ContentSectionResponse},
    error::Result,
    repository::content::ContentRepository,
    store::DocumentStore,
};
use uuid::Uuid;

/// List all content sections
pub async fn list_sections(store: &dyn DocumentStore) -> Result<Vec<ContentSectionResponse>> {
    ContentRepository::new(store).list().await
}

/// Get content section by id
pub async fn get_section(store: &dyn DocumentStore, id: Uuid) -> Result<ContentSectionResponse> {
    ContentRepository::new(store).find_by_id(id).await
}

/// Create a new content section
pub async fn create_section(
    store: &dyn DocumentStore,
    request: ContentSectionRequest,
) -> Result<ContentSectionResponse> {
    ContentRepository::new(store).create(request).await
}

/// Replace a content section
pub async fn update_section(
    store: &dyn DocumentStore,
    id: Uuid,
    request: ContentSectionRequest,
) -> Result<ContentSectionResponse> {
    ContentRepository::new(store).update(id, request).await
}

/// Delete a content section
pub async fn delete_section(store: &dyn DocumentStore, id: Uuid) -> Result<()> {
    ContentRepository::new(store).delete(id).await
}
