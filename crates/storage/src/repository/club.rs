use std::collections::HashMap;

use uuid::Uuid;

use super::Repository;
use crate::dto::club::{ClubList, ClubRequest, ClubResponse};
use crate::dto::common::IntoModel;
use crate::error::Result;
use crate::models::{Club, club};
use crate::query::{ListParams, QueryPlan};
use crate::store::DocumentStore;

/// Repository for Club documents
pub struct ClubRepository<'a> {
    clubs: Repository<'a, Club>,
}

impl<'a> ClubRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            clubs: Repository::new(store),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<ClubList> {
        let page = self.clubs.list(params).await?;
        Ok(ClubList {
            clubs: page.items.into_iter().map(ClubResponse::from).collect(),
            clubs_count: page.total,
        })
    }

    /// Clubs whose full, common or short name contains `value`.
    pub async fn search(&self, value: &str) -> Result<Vec<ClubResponse>> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Vec::new());
        }

        let page = self
            .clubs
            .query(&QueryPlan::new(club::name_search(value)))
            .await?;
        Ok(page.items.into_iter().map(ClubResponse::from).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<ClubResponse> {
        self.clubs.find_by_id(id).await.map(ClubResponse::from)
    }

    /// Existing clubs among `ids`, keyed by id, for populating references.
    pub async fn responses_by_id(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, ClubResponse>> {
        Ok(self
            .clubs
            .find_map(ids)
            .await?
            .into_iter()
            .map(|(id, club)| (id, ClubResponse::from(club)))
            .collect())
    }

    pub async fn create(&self, request: ClubRequest) -> Result<ClubResponse> {
        let club = request.into_model()?;
        self.clubs.create(&club).await.map(ClubResponse::from)
    }

    pub async fn update(&self, id: Uuid, request: ClubRequest) -> Result<ClubResponse> {
        let club = request.into_model()?;
        self.clubs.replace(id, &club).await.map(ClubResponse::from)
    }

    /// Players, competitions and schedules keep their reference; it reads
    /// as `null` or is skipped from then on.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.clubs.delete(id).await
    }
}
