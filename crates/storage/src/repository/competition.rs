use std::collections::HashMap;

use uuid::Uuid;

use super::Repository;
use super::club::ClubRepository;
use crate::document::{Collection, Stored};
use crate::dto::common::IntoModel;
use crate::dto::competition::{
    CompetitionList, CompetitionRequest, CompetitionResponse, TOO_FEW_CLUBS,
};
use crate::error::{Result, StorageError};
use crate::models::{Club, Competition};
use crate::query::ListParams;
use crate::store::DocumentStore;

/// Repository for Competition documents
pub struct CompetitionRepository<'a> {
    store: &'a dyn DocumentStore,
    competitions: Repository<'a, Competition>,
}

impl<'a> CompetitionRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            competitions: Repository::new(store),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<CompetitionList> {
        let page = self.competitions.list(params).await?;
        Ok(CompetitionList {
            competitions: self.populate(page.items).await?,
            competitions_count: page.total,
        })
    }

    /// Every competition, newest first, without paging.
    pub async fn list_all(&self) -> Result<CompetitionList> {
        let competitions = self.populate(self.competitions.all().await?).await?;
        Ok(CompetitionList {
            competitions_count: competitions.len() as u64,
            competitions,
        })
    }

    pub async fn all(&self) -> Result<Vec<Stored<Competition>>> {
        self.competitions.all().await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<CompetitionResponse> {
        let competition = self.competitions.find_by_id(id).await?;
        self.single(competition).await
    }

    pub async fn create(&self, request: CompetitionRequest) -> Result<CompetitionResponse> {
        let competition = self.resolve_clubs(request.into_model()?).await?;
        let created = self.competitions.create(&competition).await?;
        self.single(created).await
    }

    pub async fn update(&self, id: Uuid, request: CompetitionRequest) -> Result<CompetitionResponse> {
        let competition = self.resolve_clubs(request.into_model()?).await?;
        let updated = self.competitions.replace(id, &competition).await?;
        self.single(updated).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.competitions.delete(id).await
    }

    /// Keeps only clubs that exist, in the given order, and requires at
    /// least two of them.
    async fn resolve_clubs(&self, mut competition: Competition) -> Result<Competition> {
        let existing = Repository::<Club>::new(self.store)
            .find_many(&competition.clubs)
            .await?;

        let mut clubs: Vec<Uuid> = Vec::with_capacity(existing.len());
        for club in existing {
            if !clubs.contains(&club.id) {
                clubs.push(club.id);
            }
        }

        if clubs.len() < 2 {
            return Err(StorageError::Validation(TOO_FEW_CLUBS.to_string()));
        }
        competition.clubs = clubs;
        Ok(competition)
    }

    async fn single(&self, competition: Stored<Competition>) -> Result<CompetitionResponse> {
        self.populate(vec![competition])
            .await?
            .pop()
            .ok_or(StorageError::NotFound(Collection::Competitions))
    }

    /// Populates the clubs of each competition. Deleted clubs are skipped.
    pub async fn populate(
        &self,
        competitions: Vec<Stored<Competition>>,
    ) -> Result<Vec<CompetitionResponse>> {
        let club_ids: Vec<Uuid> = competitions
            .iter()
            .flat_map(|c| c.doc.clubs.iter().copied())
            .collect();
        let clubs = ClubRepository::new(self.store)
            .responses_by_id(&club_ids)
            .await?;

        Ok(competitions
            .into_iter()
            .map(|competition| {
                let populated = competition
                    .doc
                    .clubs
                    .iter()
                    .filter_map(|id| clubs.get(id).cloned())
                    .collect();
                CompetitionResponse::new(competition, populated)
            })
            .collect())
    }

    /// Existing competitions among `ids`, populated and keyed by id.
    pub async fn responses_by_id(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, CompetitionResponse>> {
        let found = self.competitions.find_map(ids).await?;
        let populated = self.populate(found.into_values().collect()).await?;
        Ok(populated.into_iter().map(|c| (c.id, c)).collect())
    }
}
