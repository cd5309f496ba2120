use uuid::Uuid;

use super::Repository;
use super::club::ClubRepository;
use crate::document::{Collection, Stored};
use crate::dto::common::IntoModel;
use crate::dto::player::{PlayerList, PlayerRequest, PlayerResponse};
use crate::error::{Result, StorageError};
use crate::models::{Player, player};
use crate::query::{ListParams, QueryPlan};
use crate::store::DocumentStore;

/// Repository for Player documents
pub struct PlayerRepository<'a> {
    store: &'a dyn DocumentStore,
    players: Repository<'a, Player>,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            players: Repository::new(store),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<PlayerList> {
        let page = self.players.list(params).await?;
        Ok(PlayerList {
            players: self.populate(page.items).await?,
            players_count: page.total,
        })
    }

    /// Players whose first or last name contains `value`.
    pub async fn search(&self, value: &str) -> Result<Vec<PlayerResponse>> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Vec::new());
        }

        let page = self
            .players
            .query(&QueryPlan::new(player::name_search(value)))
            .await?;
        self.populate(page.items).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<PlayerResponse> {
        let player = self.players.find_by_id(id).await?;
        self.single(player).await
    }

    pub async fn create(&self, request: PlayerRequest) -> Result<PlayerResponse> {
        let player = request.into_model()?;
        let created = self.players.create(&player).await?;
        self.single(created).await
    }

    pub async fn update(&self, id: Uuid, request: PlayerRequest) -> Result<PlayerResponse> {
        let player = request.into_model()?;
        let updated = self.players.replace(id, &player).await?;
        self.single(updated).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.players.delete(id).await
    }

    async fn single(&self, player: Stored<Player>) -> Result<PlayerResponse> {
        self.populate(vec![player])
            .await?
            .pop()
            .ok_or(StorageError::NotFound(Collection::Players))
    }

    async fn populate(&self, players: Vec<Stored<Player>>) -> Result<Vec<PlayerResponse>> {
        let club_ids: Vec<Uuid> = players.iter().filter_map(|p| p.doc.club).collect();
        let clubs = ClubRepository::new(self.store)
            .responses_by_id(&club_ids)
            .await?;

        Ok(players
            .into_iter()
            .map(|player| {
                let club = player.doc.club.and_then(|id| clubs.get(&id).cloned());
                PlayerResponse::new(player, club)
            })
            .collect())
    }
}
