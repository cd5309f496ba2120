use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::Repository;
use super::club::ClubRepository;
use super::competition::CompetitionRepository;
use crate::document::{Collection, Stored, parse_id};
use crate::dto::club::ClubResponse;
use crate::dto::common::IntoModel;
use crate::dto::competition::CompetitionResponse;
use crate::dto::schedule::{
    ClubSchedule, GameResponse, MatchweekResponse, RecentMatches, ScheduleList, ScheduleRequest,
    ScheduleResponse,
};
use crate::error::{Result, StorageError};
use crate::models::{Competition, Schedule};
use crate::query::{Accessor, ListParams, Predicate, QueryPlan};
use crate::services::fixtures::{club_games, nearest_matchweek};
use crate::store::DocumentStore;

/// Competitions and clubs referenced by a batch of schedules.
struct References {
    competitions: HashMap<Uuid, CompetitionResponse>,
    clubs: HashMap<Uuid, ClubResponse>,
}

impl References {
    fn competition(&self, schedule: &Schedule) -> Option<CompetitionResponse> {
        self.competitions.get(&schedule.competition).cloned()
    }
}

/// Repository for Schedule documents
pub struct ScheduleRepository<'a> {
    store: &'a dyn DocumentStore,
    schedules: Repository<'a, Schedule>,
}

impl<'a> ScheduleRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            schedules: Repository::new(store),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<ScheduleList> {
        let page = self.schedules.list(params).await?;
        Ok(ScheduleList {
            schedules: self.populate(page.items).await?,
            schedules_count: page.total,
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<ScheduleResponse> {
        let schedule = self.schedules.find_by_id(id).await?;
        self.single(schedule).await
    }

    /// The schedule of one competition for one season.
    pub async fn league(&self, season: &str, league_id: &str) -> Result<ScheduleResponse> {
        let league = parse_id(league_id, "competition")?;
        let predicate = for_season(season).and(Predicate::equals(
            Accessor::text("competition"),
            league.to_string(),
        ));

        let schedule = self
            .schedules
            .find_one(predicate)
            .await?
            .ok_or(StorageError::NotFound(Collection::Schedules))?;
        self.single(schedule).await
    }

    /// The games of one club in every competition it plays in this season.
    /// Competitions where the club has no games are left out.
    pub async fn club(&self, season: &str, club_id: &str) -> Result<Vec<ClubSchedule>> {
        let club = parse_id(club_id, "club")?;
        let schedules = self.season(season).await?;
        let references = self.references(&schedules).await?;

        Ok(schedules
            .into_iter()
            .filter_map(|schedule| {
                let games = club_games(&schedule.doc.fixture, club);
                if games.is_empty() {
                    return None;
                }
                Some(ClubSchedule {
                    competition: references.competition(&schedule.doc),
                    games: games
                        .into_iter()
                        .map(|game| GameResponse::new(game, &references.clubs))
                        .collect(),
                })
            })
            .collect())
    }

    /// The matchweek closest to now of every schedule in this season.
    pub async fn recent(&self, season: &str) -> Result<Vec<RecentMatches>> {
        let schedules = self.season(season).await?;
        let references = self.references(&schedules).await?;
        let now = Utc::now();

        Ok(schedules
            .into_iter()
            .filter_map(|schedule| {
                let matchweek = nearest_matchweek(&schedule.doc.fixture, now)?.clone();
                Some(RecentMatches {
                    competition: references.competition(&schedule.doc),
                    matchweek: MatchweekResponse::new(matchweek, &references.clubs),
                })
            })
            .collect())
    }

    pub async fn create(&self, request: ScheduleRequest) -> Result<ScheduleResponse> {
        let schedule = request.into_model()?;
        self.ensure_competition(&schedule).await?;
        let created = self.schedules.create(&schedule).await?;
        self.single(created).await
    }

    pub async fn update(&self, id: Uuid, request: ScheduleRequest) -> Result<ScheduleResponse> {
        let schedule = request.into_model()?;
        self.ensure_competition(&schedule).await?;
        let updated = self.schedules.replace(id, &schedule).await?;
        self.single(updated).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.schedules.delete(id).await
    }

    async fn ensure_competition(&self, schedule: &Schedule) -> Result<()> {
        Repository::<Competition>::new(self.store)
            .find_by_id(schedule.competition)
            .await
            .map(|_| ())
    }

    async fn season(&self, season: &str) -> Result<Vec<Stored<Schedule>>> {
        let page = self
            .schedules
            .query(&QueryPlan::new(for_season(season)))
            .await?;
        Ok(page.items)
    }

    async fn references(&self, schedules: &[Stored<Schedule>]) -> Result<References> {
        let competition_ids: Vec<Uuid> = schedules.iter().map(|s| s.doc.competition).collect();
        let club_ids: Vec<Uuid> = schedules
            .iter()
            .flat_map(|s| s.doc.fixture.iter())
            .flat_map(|matchweek| matchweek.games.iter())
            .flat_map(|game| [game.home.club, game.away.club])
            .collect();

        Ok(References {
            competitions: CompetitionRepository::new(self.store)
                .responses_by_id(&competition_ids)
                .await?,
            clubs: ClubRepository::new(self.store)
                .responses_by_id(&club_ids)
                .await?,
        })
    }

    async fn single(&self, schedule: Stored<Schedule>) -> Result<ScheduleResponse> {
        self.populate(vec![schedule])
            .await?
            .pop()
            .ok_or(StorageError::NotFound(Collection::Schedules))
    }

    async fn populate(&self, schedules: Vec<Stored<Schedule>>) -> Result<Vec<ScheduleResponse>> {
        let references = self.references(&schedules).await?;
        Ok(schedules
            .into_iter()
            .map(|schedule| {
                let competition = references.competition(&schedule.doc);
                ScheduleResponse::new(schedule, competition, &references.clubs)
            })
            .collect())
    }
}

fn for_season(season: &str) -> Predicate {
    Predicate::equals(Accessor::text("season"), season.trim())
}
