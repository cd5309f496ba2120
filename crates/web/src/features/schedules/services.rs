use storage::{
    dto::schedule::{ClubSchedule, RecentMatches, ScheduleList, ScheduleRequest, ScheduleResponse},
    error::Result,
    query::ListParams,
    repository::schedule::ScheduleRepository,
    store::DocumentStore,
};
use uuid::Uuid;

/// List schedules matching the list parameters
pub async fn list_schedules(store: &dyn DocumentStore, params: &ListParams) -> Result<ScheduleList> {
    ScheduleRepository::new(store).list(params).await
}

/// Get the schedule of a competition for a season
pub async fn get_league_schedule(
    store: &dyn DocumentStore,
    season: &str,
    league_id: &str,
) -> Result<ScheduleResponse> {
    ScheduleRepository::new(store).league(season, league_id).await
}

/// Get the games of a club for a season
pub async fn get_club_schedule(
    store: &dyn DocumentStore,
    season: &str,
    club_id: &str,
) -> Result<Vec<ClubSchedule>> {
    ScheduleRepository::new(store).club(season, club_id).await
}

/// Get the matchweek closest to now of every schedule in a season
pub async fn get_recent_matches(
    store: &dyn DocumentStore,
    season: &str,
) -> Result<Vec<RecentMatches>> {
    ScheduleRepository::new(store).recent(season).await
}

/// Get schedule by id
pub async fn get_schedule(store: &dyn DocumentStore, id: Uuid) -> Result<ScheduleResponse> {
    ScheduleRepository::new(store).find_by_id(id).await
}

/// Create a new schedule
pub async fn create_schedule(
    store: &dyn DocumentStore,
    request: ScheduleRequest,
) -> Result<ScheduleResponse> {
    ScheduleRepository::new(store).create(request).await
}

/// Replace a schedule
pub async fn update_schedule(
    store: &dyn DocumentStore,
    id: Uuid,
    request: ScheduleRequest,
) -> Result<ScheduleResponse> {
    ScheduleRepository::new(store).update(id, request).await
}

/// Delete a schedule and return the refreshed list
pub async fn delete_schedule(
    store: &dyn DocumentStore,
    id: Uuid,
    params: &ListParams,
) -> Result<ScheduleList> {
    let repo = ScheduleRepository::new(store);
    repo.delete(id).await?;
    repo.list(params).await
}
