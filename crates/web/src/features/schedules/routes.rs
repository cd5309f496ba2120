use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{
    create_schedule, delete_schedule, get_club_schedule, get_league_schedule, get_recent_matches,
    get_schedule, list_schedules, update_schedule,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_schedules).post(create_schedule))
        .route("/league", get(get_league_schedule))
        .route("/club", get(get_club_schedule))
        .route("/recent", get(get_recent_matches))
        .route(
            "/:id",
            get(get_schedule)
                .patch(update_schedule)
                .delete(delete_schedule),
        )
}
