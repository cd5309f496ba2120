use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{
    create_competition, delete_competition, get_competition, list_all_competitions,
    list_competitions, update_competition,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_competitions).post(create_competition))
        .route("/all", get(list_all_competitions))
        .route(
            "/:id",
            get(get_competition)
                .patch(update_competition)
                .delete(delete_competition),
        )
}
