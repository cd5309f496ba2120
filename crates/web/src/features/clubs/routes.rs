use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{create_club, delete_club, get_club, list_clubs, search_clubs, update_club};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_clubs).post(create_club))
        .route("/search", get(search_clubs))
        .route("/:id", get(get_club).patch(update_club).delete(delete_club))
}
