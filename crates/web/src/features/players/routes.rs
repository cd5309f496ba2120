use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{
    create_player, delete_player, get_player, list_players, search_players, update_player,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_players).post(create_player))
        .route("/search", get(search_players))
        .route(
            "/:id",
            get(get_player).patch(update_player).delete(delete_player),
        )
}
