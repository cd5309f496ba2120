use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{create_section, delete_section, get_section, list_sections, update_section};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_sections).post(create_section))
        .route(
            "/:id",
            get(get_section).patch(update_section).delete(delete_section),
        )
}
