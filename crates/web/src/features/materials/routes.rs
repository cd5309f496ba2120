use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{
    add_comment, create_material, delete_material, get_main_material, get_material,
    get_recent_materials, get_secondary_materials, list_materials, search_materials,
    toggle_like, update_material,
};
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<Database> {
    let protected = Router::new()
        .route("/:id/likes", post(toggle_like))
        .route("/:id/comments", post(add_comment))
        .route_layer(middleware::from_fn_with_state(db, require_auth));

    Router::new()
        .route("/", get(list_materials).post(create_material))
        .route("/main", get(get_main_material))
        .route("/recent", get(get_recent_materials))
        .route("/secondary", get(get_secondary_materials))
        .route("/search", get(search_materials))
        .route(
            "/:id",
            get(get_material)
                .patch(update_material)
                .delete(delete_material),
        )
        .merge(protected)
}
