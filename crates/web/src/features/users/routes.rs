use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use storage::Database;

use super::handlers::{
    create_user, delete_user, get_authenticated_user, list_locations, list_users,
    list_users_by_role, login, logout, sign_up, update_user,
};
use crate::middleware::auth::{require_admin, require_auth};

pub fn routes(db: Database) -> Router<Database> {
    let protected = Router::new()
        .route("/", get(get_authenticated_user))
        .route("/logout", post(logout))
        .route("/:id", patch(update_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(db.clone(), require_auth));

    let admin = Router::new()
        .route("/new-user", post(create_user))
        .route_layer(middleware::from_fn_with_state(db, require_admin));

    Router::new()
        .route("/all", get(list_users))
        .route("/by-role", get(list_users_by_role))
        .route("/locations", get(list_locations))
        .route("/signup", post(sign_up))
        .route("/login", post(login))
        .merge(protected)
        .merge(admin)
}
