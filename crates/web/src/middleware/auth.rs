use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use storage::{Database, models::Role, repository::user::UserRepository};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::{WebError, WebResult};
use crate::session;

/// The signed-in user, attached to requests that passed [`require_auth`].
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether this user may edit or delete the account `id`.
    pub fn may_manage(&self, id: Uuid) -> bool {
        self.id == id || self.is_admin()
    }
}

async fn authenticate(db: &Database, session: &Session) -> WebResult<CurrentUser> {
    let Some(id) = session::user_id(session).await? else {
        return Err(WebError::Unauthorized);
    };

    match UserRepository::new(db.store()).find_optional(id).await? {
        Some(user) => Ok(CurrentUser {
            id: user.id,
            role: user.doc.role,
        }),
        None => {
            tracing::warn!(user = %id, "Session refers to a deleted user");
            session::sign_out(session).await?;
            Err(WebError::Unauthorized)
        }
    }
}

pub async fn require_auth(
    State(db): State<Database>,
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let user = authenticate(&db, &session).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

pub async fn require_admin(
    State(db): State<Database>,
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let user = authenticate(&db, &session).await?;
    if !user.is_admin() {
        tracing::warn!(user = %user.id, "Admin endpoint refused");
        return Err(WebError::Forbidden);
    }
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
