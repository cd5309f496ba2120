//! Cookie sessions kept in process memory.

use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};
use uuid::Uuid;

use crate::error::WebResult;

/// Session key holding the signed-in user's id.
pub const SESSION_USER_ID: &str = "userId";

/// Sessions expire after this long without a request.
pub const SESSION_EXPIRY_HOURS: i64 = 1;

pub fn create_session_layer(secure: bool) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::hours(SESSION_EXPIRY_HOURS)))
}

pub async fn user_id(session: &Session) -> WebResult<Option<Uuid>> {
    Ok(session.get::<Uuid>(SESSION_USER_ID).await?)
}

/// Binds the session to `user`, issuing a fresh session id.
pub async fn sign_in(session: &Session, user: Uuid) -> WebResult<()> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_ID, user).await?;
    Ok(())
}

pub async fn sign_out(session: &Session) -> WebResult<()> {
    session.flush().await?;
    Ok(())
}
