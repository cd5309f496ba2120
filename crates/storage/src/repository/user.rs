use uuid::Uuid;

use super::Repository;
use crate::document::Stored;
use crate::dto::user::{
    LoginRequest, SignUpRequest, UpdateUserRequest, UserList, UserResponse, normalize_email,
};
use crate::error::{Result, StorageError};
use crate::models::{Role, User, user};
use crate::query::{ListParams, QueryPlan};
use crate::services::credentials::{hash_password, verify_password};
use crate::store::DocumentStore;

/// Repository for User documents
pub struct UserRepository<'a> {
    users: Repository<'a, User>,
}

impl<'a> UserRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            users: Repository::new(store),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<UserList> {
        let page = self.users.list(params).await?;
        Ok(UserList {
            users: page.items.into_iter().map(UserResponse::public).collect(),
            users_count: page.total,
        })
    }

    pub async fn by_role(&self, role: Option<Role>) -> Result<Vec<UserResponse>> {
        let role = role.ok_or_else(|| StorageError::Validation("Provide a role".to_string()))?;
        let page = self
            .users
            .query(&QueryPlan::new(user::with_role(role)))
            .await?;
        Ok(page.items.into_iter().map(UserResponse::public).collect())
    }

    /// Distinct non-empty user locations, sorted.
    pub async fn locations(&self) -> Result<Vec<String>> {
        let mut locations: Vec<String> = self
            .users
            .all()
            .await?
            .into_iter()
            .filter_map(|u| u.doc.location)
            .collect();
        locations.sort();
        locations.dedup();
        Ok(locations)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Stored<User>> {
        self.users.find_by_id(id).await
    }

    pub async fn find_optional(&self, id: Uuid) -> Result<Option<Stored<User>>> {
        self.users.find_optional(id).await
    }

    /// Self-service registration. Admin accounts can only be created by
    /// another admin.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<Stored<User>> {
        if request.role == Some(Role::Admin) {
            return Err(StorageError::Validation(
                "Admin accounts cannot be created by signing up".to_string(),
            ));
        }
        self.create(request).await
    }

    /// Creates a user with any role.
    pub async fn create(&self, request: SignUpRequest) -> Result<Stored<User>> {
        let hash = hash_password(&request.password)?;
        let user = request.into_user(hash)?;
        self.users.create(&user).await
    }

    pub async fn login(&self, request: LoginRequest) -> Result<Stored<User>> {
        let email = normalize_email(&request.email)?;
        let Some(user) = self.users.find_one(user::with_email(&email)).await? else {
            return Err(StorageError::InvalidCredentials);
        };

        if !verify_password(&request.password, &user.doc.password)? {
            tracing::debug!(user = %user.id, "Password mismatch");
            return Err(StorageError::InvalidCredentials);
        }
        Ok(user)
    }

    /// Replaces the profile of `id`. The role only changes when
    /// `may_change_role` is set.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateUserRequest,
        may_change_role: bool,
    ) -> Result<Stored<User>> {
        let existing = self.users.find_by_id(id).await?;

        let role = match request.role {
            Some(role) if may_change_role => role,
            Some(role) if role != existing.doc.role => {
                return Err(StorageError::Validation(
                    "Only admins can change roles".to_string(),
                ));
            }
            _ => existing.doc.role,
        };
        let hash = match request.password.as_deref() {
            Some(password) if !password.is_empty() => Some(hash_password(password)?),
            _ => None,
        };

        let user = request.apply(&existing.doc, hash, role)?;
        self.users.replace(id, &user).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.users.delete(id).await
    }

    /// Creates the configured admin account unless that email is taken.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<()> {
        let email = normalize_email(email)?;
        if self.users.find_one(user::with_email(&email)).await?.is_some() {
            tracing::debug!(%email, "Admin account already present");
            return Ok(());
        }

        let admin = User {
            first_name: "Admin".to_string(),
            last_name: "Account".to_string(),
            email,
            password: hash_password(password)?,
            role: Role::Admin,
            user_photo_url: None,
            location: None,
            organization: None,
            position: None,
        };
        let created = self.users.create(&admin).await?;
        tracing::info!(id = %created.id, "Seeded admin account");
        Ok(())
    }
}
