use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use dashmap::DashMap;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::{user, User, UserModel};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

/// Volatile map of opaque bearer token to user id. Owned by `AppState`;
/// sessions do not survive a restart.
#[derive(Debug, Default)]
pub struct SessionStore {
    tokens: DashMap<String, Uuid>,
}

impl SessionStore {
    pub fn user_for(&self, token: &str) -> Option<Uuid> {
        self.tokens.get(token).map(|entry| *entry.value())
    }

    pub fn insert(&self, token: String, user_id: Uuid) {
        self.tokens.insert(token, user_id);
    }

    pub fn remove(&self, token: &str) {
        self.tokens.remove(token);
    }
}

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_guest: bool,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_guest: user.is_guest,
        }
    }
}

/// A user plus the freshly issued bearer token.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthSession {
    pub user: UserResponse,
    pub token: String,
}

/// Account management and token-based sessions.
///
/// Passwords are stored as argon2 PHC strings; tokens are opaque UUIDs held
/// in the [`SessionStore`].
#[derive(Clone)]
pub struct SessionService {
    db: Arc<DbPool>,
    store: Arc<SessionStore>,
    events: EventSender,
}

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const NO_SESSION: &str = "No active session";

impl SessionService {
    pub fn new(db: Arc<DbPool>, store: Arc<SessionStore>, events: EventSender) -> Self {
        Self { db, store, events }
    }

    /// Registers a new account and starts a session for it.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        phone: Option<String>,
    ) -> Result<AuthSession, ServiceError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(ServiceError::ValidationError(
                "Name, email, and password are required".to_string(),
            ));
        }

        let existing = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::ValidationError(
                "User with this email already exists".to_string(),
            ));
        }

        let created = self
            .insert_user(name, email, password, phone, false)
            .await?;
        info!("registered user {}", created.id);
        Ok(self.start_session(created))
    }

    /// Verifies credentials and starts a session. The failure message never
    /// reveals whether the email exists.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ServiceError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ServiceError::ValidationError(
                "Email and password are required".to_string(),
            ));
        }

        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::AuthError(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(password, &user.password_hash) {
            return Err(ServiceError::AuthError(INVALID_CREDENTIALS.to_string()));
        }

        Ok(self.start_session(user))
    }

    /// Finds or creates a guest account and starts a session for it.
    #[instrument(skip(self))]
    pub async fn guest(
        &self,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<AuthSession, ServiceError> {
        if let Some(email) = email.as_deref().filter(|e| !e.trim().is_empty()) {
            let existing = User::find()
                .filter(user::Column::Email.eq(email))
                .filter(user::Column::IsGuest.eq(true))
                .one(&*self.db)
                .await?;
            if let Some(user) = existing {
                return Ok(self.start_session(user));
            }
        }

        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Guest User".to_string());
        let email = email
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| format!("guest_{}@ecommart.local", Uuid::new_v4().simple()));
        let password = Uuid::new_v4().to_string();

        let created = self.insert_user(&name, &email, &password, None, true).await?;
        Ok(self.start_session(created))
    }

    /// Resolves a bearer token to its user.
    pub async fn current(&self, token: Option<&str>) -> Result<UserResponse, ServiceError> {
        let token = token.ok_or_else(|| ServiceError::AuthError(NO_SESSION.to_string()))?;
        let user_id = self
            .store
            .user_for(token)
            .ok_or_else(|| ServiceError::AuthError(NO_SESSION.to_string()))?;

        let user = User::find_by_id(user_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::AuthError(NO_SESSION.to_string()))?;

        Ok(user.into())
    }

    /// Ends the session for the token, if any. Idempotent.
    pub async fn logout(&self, token: Option<&str>) {
        if let Some(token) = token {
            self.store.remove(token);
        }
    }

    async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        phone: Option<String>,
        is_guest: bool,
    ) -> Result<UserModel, ServiceError> {
        let now = Utc::now();
        let user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.trim().to_string()),
            email: Set(email.trim().to_string()),
            password_hash: Set(hash_password(password)?),
            phone: Set(phone),
            is_guest: Set(is_guest),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = user.insert(&*self.db).await?;

        self.events
            .send_or_log(Event::UserRegistered {
                user_id: created.id,
                is_guest,
            })
            .await;
        Ok(created)
    }

    fn start_session(&self, user: UserModel) -> AuthSession {
        let token = Uuid::new_v4().to_string();
        self.store.insert(token.clone(), user.id);
        AuthSession {
            user: user.into(),
            token,
        }
    }
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::InternalError(format!("password hashing failed: {err}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
