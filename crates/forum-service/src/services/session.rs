//! Viewer session and the identity provider on top of it
//!
//! A single viewer is signed in at a time. The viewer record is mirrored as
//! JSON under `VIEWER_STORAGE_KEY` in local storage so it survives restarts.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use forum_common::{hash_password, validate_password_strength, verify_password};
use forum_core::entities::User;
use forum_core::error::DomainError;
use forum_core::traits::{LocalStorage, RepoResult};

use crate::dto::{LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Local storage key holding the signed-in viewer
pub const VIEWER_STORAGE_KEY: &str = "forum.current_viewer";

/// Current viewer plus its persisted copy
pub struct Session {
    current: RwLock<Option<User>>,
    storage: Arc<dyn LocalStorage>,
}

impl Session {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            current: RwLock::new(None),
            storage,
        }
    }

    pub fn current_viewer(&self) -> Option<User> {
        self.current.read().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.read().is_some()
    }

    /// Load the persisted viewer, if any
    ///
    /// An unreadable record is dropped from storage and treated as signed out.
    pub async fn restore(&self) -> RepoResult<Option<User>> {
        let Some(raw) = self.storage.get(VIEWER_STORAGE_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => {
                info!(user_id = %user.id, "Restored viewer session");
                *self.current.write() = Some(user.clone());
                Ok(Some(user))
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable viewer record");
                self.storage.remove(VIEWER_STORAGE_KEY).await?;
                Ok(None)
            }
        }
    }

    pub(crate) async fn sign_in(&self, user: User) -> RepoResult<()> {
        let json = serde_json::to_string(&user)
            .map_err(|e| DomainError::StorageError(e.to_string()))?;
        self.storage.set(VIEWER_STORAGE_KEY, &json).await?;
        *self.current.write() = Some(user);
        Ok(())
    }

    pub(crate) async fn sign_out(&self) -> RepoResult<Option<User>> {
        self.storage.remove(VIEWER_STORAGE_KEY).await?;
        Ok(self.current.write().take())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("viewer", &self.current.read().as_ref().map(|u| u.id))
            .finish()
    }
}

/// Identity provider: register, login, logout
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn current_viewer(&self) -> Option<User> {
        self.ctx.viewer()
    }

    /// Register a new member and sign them in
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<User> {
        let request = request.normalized();
        request.validate()?;
        validate_password_strength(&request.password)?;

        self.ctx.simulate_latency().await;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(self.ctx.generate_id(), request.name, request.email);
        self.ctx.user_repo().create(&user, &password_hash).await?;
        self.ctx.session().sign_in(user.clone()).await?;

        info!(user_id = %user.id, "Member registered");
        Ok(user)
    }

    /// Sign in with email and password
    ///
    /// Fails closed: unknown email, wrong password and unreadable hashes all
    /// return `false`.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<bool> {
        self.ctx.simulate_latency().await;

        let Some(user) = self.ctx.user_repo().find_by_email(&request.email).await? else {
            warn!("Login failed: unknown email");
            return Ok(false);
        };

        let Some(password_hash) = self.ctx.user_repo().get_password_hash(user.id).await? else {
            warn!(user_id = %user.id, "Login failed: no password hash");
            return Ok(false);
        };

        match verify_password(&request.password, &password_hash) {
            Ok(true) => {}
            Ok(false) => {
                warn!(user_id = %user.id, "Login failed: invalid password");
                return Ok(false);
            }
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Login failed: unreadable password hash");
                return Ok(false);
            }
        }

        let user_id = user.id;
        self.ctx.session().sign_in(user).await?;
        info!(user_id = %user_id, "Viewer signed in");
        Ok(true)
    }

    /// Sign out; signing out twice is harmless
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ServiceResult<()> {
        self.ctx.simulate_latency().await;

        if let Some(user) = self.ctx.session().sign_out().await? {
            info!(user_id = %user.id, "Viewer signed out");
        }
        Ok(())
    }
}
