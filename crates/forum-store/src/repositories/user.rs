//! In-memory implementation of UserRepository

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::instrument;

use forum_core::entities::User;
use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, UserRepository};
use forum_core::value_objects::Snowflake;

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

/// In-memory implementation of UserRepository
///
/// Emails are unique case-insensitively.
#[derive(Clone, Default)]
pub struct MemUserRepository {
    users: Arc<DashMap<Snowflake, StoredUser>>,
    /// Lower-cased email to user id
    emails: Arc<DashMap<String, Snowflake>>,
}

impl MemUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn email_key(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

#[async_trait]
impl UserRepository for MemUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.users.get(&id).map(|r| r.user.clone()))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let Some(id) = self.emails.get(&Self::email_key(email)).map(|r| *r) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|r| r.user.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.emails.contains_key(&Self::email_key(email)))
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        match self.emails.entry(Self::email_key(&user.email)) {
            Entry::Occupied(_) => return Err(DomainError::EmailAlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }

        self.users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.users.get(&id).map(|r| r.password_hash.clone()))
    }
}
