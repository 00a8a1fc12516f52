//! User entity - a forum member, and the "viewer" when signed in

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Role of a member within the forum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Member,
    Moderator,
    Admin,
}

/// A forum member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Snowflake,
    /// Name shown on posts and matched by `@name` mentions
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub reputation: i32,
}

impl User {
    pub fn new(id: Snowflake, name: String, email: String) -> Self {
        Self {
            id,
            name,
            email,
            role: UserRole::Member,
            avatar: None,
            joined_at: Utc::now(),
            reputation: 1,
        }
    }

    /// Avatar URL, falling back to a generated one keyed on the name
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(url) => url.clone(),
            None => format!("/avatars/default/{}.png", self.initial()),
        }
    }

    fn initial(&self) -> char {
        self.name
            .chars()
            .find(|c| c.is_alphanumeric())
            .map_or('x', |c| c.to_ascii_lowercase())
    }

    #[inline]
    pub fn is_moderator(&self) -> bool {
        matches!(self.role, UserRole::Moderator | UserRole::Admin)
    }
}
