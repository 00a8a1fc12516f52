//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the storage layer provides
//! the implementation.

use async_trait::async_trait;

use crate::entities::{Answer, Notification, NotificationFeed, Question, User};
use crate::error::DomainError;
use crate::value_objects::{Snowflake, VoteState, VoteTarget};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Question Repository
// ============================================================================

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Find question by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Question>>;

    /// Every question, in insertion order
    async fn list_all(&self) -> RepoResult<Vec<Question>>;

    /// Create a new question
    async fn create(&self, question: &Question) -> RepoResult<()>;

    /// Count one more answer, returning the updated question
    async fn record_answer(&self, id: Snowflake) -> RepoResult<Question>;

    /// Point the question at its accepted answer, returning the updated question
    async fn set_accepted_answer(&self, id: Snowflake, answer_id: Snowflake) -> RepoResult<Question>;

    /// Add `delta` to the stored vote count, returning the new count
    async fn adjust_votes(&self, id: Snowflake, delta: i32) -> RepoResult<i32>;

    /// Number of stored questions
    async fn count(&self) -> RepoResult<usize>;
}

// ============================================================================
// Answer Repository
// ============================================================================

#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Find answer by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Answer>>;

    /// Answers to a question, in insertion order
    async fn find_by_question(&self, question_id: Snowflake) -> RepoResult<Vec<Answer>>;

    /// Create a new answer
    async fn create(&self, answer: &Answer) -> RepoResult<()>;

    /// Accept `id` and un-accept every other answer to the same question
    ///
    /// Returns `false` when `id` was already the only accepted answer.
    async fn mark_accepted(&self, id: Snowflake) -> RepoResult<bool>;

    /// Add `delta` to the stored vote count, returning the new count
    async fn adjust_votes(&self, id: Snowflake, delta: i32) -> RepoResult<i32>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Push to the front of the recipient's feed, returning any evicted entry
    async fn push(&self, notification: Notification) -> RepoResult<Option<Notification>>;

    /// Snapshot of the recipient's feed
    async fn feed(&self, recipient_id: Snowflake) -> RepoResult<NotificationFeed>;

    /// Mark one notification read
    ///
    /// `None` if it is not in the feed, otherwise whether it was unread.
    async fn mark_as_read(&self, recipient_id: Snowflake, id: Snowflake) -> RepoResult<Option<bool>>;

    /// Mark the whole feed read, returning how many entries changed
    async fn mark_all_as_read(&self, recipient_id: Snowflake) -> RepoResult<usize>;
}

// ============================================================================
// Vote Repository
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Standing vote of `voter_id` on `target`; `None` state when never voted
    async fn get(&self, voter_id: Snowflake, target: VoteTarget) -> RepoResult<VoteState>;

    /// Store a vote; a `None` state clears the entry
    async fn set(&self, voter_id: Snowflake, target: VoteTarget, state: VoteState) -> RepoResult<()>;
}

// ============================================================================
// Local Storage
// ============================================================================

/// String key-value store standing in for browser local storage
#[async_trait]
pub trait LocalStorage: Send + Sync {
    async fn get(&self, key: &str) -> RepoResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> RepoResult<()>;

    async fn remove(&self, key: &str) -> RepoResult<()>;
}
