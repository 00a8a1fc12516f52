//! # forum-core
//!
//! Domain layer for the Q&A forum: entities, value objects, repository ports,
//! domain events, and the pure pipelines (question listing, vote tally,
//! mention fan-out). Nothing in here touches storage, HTTP, or the clock
//! beyond `chrono::Utc::now()` on entity creation.

pub mod entities;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Answer, NewNotification, Notification, NotificationFeed, NotificationKind, Question, User,
    UserRole, DEFAULT_FEED_CAPACITY,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use pipeline::{
    excerpt, extract_mentions, filter_and_sort, list_questions, mentions_of, ListingQuery, Page,
    DEFAULT_PAGE_SIZE, EXCERPT_CHARS,
};
pub use traits::{
    AnswerRepository, LocalStorage, NotificationRepository, QuestionRepository, RepoResult,
    UserRepository, VoteRepository,
};
pub use value_objects::{
    QuestionSort, Snowflake, SnowflakeGenerator, SnowflakeParseError, TagSet, VoteDirection,
    VoteState, VoteTally, VoteTarget, VoteTransition,
};
