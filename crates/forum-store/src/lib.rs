//! # forum-store
//!
//! Storage layer implementing the repository and local storage traits
//! defined in `forum-core`.
//!
//! ## Overview
//!
//! - In-memory repositories for questions, answers, users, votes and
//!   notification feeds
//! - Local key-value storage, kept in memory or in a JSON file
//! - Demo seed data loaded at startup
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forum_store::{MemQuestionRepository, FileLocalStorage};
//! use forum_core::traits::QuestionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let questions = MemQuestionRepository::new();
//!     let storage = FileLocalStorage::open("./forum-storage.json").await?;
//!     println!("{} questions", questions.count().await?);
//!     Ok(())
//! }
//! ```

pub mod repositories;
pub mod seed;
pub mod storage;

// Re-export commonly used types
pub use repositories::{
    MemAnswerRepository, MemNotificationRepository, MemQuestionRepository, MemUserRepository,
    MemVoteRepository,
};
pub use seed::{seed_demo_data, SeedReport};
pub use storage::{FileLocalStorage, MemoryLocalStorage};
