//! Repository implementations
//!
//! In-memory implementations of the repository traits defined in forum-core.
//! Each repository is cheap to clone and shares its state across clones.

mod answer;
mod notification;
mod question;
mod user;
mod vote;

pub use answer::MemAnswerRepository;
pub use notification::MemNotificationRepository;
pub use question::MemQuestionRepository;
pub use user::MemUserRepository;
pub use vote::MemVoteRepository;
