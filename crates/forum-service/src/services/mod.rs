//! Business logic services
//!
//! Each service borrows the `ServiceContext` for the duration of one call.

pub mod answer;
pub mod context;
pub mod error;
pub mod notification;
pub mod question;
pub mod session;
pub mod tag;
pub mod vote;

// Re-export all services for convenience
pub use answer::AnswerService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use notification::NotificationService;
pub use question::QuestionService;
pub use session::{Session, SessionService, VIEWER_STORAGE_KEY};
pub use tag::TagService;
pub use vote::{VoteOutcome, VoteService};
