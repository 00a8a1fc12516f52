//! Axum extractors for request handling
//!
//! Custom extractors for JSON bodies, validation, path ids and the listing query.

mod listing;
mod path;
mod validated;

pub use listing::Listing;
pub use path::{AnswerIdPath, NotificationIdPath, QuestionIdPath};
pub use validated::{JsonBody, ValidatedJson};
