//! Pure pipelines over explicit inputs
//!
//! Nothing in here touches repositories or the session; services gather the
//! inputs and hand them over.

mod listing;
mod mentions;

pub use listing::{filter_and_sort, list_questions, ListingQuery, Page, DEFAULT_PAGE_SIZE};
pub use mentions::{excerpt, extract_mentions, mentions_of, EXCERPT_CHARS};
