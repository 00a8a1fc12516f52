//! Value objects - immutable types that represent domain concepts

mod snowflake;
mod sort;
mod tag_set;
mod vote;

pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use sort::QuestionSort;
pub use tag_set::{TagSet, MAX_TAGS, MAX_TAG_LENGTH};
pub use vote::{VoteDirection, VoteState, VoteTally, VoteTarget, VoteTransition};
