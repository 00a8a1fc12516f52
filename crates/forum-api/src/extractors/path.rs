//! Path parameter extractors
//!
//! Path structs keep the raw segment and parse it into a Snowflake on demand.

use forum_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    Snowflake::parse(raw).map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Path parameters with question_id
#[derive(Debug, Deserialize)]
pub struct QuestionIdPath {
    pub question_id: String,
}

impl QuestionIdPath {
    pub fn question_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.question_id, "question_id")
    }
}

/// Path parameters with answer_id
#[derive(Debug, Deserialize)]
pub struct AnswerIdPath {
    pub answer_id: String,
}

impl AnswerIdPath {
    pub fn answer_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.answer_id, "answer_id")
    }
}

/// Path parameters with notification_id
#[derive(Debug, Deserialize)]
pub struct NotificationIdPath {
    pub notification_id: String,
}

impl NotificationIdPath {
    pub fn notification_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.notification_id, "notification_id")
    }
}
