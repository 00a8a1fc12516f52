//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those with field rules also
//! implement `Validate`.

use serde::Deserialize;
use validator::Validate;

use forum_core::pipeline::ListingQuery;
use forum_core::value_objects::{QuestionSort, TagSet, VoteDirection};

use crate::services::{ServiceError, ServiceResult};

// ============================================================================
// Session Requests
// ============================================================================

/// Member registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Display name must be 2-32 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Minimum length is checked by `validate_password_strength`
    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub password: String,
}

impl RegisterRequest {
    /// Trim the display name and email
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
        }
    }
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Question Requests
// ============================================================================

/// Question submission
///
/// Required-field checks run in a fixed order (title, body, tags) in
/// `QuestionService`; the derive only covers the title bound.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(max = 150, message = "Title must be at most 150 characters"))]
    pub title: String,

    #[serde(alias = "details")]
    pub body: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateQuestionRequest {
    pub fn new(title: impl Into<String>, body: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    /// Trim text fields
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            body: self.body.trim().to_string(),
            tags: self.tags,
        }
    }
}

// ============================================================================
// Answer Requests
// ============================================================================

/// Answer submission
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAnswerRequest {
    #[validate(length(min = 1, message = "Answer cannot be empty"))]
    pub body: String,
}

impl CreateAnswerRequest {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn normalized(self) -> Self {
        Self {
            body: self.body.trim().to_string(),
        }
    }
}

// ============================================================================
// Vote Requests
// ============================================================================

/// Vote input on a question or answer
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VoteRequest {
    pub direction: VoteDirection,
}

// ============================================================================
// Listing Queries
// ============================================================================

/// Query string of the question listing
///
/// `tags` is a comma-separated list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuestionsParams {
    pub q: Option<String>,
    pub tags: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
}

impl ListQuestionsParams {
    /// Convert into a pipeline query; page defaults to 1
    ///
    /// # Errors
    /// Returns a validation error for an unknown sort key
    pub fn into_listing_query(self) -> ServiceResult<ListingQuery> {
        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") => QuestionSort::default(),
            Some(raw) => raw.parse().map_err(ServiceError::validation)?,
        };

        let tags: TagSet = self
            .tags
            .as_deref()
            .map(|raw| raw.split(',').collect())
            .unwrap_or_default();

        Ok(ListingQuery::default()
            .with_text(self.q.unwrap_or_default())
            .with_tags(tags)
            .with_sort(sort)
            .with_page(self.page.unwrap_or(1)))
    }
}

/// Query string of the popular tags listing
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TagsParams {
    pub limit: Option<usize>,
}
