//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateAnswerRequest, CreateQuestionRequest, ListQuestionsParams, LoginRequest,
    RegisterRequest, TagsParams, VoteRequest,
};

pub use responses::{
    AnswerResponse, ApiResponse, AuthorResponse, HealthResponse, MarkReadResponse,
    NotificationListResponse, NotificationResponse, PageMeta, PageResponse,
    QuestionDetailResponse, QuestionResponse, SessionResponse, TagCountResponse, UserResponse,
    VoteResponse,
};

pub use mappers::{AnswerWithDetails, QuestionWithDetails};
