//! # forum-service
//!
//! Application layer containing the session provider, business logic
//! services, DTOs, and the background notification source.

pub mod background;
pub mod dto;
pub mod services;

pub use background::{
    run_tick, spawn_notification_ticker, NotificationSource, RandomNotificationSource,
};
pub use services::{
    AnswerService, NotificationService, QuestionService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, Session, SessionService, TagService, VoteOutcome, VoteService,
    VIEWER_STORAGE_KEY,
};
