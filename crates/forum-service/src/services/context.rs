//! Service context - dependency container for services
//!
//! Holds all repositories, the session, and the other dependencies needed by services.

use std::sync::Arc;

use forum_common::ForumConfig;
use forum_core::entities::User;
use forum_core::traits::{
    AnswerRepository, LocalStorage, NotificationRepository, QuestionRepository, UserRepository,
    VoteRepository,
};
use forum_core::{Snowflake, SnowflakeGenerator};
use forum_store::{
    MemAnswerRepository, MemNotificationRepository, MemQuestionRepository, MemUserRepository,
    MemVoteRepository, MemoryLocalStorage,
};

use super::error::{ServiceError, ServiceResult};
use super::session::Session;

/// Service context containing all dependencies
///
/// This is the dependency container passed to all services. It provides:
/// - Repositories
/// - The viewer session
/// - Snowflake generator for ID generation
/// - Forum settings (page size, simulated latency)
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    question_repo: Arc<dyn QuestionRepository>,
    answer_repo: Arc<dyn AnswerRepository>,
    vote_repo: Arc<dyn VoteRepository>,
    notification_repo: Arc<dyn NotificationRepository>,

    // Session
    session: Arc<Session>,

    // Serializes vote read-modify-write cycles
    vote_lock: Arc<tokio::sync::Mutex<()>>,
    // Keeps an answer's accepted flag and its question's pointer in step
    accept_lock: Arc<tokio::sync::Mutex<()>>,

    snowflake_generator: Arc<SnowflakeGenerator>,
    config: Arc<ForumConfig>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        question_repo: Arc<dyn QuestionRepository>,
        answer_repo: Arc<dyn AnswerRepository>,
        vote_repo: Arc<dyn VoteRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        session: Arc<Session>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        config: ForumConfig,
    ) -> Self {
        Self {
            user_repo,
            question_repo,
            answer_repo,
            vote_repo,
            notification_repo,
            session,
            vote_lock: Arc::new(tokio::sync::Mutex::new(())),
            accept_lock: Arc::new(tokio::sync::Mutex::new(())),
            snowflake_generator,
            config: Arc::new(config),
        }
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn question_repo(&self) -> &dyn QuestionRepository {
        self.question_repo.as_ref()
    }

    pub fn answer_repo(&self) -> &dyn AnswerRepository {
        self.answer_repo.as_ref()
    }

    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    // === Session ===

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The signed-in viewer, if any
    pub fn viewer(&self) -> Option<User> {
        self.session.current_viewer()
    }

    /// The signed-in viewer, or `MissingAuth`
    pub fn require_viewer(&self) -> ServiceResult<User> {
        self.viewer().ok_or_else(ServiceError::unauthenticated)
    }

    pub(crate) fn vote_lock(&self) -> &tokio::sync::Mutex<()> {
        &self.vote_lock
    }

    pub(crate) fn accept_lock(&self) -> &tokio::sync::Mutex<()> {
        &self.accept_lock
    }

    // === Settings ===

    pub fn config(&self) -> &ForumConfig {
        &self.config
    }

    /// Wait out the configured artificial delay
    pub async fn simulate_latency(&self) {
        let delay = self.config.simulated_latency();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    // === Services ===

    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("session", &self.session)
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// Any repository left unset falls back to the in-memory implementation.
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    question_repo: Option<Arc<dyn QuestionRepository>>,
    answer_repo: Option<Arc<dyn AnswerRepository>>,
    vote_repo: Option<Arc<dyn VoteRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    storage: Option<Arc<dyn LocalStorage>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    config: Option<ForumConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn question_repo(mut self, repo: Arc<dyn QuestionRepository>) -> Self {
        self.question_repo = Some(repo);
        self
    }

    pub fn answer_repo(mut self, repo: Arc<dyn AnswerRepository>) -> Self {
        self.answer_repo = Some(repo);
        self
    }

    pub fn vote_repo(mut self, repo: Arc<dyn VoteRepository>) -> Self {
        self.vote_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn storage(mut self, storage: Arc<dyn LocalStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn config(mut self, config: ForumConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the configuration is unusable
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let config = self.config.unwrap_or_default();
        if config.page_size == 0 {
            return Err(ServiceError::validation("page_size must be positive"));
        }
        if config.notification_cap == 0 {
            return Err(ServiceError::validation("notification_cap must be positive"));
        }

        let notification_repo = self.notification_repo.unwrap_or_else(|| {
            Arc::new(MemNotificationRepository::with_capacity(config.notification_cap))
        });
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryLocalStorage::new()));

        Ok(ServiceContext::new(
            self.user_repo
                .unwrap_or_else(|| Arc::new(MemUserRepository::new())),
            self.question_repo
                .unwrap_or_else(|| Arc::new(MemQuestionRepository::new())),
            self.answer_repo
                .unwrap_or_else(|| Arc::new(MemAnswerRepository::new())),
            self.vote_repo
                .unwrap_or_else(|| Arc::new(MemVoteRepository::new())),
            notification_repo,
            Arc::new(Session::new(storage)),
            self.snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::default())),
            config,
        ))
    }
}
