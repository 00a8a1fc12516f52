//! In-memory implementation of QuestionRepository

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::instrument;

use forum_core::entities::Question;
use forum_core::error::DomainError;
use forum_core::traits::{QuestionRepository, RepoResult};
use forum_core::value_objects::Snowflake;

/// In-memory implementation of QuestionRepository
///
/// Questions are kept in insertion order; the listing pipeline relies on it
/// to break sort ties.
#[derive(Clone, Default)]
pub struct MemQuestionRepository {
    questions: Arc<RwLock<Vec<Question>>>,
}

impl MemQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionRepository for MemQuestionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Question>> {
        Ok(self.questions.read().iter().find(|q| q.id == id).cloned())
    }

    async fn list_all(&self) -> RepoResult<Vec<Question>> {
        Ok(self.questions.read().clone())
    }

    #[instrument(skip(self, question), fields(question_id = %question.id))]
    async fn create(&self, question: &Question) -> RepoResult<()> {
        let mut questions = self.questions.write();
        if questions.iter().any(|q| q.id == question.id) {
            return Err(DomainError::InternalError(format!(
                "duplicate question id {}",
                question.id
            )));
        }
        questions.push(question.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_answer(&self, id: Snowflake) -> RepoResult<Question> {
        let mut questions = self.questions.write();
        let question = questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(DomainError::QuestionNotFound(id))?;
        question.record_answer();
        Ok(question.clone())
    }

    #[instrument(skip(self))]
    async fn set_accepted_answer(&self, id: Snowflake, answer_id: Snowflake) -> RepoResult<Question> {
        let mut questions = self.questions.write();
        let question = questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(DomainError::QuestionNotFound(id))?;
        question.accepted_answer_id = Some(answer_id);
        question.updated_at = Utc::now();
        Ok(question.clone())
    }

    #[instrument(skip(self))]
    async fn adjust_votes(&self, id: Snowflake, delta: i32) -> RepoResult<i32> {
        let mut questions = self.questions.write();
        let question = questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(DomainError::QuestionNotFound(id))?;
        question.apply_vote_delta(delta);
        Ok(question.votes)
    }

    async fn count(&self) -> RepoResult<usize> {
        Ok(self.questions.read().len())
    }
}
