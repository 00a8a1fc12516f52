//! In-memory implementation of AnswerRepository

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::instrument;

use forum_core::entities::Answer;
use forum_core::error::DomainError;
use forum_core::traits::{AnswerRepository, RepoResult};
use forum_core::value_objects::Snowflake;

/// In-memory implementation of AnswerRepository
#[derive(Clone, Default)]
pub struct MemAnswerRepository {
    answers: Arc<RwLock<Vec<Answer>>>,
}

impl MemAnswerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnswerRepository for MemAnswerRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Answer>> {
        Ok(self.answers.read().iter().find(|a| a.id == id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_question(&self, question_id: Snowflake) -> RepoResult<Vec<Answer>> {
        Ok(self
            .answers
            .read()
            .iter()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect())
    }

    #[instrument(skip(self, answer), fields(answer_id = %answer.id))]
    async fn create(&self, answer: &Answer) -> RepoResult<()> {
        let mut answers = self.answers.write();
        if answers.iter().any(|a| a.id == answer.id) {
            return Err(DomainError::InternalError(format!(
                "duplicate answer id {}",
                answer.id
            )));
        }
        answers.push(answer.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_accepted(&self, id: Snowflake) -> RepoResult<bool> {
        let mut answers = self.answers.write();
        let question_id = answers
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.question_id)
            .ok_or(DomainError::AnswerNotFound(id))?;

        let now = Utc::now();
        let mut changed = false;
        for answer in answers.iter_mut().filter(|a| a.question_id == question_id) {
            let accepted = answer.id == id;
            if answer.accepted != accepted {
                answer.accepted = accepted;
                answer.updated_at = now;
                changed = true;
            }
        }
        Ok(changed)
    }

    #[instrument(skip(self))]
    async fn adjust_votes(&self, id: Snowflake, delta: i32) -> RepoResult<i32> {
        let mut answers = self.answers.write();
        let answer = answers
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(DomainError::AnswerNotFound(id))?;
        answer.apply_vote_delta(delta);
        Ok(answer.votes)
    }
}
