//! Answer service
//!
//! Handles answer submission and acceptance.

use tracing::{debug, info, instrument};
use validator::Validate;

use forum_core::entities::{Answer, NotificationKind};
use forum_core::error::DomainError;
use forum_core::events::{AnswerAcceptedEvent, AnswerPostedEvent, DomainEvent};
use forum_core::value_objects::VoteTarget;
use forum_core::Snowflake;

use crate::dto::{AnswerResponse, AnswerWithDetails, CreateAnswerRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notification::NotificationService;
use super::question::MAX_BODY_CHARS;
use super::vote::VoteService;

/// Answer service
pub struct AnswerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AnswerService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post an answer to `question_id` as the viewer
    #[instrument(skip(self, request))]
    pub async fn submit_answer(
        &self,
        question_id: Snowflake,
        request: CreateAnswerRequest,
    ) -> ServiceResult<AnswerResponse> {
        let viewer = self.ctx.require_viewer()?;
        let request = request.normalized();
        request.validate()?;
        if request.body.chars().count() > MAX_BODY_CHARS {
            return Err(DomainError::ContentTooLong { max: MAX_BODY_CHARS }.into());
        }

        let question = self
            .ctx
            .question_repo()
            .find_by_id(question_id)
            .await?
            .ok_or(DomainError::QuestionNotFound(question_id))?;

        self.ctx.simulate_latency().await;

        let answer = Answer::new(self.ctx.generate_id(), question.id, viewer.id, request.body);
        self.ctx.answer_repo().create(&answer).await?;
        // Incremented in place; `question` above predates the wait
        let question = self.ctx.question_repo().record_answer(question_id).await?;

        info!(
            answer_id = %answer.id,
            question_id = %question_id,
            user_id = %viewer.id,
            "Answer posted"
        );

        let notifications = NotificationService::new(self.ctx);
        notifications
            .dispatch(DomainEvent::AnswerPosted(AnswerPostedEvent::new(
                answer.id,
                question_id,
                question.author_id,
                viewer.id,
                question.title.as_str(),
            )))
            .await;
        notifications
            .process_mentions(&answer.body, answer.id, NotificationKind::Mention)
            .await?;

        answer_response(self.ctx, answer).await
    }

    /// Mark `answer_id` as the accepted answer of its question
    ///
    /// Only the question's author may accept. Any previously accepted answer
    /// is un-accepted; accepting the current one again changes nothing.
    #[instrument(skip(self))]
    pub async fn accept_answer(&self, answer_id: Snowflake) -> ServiceResult<AnswerResponse> {
        let viewer = self.ctx.require_viewer()?;

        let answer = self
            .ctx
            .answer_repo()
            .find_by_id(answer_id)
            .await?
            .ok_or(DomainError::AnswerNotFound(answer_id))?;
        let question = self
            .ctx
            .question_repo()
            .find_by_id(answer.question_id)
            .await?
            .ok_or(DomainError::QuestionNotFound(answer.question_id))?;

        if question.author_id != viewer.id {
            return Err(DomainError::NotQuestionAuthor.into());
        }

        self.ctx.simulate_latency().await;

        let changed = {
            let _guard = self.ctx.accept_lock().lock().await;
            let changed = self.ctx.answer_repo().mark_accepted(answer_id).await?;
            if changed {
                self.ctx
                    .question_repo()
                    .set_accepted_answer(question.id, answer_id)
                    .await?;
            }
            changed
        };

        let answer = self
            .ctx
            .answer_repo()
            .find_by_id(answer_id)
            .await?
            .ok_or(DomainError::AnswerNotFound(answer_id))?;

        if !changed {
            debug!(answer_id = %answer_id, "Answer already accepted");
            return answer_response(self.ctx, answer).await;
        }

        info!(
            answer_id = %answer.id,
            question_id = %question.id,
            user_id = %viewer.id,
            "Answer accepted"
        );

        NotificationService::new(self.ctx)
            .dispatch(DomainEvent::AnswerAccepted(AnswerAcceptedEvent::new(
                answer.id,
                question.id,
                answer.author_id,
                viewer.id,
                question.title.as_str(),
            )))
            .await;

        answer_response(self.ctx, answer).await
    }
}

/// Answer with its author and the viewer's vote
pub(crate) async fn answer_response(
    ctx: &ServiceContext,
    answer: Answer,
) -> ServiceResult<AnswerResponse> {
    let author = ctx.user_repo().find_by_id(answer.author_id).await?;
    let viewer_vote = VoteService::new(ctx)
        .viewer_vote(VoteTarget::Answer(answer.id))
        .await?;

    Ok(AnswerResponse::from(AnswerWithDetails {
        answer,
        author,
        viewer_vote,
    }))
}
