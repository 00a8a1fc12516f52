//! Question service
//!
//! Handles the question listing, the question page and question submission.

use tracing::{info, instrument};
use validator::Validate;

use forum_core::entities::{Answer, NotificationKind, Question};
use forum_core::error::DomainError;
use forum_core::events::{DomainEvent, QuestionCreatedEvent};
use forum_core::pipeline::{list_questions, ListingQuery, Page};
use forum_core::value_objects::{TagSet, VoteState, VoteTarget, MAX_TAGS, MAX_TAG_LENGTH};
use forum_core::Snowflake;

use crate::dto::{
    CreateQuestionRequest, PageResponse, QuestionDetailResponse, QuestionResponse,
    QuestionWithDetails,
};

use super::answer::answer_response;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;
use super::vote::VoteService;

/// Longest accepted question or answer body, in characters
pub const MAX_BODY_CHARS: usize = 30_000;

/// Question service
pub struct QuestionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> QuestionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// One page of the filtered and sorted listing
    #[instrument(skip(self))]
    pub async fn list_questions(
        &self,
        query: &ListingQuery,
    ) -> ServiceResult<PageResponse<QuestionResponse>> {
        let all = self.ctx.question_repo().list_all().await?;
        let Page {
            items,
            page,
            page_size,
            total_items,
            total_pages,
            has_next,
        } = list_questions(&all, query, self.ctx.config().page_size);

        let mut data = Vec::with_capacity(items.len());
        for question in items {
            data.push(self.to_response(question).await?);
        }

        Ok(PageResponse::from(Page {
            items: data,
            page,
            page_size,
            total_items,
            total_pages,
            has_next,
        }))
    }

    /// A question with its answers in display order
    #[instrument(skip(self))]
    pub async fn get_question(&self, question_id: Snowflake) -> ServiceResult<QuestionDetailResponse> {
        let question = self
            .ctx
            .question_repo()
            .find_by_id(question_id)
            .await?
            .ok_or(DomainError::QuestionNotFound(question_id))?;

        let mut answers = self.ctx.answer_repo().find_by_question(question_id).await?;
        answers.sort_by(Answer::display_order);

        let mut answer_responses = Vec::with_capacity(answers.len());
        for answer in answers {
            answer_responses.push(answer_response(self.ctx, answer).await?);
        }

        Ok(QuestionDetailResponse {
            question: self.to_response(question).await?,
            answers: answer_responses,
        })
    }

    /// Post a new question as the viewer
    #[instrument(skip(self, request))]
    pub async fn submit_question(
        &self,
        request: CreateQuestionRequest,
    ) -> ServiceResult<QuestionResponse> {
        let viewer = self.ctx.require_viewer()?;
        let request = request.normalized();
        let tags = check_question(&request)?;

        self.ctx.simulate_latency().await;

        let question = Question::new(
            self.ctx.generate_id(),
            viewer.id,
            request.title,
            request.body,
            tags,
        );
        self.ctx.question_repo().create(&question).await?;

        let event = DomainEvent::QuestionCreated(QuestionCreatedEvent::new(question.id, viewer.id));
        info!(
            event = event.event_type(),
            question_id = %question.id,
            user_id = %viewer.id,
            tags = question.tags.len(),
            "Question created"
        );

        let notifications = NotificationService::new(self.ctx);
        notifications.dispatch(event).await;
        notifications
            .process_mentions(&question.body, question.id, NotificationKind::Mention)
            .await?;

        Ok(QuestionResponse::from(QuestionWithDetails {
            question,
            author: Some(viewer),
            viewer_vote: VoteState::None,
        }))
    }

    async fn to_response(&self, question: Question) -> ServiceResult<QuestionResponse> {
        let author = self.ctx.user_repo().find_by_id(question.author_id).await?;
        let viewer_vote = VoteService::new(self.ctx)
            .viewer_vote(VoteTarget::Question(question.id))
            .await?;

        Ok(QuestionResponse::from(QuestionWithDetails {
            question,
            author,
            viewer_vote,
        }))
    }
}

/// Ordered field checks; the first failure wins
fn check_question(request: &CreateQuestionRequest) -> ServiceResult<TagSet> {
    if request.title.is_empty() {
        return Err(ServiceError::validation("Title is required"));
    }
    if request.body.is_empty() {
        return Err(ServiceError::validation("Question details are required"));
    }

    let tags: TagSet = request.tags.iter().collect();
    if tags.is_empty() {
        return Err(ServiceError::validation("At least one tag is required"));
    }
    if tags.len() > MAX_TAGS {
        return Err(ServiceError::validation(format!(
            "At most {MAX_TAGS} tags are allowed"
        )));
    }
    if tags.iter().any(|t| t.chars().count() > MAX_TAG_LENGTH) {
        return Err(ServiceError::validation(format!(
            "Tags must be at most {MAX_TAG_LENGTH} characters"
        )));
    }

    request.validate()?;
    if request.body.chars().count() > MAX_BODY_CHARS {
        return Err(DomainError::ContentTooLong { max: MAX_BODY_CHARS }.into());
    }

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::RegisterRequest;
    use crate::services::{ServiceContextBuilder, SessionService};
    use forum_common::ForumConfig;
    use forum_core::QuestionSort;

    fn context() -> ServiceContext {
        ServiceContextBuilder::new()
            .config(ForumConfig::for_tests())
            .build()
            .unwrap()
    }

    async fn sign_in(ctx: &ServiceContext, name: &str) {
        SessionService::new(ctx)
            .register(RegisterRequest {
                name: name.to_string(),
                email: format!("{name}@example.com"),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_submit_requires_viewer() {
        let ctx = context();
        let err = QuestionService::new(&ctx)
            .submit_question(CreateQuestionRequest::new("Title", "Body", &["rust"]))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_submit_validation_order() {
        let ctx = context();
        sign_in(&ctx, "alice").await;
        let service = QuestionService::new(&ctx);

        let cases = [
            (CreateQuestionRequest::new("", "", &[]), "Title is required"),
            (CreateQuestionRequest::new("   ", "Body", &["rust"]), "Title is required"),
            (CreateQuestionRequest::new("Title", " ", &[]), "Question details are required"),
            (CreateQuestionRequest::new("Title", "Body", &[" ", ""]), "At least one tag is required"),
            (
                CreateQuestionRequest::new("Title", "Body", &["a", "b", "c", "d", "e", "f"]),
                "At most 5 tags are allowed",
            ),
        ];

        for (request, message) in cases {
            let err = service.submit_question(request).await.unwrap_err();
            assert_eq!(err.status_code(), 400);
            assert_eq!(err.to_string(), message);
        }

        let long_title = "x".repeat(151);
        let err = service
            .submit_question(CreateQuestionRequest::new(long_title, "Body", &["rust"]))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);

        // Nothing was stored
        assert_eq!(ctx.question_repo().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_submit_normalizes() {
        let ctx = context();
        sign_in(&ctx, "alice").await;

        let created = QuestionService::new(&ctx)
            .submit_question(CreateQuestionRequest::new(
                "  Lifetimes? ",
                " Why? ",
                &["Rust", "rust", "Lifetimes"],
            ))
            .await
            .unwrap();

        assert_eq!(created.title, "Lifetimes?");
        assert_eq!(created.body, "Why?");
        assert_eq!(created.tags, vec!["rust", "lifetimes"]);
        assert_eq!(created.author.unwrap().name, "alice");
        assert_eq!(created.votes, 0);
        assert_eq!(created.answer_count, 0);
    }

    #[tokio::test]
    async fn test_self_mention_notifies_viewer() {
        let ctx = context();
        sign_in(&ctx, "alice").await;

        QuestionService::new(&ctx)
            .submit_question(CreateQuestionRequest::new(
                "Note to self",
                "@alice remember to check this",
                &["meta"],
            ))
            .await
            .unwrap();

        let list = NotificationService::new(&ctx).list().await.unwrap();
        assert_eq!(list.unread_count, 1);
        assert_eq!(list.data[0].kind, NotificationKind::Mention);
    }

    #[tokio::test]
    async fn test_list_questions_pages() {
        let ctx = context();
        sign_in(&ctx, "alice").await;
        let service = QuestionService::new(&ctx);

        for i in 0..13 {
            let tag = if i % 2 == 0 { "even" } else { "odd" };
            service
                .submit_question(CreateQuestionRequest::new(format!("Question {i}"), "Body", &[tag]))
                .await
                .unwrap();
        }

        let page_size = ctx.config().page_size;
        let first = service.list_questions(&ListingQuery::default()).await.unwrap();
        assert_eq!(first.pagination.total_items, 13);
        assert_eq!(first.pagination.total_pages, 13_usize.div_ceil(page_size));
        assert_eq!(first.data.len(), page_size.min(13));
        assert_eq!(first.data[0].viewer_vote, VoteState::None);

        let odd = service
            .list_questions(&ListingQuery::default().with_tags(["odd"].iter().collect()))
            .await
            .unwrap();
        assert_eq!(odd.pagination.total_items, 6);

        let past_end = service
            .list_questions(&ListingQuery::default().with_page(99))
            .await
            .unwrap();
        assert!(past_end.data.is_empty());
        assert!(!past_end.pagination.has_next);
    }

    #[tokio::test]
    async fn test_list_sorted_by_votes() {
        let ctx = context();
        sign_in(&ctx, "alice").await;
        let service = QuestionService::new(&ctx);

        let low = service
            .submit_question(CreateQuestionRequest::new("Low", "Body", &["rust"]))
            .await
            .unwrap();
        let high = service
            .submit_question(CreateQuestionRequest::new("High", "Body", &["rust"]))
            .await
            .unwrap();
        ctx.question_repo().adjust_votes(high.id, 4).await.unwrap();

        let page = service
            .list_questions(&ListingQuery::default().with_sort(QuestionSort::Votes))
            .await
            .unwrap();
        let ids: Vec<_> = page.data.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![high.id, low.id]);
    }

    #[tokio::test]
    async fn test_get_unknown_question() {
        let ctx = context();
        let err = QuestionService::new(&ctx)
            .get_question(Snowflake::new(404))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "UNKNOWN_QUESTION");
    }
}
