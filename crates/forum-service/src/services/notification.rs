//! Notification service
//!
//! Turns mentions and domain events into entries in a member's bounded feed,
//! and lets the viewer read and clear their own feed.

use tracing::{debug, info, instrument, warn};

use forum_core::entities::{NewNotification, Notification, NotificationKind};
use forum_core::error::DomainError;
use forum_core::events::{DomainEvent, NotificationCreatedEvent};
use forum_core::pipeline::{excerpt, mentions_of, EXCERPT_CHARS};
use forum_core::Snowflake;

use crate::dto::{MarkReadResponse, NotificationListResponse, NotificationResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Notify the viewer once per `@name` token in `text` that names them
    ///
    /// Returns how many notifications were delivered. Nothing happens when
    /// no viewer is signed in.
    #[instrument(skip(self, text))]
    pub async fn process_mentions(
        &self,
        text: &str,
        related_id: Snowflake,
        kind: NotificationKind,
    ) -> ServiceResult<usize> {
        let Some(viewer) = self.ctx.viewer() else {
            return Ok(0);
        };

        let hits = mentions_of(text, &viewer.name);
        for _ in 0..hits {
            let content = NewNotification::new(kind, excerpt(text, EXCERPT_CHARS), related_id);
            self.deliver(viewer.id, content).await?;
        }

        if hits > 0 {
            debug!(user_id = %viewer.id, hits, "Mentions delivered");
        }
        Ok(hits)
    }

    /// Push a notification to the front of `recipient_id`'s feed
    #[instrument(skip(self, content), fields(kind = content.kind.as_str()))]
    pub async fn deliver(
        &self,
        recipient_id: Snowflake,
        content: NewNotification,
    ) -> ServiceResult<Notification> {
        let notification = content.into_notification(self.ctx.generate_id(), recipient_id);

        if let Some(evicted) = self
            .ctx
            .notification_repo()
            .push(notification.clone())
            .await?
        {
            debug!(evicted_id = %evicted.id, "Feed full, dropped oldest notification");
        }

        let event = DomainEvent::NotificationCreated(NotificationCreatedEvent::new(
            notification.id,
            recipient_id,
        ));
        debug!(event = event.event_type(), notification_id = %notification.id, "Notification delivered");

        Ok(notification)
    }

    /// React to a domain event, returning the notification it produced
    #[instrument(skip(self, event), fields(event = event.event_type()))]
    pub async fn handle_event(&self, event: &DomainEvent) -> ServiceResult<Option<Notification>> {
        let (recipient_id, content) = match event {
            DomainEvent::AnswerPosted(e) => {
                if e.question_author_id == e.author_id {
                    return Ok(None);
                }
                (
                    e.question_author_id,
                    NewNotification::new(
                        NotificationKind::AnswerPosted,
                        format!("New answer on \"{}\"", e.question_title),
                        e.question_id,
                    ),
                )
            }
            DomainEvent::AnswerAccepted(e) => {
                if e.answer_author_id == e.accepted_by {
                    return Ok(None);
                }
                (
                    e.answer_author_id,
                    NewNotification::new(
                        NotificationKind::AnswerAccepted,
                        format!("Your answer on \"{}\" was accepted", e.question_title),
                        e.answer_id,
                    ),
                )
            }
            DomainEvent::QuestionCreated(_)
            | DomainEvent::VoteCast(_)
            | DomainEvent::NotificationCreated(_) => return Ok(None),
        };

        self.deliver(recipient_id, content).await.map(Some)
    }

    /// Run `handle_event`, logging instead of failing the caller
    pub(crate) async fn dispatch(&self, event: DomainEvent) {
        if let Err(e) = self.handle_event(&event).await {
            warn!(event = event.event_type(), error = %e, "Failed to deliver event notification");
        }
    }

    /// The viewer's feed, newest first
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<NotificationListResponse> {
        let viewer = self.ctx.require_viewer()?;
        let feed = self.ctx.notification_repo().feed(viewer.id).await?;

        Ok(NotificationListResponse {
            data: feed.iter().map(NotificationResponse::from).collect(),
            unread_count: feed.unread_count(),
        })
    }

    /// Mark one of the viewer's notifications read
    #[instrument(skip(self))]
    pub async fn mark_as_read(&self, notification_id: Snowflake) -> ServiceResult<MarkReadResponse> {
        let viewer = self.ctx.require_viewer()?;
        let repo = self.ctx.notification_repo();

        let Some(flipped) = repo.mark_as_read(viewer.id, notification_id).await? else {
            return Err(DomainError::NotificationNotFound(notification_id).into());
        };
        let unread_count = repo.feed(viewer.id).await?.unread_count();

        Ok(MarkReadResponse {
            updated: usize::from(flipped),
            unread_count,
        })
    }

    /// Mark the viewer's whole feed read
    #[instrument(skip(self))]
    pub async fn mark_all_as_read(&self) -> ServiceResult<MarkReadResponse> {
        let viewer = self.ctx.require_viewer()?;
        let repo = self.ctx.notification_repo();
        let updated = repo.mark_all_as_read(viewer.id).await?;
        // Entries pushed since the mutation stay unread
        let unread_count = repo.feed(viewer.id).await?.unread_count();

        info!(user_id = %viewer.id, updated, unread_count, "Notifications marked read");
        Ok(MarkReadResponse {
            updated,
            unread_count,
        })
    }
}
