//! Vote service
//!
//! Applies the viewer's up/down input to a question or answer. The viewer's
//! standing vote lives in the vote repository and every delta is written
//! back to the target's stored count, so a reload observes the same tally.

use tracing::{debug, info, instrument};

use forum_core::error::DomainError;
use forum_core::events::{DomainEvent, VoteCastEvent};
use forum_core::value_objects::{VoteDirection, VoteState, VoteTally, VoteTarget, VoteTransition};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Result of a single vote input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    pub target: VoteTarget,
    /// Viewer's new state and the target's new count
    pub tally: VoteTally,
    pub transition: VoteTransition,
}

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply one vote input for the current viewer
    ///
    /// Returns `Ok(None)` without touching anything when no viewer is
    /// signed in.
    #[instrument(skip(self))]
    pub async fn apply_vote(
        &self,
        target: VoteTarget,
        direction: VoteDirection,
    ) -> ServiceResult<Option<VoteOutcome>> {
        let Some(viewer) = self.ctx.viewer() else {
            debug!("Vote ignored: no viewer");
            return Ok(None);
        };

        let _guard = self.ctx.vote_lock().lock().await;

        let stored = self.stored_count(target).await?;
        let current = self.ctx.vote_repo().get(viewer.id, target).await?;
        let (_, transition) = VoteTally::with_state(current, stored).apply(direction);

        self.ctx
            .vote_repo()
            .set(viewer.id, target, transition.next)
            .await?;
        let count = match target {
            VoteTarget::Question(id) => {
                self.ctx
                    .question_repo()
                    .adjust_votes(id, transition.delta)
                    .await?
            }
            VoteTarget::Answer(id) => {
                self.ctx
                    .answer_repo()
                    .adjust_votes(id, transition.delta)
                    .await?
            }
        };

        let event = DomainEvent::VoteCast(VoteCastEvent::new(
            target,
            viewer.id,
            transition.next,
            transition.delta,
        ));
        info!(
            event = event.event_type(),
            target = %target,
            user_id = %viewer.id,
            state = %transition.next,
            delta = transition.delta,
            count,
            "Vote applied"
        );

        Ok(Some(VoteOutcome {
            target,
            tally: VoteTally::with_state(transition.next, count),
            transition,
        }))
    }

    /// Current tally of `target` as the viewer sees it
    #[instrument(skip(self))]
    pub async fn tally(&self, target: VoteTarget) -> ServiceResult<VoteTally> {
        let count = self.stored_count(target).await?;
        let state = self.viewer_vote(target).await?;
        Ok(VoteTally::with_state(state, count))
    }

    /// The viewer's standing vote on `target`; `None` when signed out
    pub async fn viewer_vote(&self, target: VoteTarget) -> ServiceResult<VoteState> {
        match self.ctx.viewer() {
            Some(viewer) => Ok(self.ctx.vote_repo().get(viewer.id, target).await?),
            None => Ok(VoteState::None),
        }
    }

    async fn stored_count(&self, target: VoteTarget) -> ServiceResult<i32> {
        let count = match target {
            VoteTarget::Question(id) => self
                .ctx
                .question_repo()
                .find_by_id(id)
                .await?
                .ok_or(DomainError::QuestionNotFound(id))?
                .votes,
            VoteTarget::Answer(id) => self
                .ctx
                .answer_repo()
                .find_by_id(id)
                .await?
                .ok_or(DomainError::AnswerNotFound(id))?
                .votes,
        };
        Ok(count)
    }
}
