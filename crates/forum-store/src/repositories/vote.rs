//! In-memory implementation of VoteRepository

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::instrument;

use forum_core::traits::{RepoResult, VoteRepository};
use forum_core::value_objects::{Snowflake, VoteState, VoteTarget};

/// In-memory implementation of VoteRepository
///
/// Only standing votes are stored; `VoteState::None` removes the entry.
#[derive(Clone, Default)]
pub struct MemVoteRepository {
    votes: Arc<DashMap<(Snowflake, VoteTarget), VoteState>>,
}

impl MemVoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of standing votes across all viewers
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}

#[async_trait]
impl VoteRepository for MemVoteRepository {
    async fn get(&self, voter_id: Snowflake, target: VoteTarget) -> RepoResult<VoteState> {
        Ok(self
            .votes
            .get(&(voter_id, target))
            .map(|r| *r)
            .unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn set(&self, voter_id: Snowflake, target: VoteTarget, state: VoteState) -> RepoResult<()> {
        if state == VoteState::None {
            self.votes.remove(&(voter_id, target));
        } else {
            self.votes.insert((voter_id, target), state);
        }
        Ok(())
    }
}
