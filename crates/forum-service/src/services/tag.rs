//! Tag service

use std::collections::HashMap;
use tracing::instrument;

use crate::dto::TagCountResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Tags returned when no limit is given
pub const DEFAULT_TAG_LIMIT: usize = 20;

/// Tag service
pub struct TagService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TagService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Tags by question count, most used first, ties by name
    #[instrument(skip(self))]
    pub async fn popular_tags(&self, limit: Option<usize>) -> ServiceResult<Vec<TagCountResponse>> {
        let questions = self.ctx.question_repo().list_all().await?;

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for question in &questions {
            for tag in question.tags.iter() {
                *counts.entry(tag).or_default() += 1;
            }
        }

        let mut tags: Vec<TagCountResponse> = counts
            .into_iter()
            .map(|(tag, count)| TagCountResponse {
                tag: tag.to_string(),
                count,
            })
            .collect();
        tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
        tags.truncate(limit.unwrap_or(DEFAULT_TAG_LIMIT));

        Ok(tags)
    }
}
