//! Question listing: filter, stable sort, fixed-size pages

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::entities::Question;
use crate::value_objects::{QuestionSort, TagSet};

/// Questions per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// What the viewer asked the listing for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// Case-insensitive substring matched against title or body
    pub text: String,
    /// Any-of tag filter; empty means no filter
    pub tags: TagSet,
    pub sort: QuestionSort,
    /// 1-based
    pub page: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            tags: TagSet::new(),
            sort: QuestionSort::default(),
            page: 1,
        }
    }
}

impl ListingQuery {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_sort(mut self, sort: QuestionSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            has_next: self.has_next,
        }
    }
}

fn compare(sort: QuestionSort, a: &Question, b: &Question) -> Ordering {
    match sort {
        QuestionSort::Newest => b.created_at.cmp(&a.created_at),
        QuestionSort::Votes => b.votes.cmp(&a.votes),
        QuestionSort::Answers => b.answer_count.cmp(&a.answer_count),
    }
}

/// Filter by text and tags, then sort by the key
///
/// `sort_by` is stable, so ties keep their position in `questions`.
pub fn filter_and_sort<'a>(questions: &'a [Question], query: &ListingQuery) -> Vec<&'a Question> {
    let mut matched: Vec<&Question> = questions
        .iter()
        .filter(|q| q.matches_text(&query.text) && q.matches_tags(&query.tags))
        .collect();
    matched.sort_by(|a, b| compare(query.sort, a, b));
    matched
}

/// Run the full pipeline and cut out the requested page
///
/// Page 0 and pages past the end come back empty with the totals intact.
/// A `page_size` of zero is treated as one.
pub fn list_questions(questions: &[Question], query: &ListingQuery, page_size: usize) -> Page<Question> {
    let page_size = page_size.max(1);
    let matched = filter_and_sort(questions, query);
    let total_items = matched.len();
    let total_pages = total_items.div_ceil(page_size);

    let items = if query.page == 0 {
        Vec::new()
    } else {
        matched
            .into_iter()
            .skip((query.page - 1).saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect()
    };

    Page {
        items,
        page: query.page,
        page_size,
        total_items,
        total_pages,
        has_next: query.page < total_pages,
    }
}
