//! Answer entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// An answer to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: Snowflake,
    pub question_id: Snowflake,
    pub body: String,
    pub author_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub votes: i32,
    pub accepted: bool,
}

impl Answer {
    pub fn new(id: Snowflake, question_id: Snowflake, author_id: Snowflake, body: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            question_id,
            body,
            author_id,
            created_at: now,
            updated_at: now,
            votes: 0,
            accepted: false,
        }
    }

    pub fn apply_vote_delta(&mut self, delta: i32) {
        self.votes += delta;
    }

    /// Display order within a question: accepted first, then votes, then oldest
    pub fn display_order(a: &Answer, b: &Answer) -> std::cmp::Ordering {
        b.accepted
            .cmp(&a.accepted)
            .then_with(|| b.votes.cmp(&a.votes))
            .then_with(|| a.created_at.cmp(&b.created_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn answer(id: i64, votes: i32, accepted: bool, age_minutes: i64) -> Answer {
        let mut a = Answer::new(
            Snowflake::new(id),
            Snowflake::new(100),
            Snowflake::new(200),
            format!("answer {id}"),
        );
        a.votes = votes;
        a.accepted = accepted;
        a.created_at = Utc::now() - Duration::minutes(age_minutes);
        a
    }

    #[test]
    fn test_display_order() {
        let mut answers = vec![
            answer(1, 10, false, 5),
            answer(2, 2, true, 1),
            answer(3, 10, false, 50),
            answer(4, -1, false, 100),
        ];
        answers.sort_by(Answer::display_order);

        let ids: Vec<i64> = answers.iter().map(|a| a.id.into_inner()).collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_vote_delta() {
        let mut a = answer(1, 0, false, 0);
        a.apply_vote_delta(-2);
        assert_eq!(a.votes, -2);
    }
}
