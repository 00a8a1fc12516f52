//! Sort keys for the question listing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordering applied to a question listing; every key sorts descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSort {
    /// Most recently created first
    #[default]
    Newest,
    /// Highest vote count first
    Votes,
    /// Most answered first
    Answers,
}

impl QuestionSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Votes => "votes",
            Self::Answers => "answers",
        }
    }
}

impl fmt::Display for QuestionSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" | "recent" => Ok(Self::Newest),
            "votes" => Ok(Self::Votes),
            "answers" => Ok(Self::Answers),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}
