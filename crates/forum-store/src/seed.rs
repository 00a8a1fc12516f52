//! Demo data loaded at startup
//!
//! The question corpus is hardcoded. Every seeded member shares the demo
//! account's password so any of them can be signed into.

use chrono::{Duration, Utc};
use tracing::info;

use forum_common::{hash_password, AppResult, DemoAccountConfig};
use forum_core::entities::{Answer, Question, User, UserRole};
use forum_core::traits::{AnswerRepository, QuestionRepository, UserRepository};
use forum_core::value_objects::{Snowflake, SnowflakeGenerator, TagSet};

/// What `seed_demo_data` inserted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub questions: usize,
    pub answers: usize,
    pub demo_user_id: Option<Snowflake>,
}

struct SeedMember {
    name: &'static str,
    email: &'static str,
    role: UserRole,
    reputation: i32,
}

struct SeedAnswer {
    author: usize,
    body: &'static str,
    votes: i32,
    accepted: bool,
    hours_after: i64,
}

struct SeedQuestion {
    author: usize,
    title: &'static str,
    body: &'static str,
    tags: &'static [&'static str],
    votes: i32,
    views: u32,
    hours_ago: i64,
    answers: &'static [SeedAnswer],
}

// Index 0 is replaced by the configured demo account
const MEMBERS: &[SeedMember] = &[
    SeedMember {
        name: "demo",
        email: "demo@example.com",
        role: UserRole::Member,
        reputation: 42,
    },
    SeedMember {
        name: "alice",
        email: "alice@example.com",
        role: UserRole::Member,
        reputation: 1280,
    },
    SeedMember {
        name: "bob",
        email: "bob@example.com",
        role: UserRole::Member,
        reputation: 315,
    },
    SeedMember {
        name: "carol",
        email: "carol@example.com",
        role: UserRole::Moderator,
        reputation: 4210,
    },
];

const QUESTIONS: &[SeedQuestion] = &[
    SeedQuestion {
        author: 1,
        title: "Why does the borrow checker reject my loop over a Vec?",
        body: "I push into a Vec while iterating over it and get E0502. What is the usual way around this?",
        tags: &["rust", "borrow-checker"],
        votes: 14,
        views: 230,
        hours_ago: 2,
        answers: &[
            SeedAnswer {
                author: 3,
                body: "Collect the new items into a second Vec and extend after the loop, or iterate by index.",
                votes: 9,
                accepted: true,
                hours_after: 1,
            },
            SeedAnswer {
                author: 2,
                body: "You can also use retain or drain depending on what the loop does.",
                votes: 3,
                accepted: false,
                hours_after: 1,
            },
        ],
    },
    SeedQuestion {
        author: 2,
        title: "How do I share state between axum handlers?",
        body: "I need a connection pool in every handler. @demo mentioned State but I cannot get the types right.",
        tags: &["rust", "axum", "async"],
        votes: 8,
        views: 145,
        hours_ago: 5,
        answers: &[SeedAnswer {
            author: 1,
            body: "Put it in a struct that derives Clone, wrap the pool in Arc, and pass it to Router::with_state.",
            votes: 6,
            accepted: false,
            hours_after: 2,
        }],
    },
    SeedQuestion {
        author: 3,
        title: "Difference between tokio::spawn and spawn_blocking",
        body: "When should CPU heavy work go to spawn_blocking instead of a normal task?",
        tags: &["rust", "tokio", "async"],
        votes: 21,
        views: 512,
        hours_ago: 9,
        answers: &[
            SeedAnswer {
                author: 1,
                body: "Anything that can block the thread for more than a few hundred microseconds belongs on spawn_blocking.",
                votes: 17,
                accepted: true,
                hours_after: 1,
            },
            SeedAnswer {
                author: 0,
                body: "Rayon is another option if the work is data parallel.",
                votes: 4,
                accepted: false,
                hours_after: 3,
            },
        ],
    },
    SeedQuestion {
        author: 0,
        title: "Serializing an enum as a plain string with serde",
        body: "My unit enum serializes as an object. How do I get \"up\" instead of {\"Up\":null}?",
        tags: &["rust", "serde"],
        votes: 5,
        views: 88,
        hours_ago: 20,
        answers: &[SeedAnswer {
            author: 2,
            body: "Unit variants already serialize as strings. Add #[serde(rename_all = \"lowercase\")] to get the casing.",
            votes: 5,
            accepted: false,
            hours_after: 4,
        }],
    },
    SeedQuestion {
        author: 1,
        title: "Flexbox item refuses to shrink below its content",
        body: "A long URL inside a flex child pushes the whole layout wider than the viewport.",
        tags: &["css", "flexbox"],
        votes: 3,
        views: 61,
        hours_ago: 30,
        answers: &[],
    },
    SeedQuestion {
        author: 2,
        title: "Postgres index not used for a LIKE query",
        body: "EXPLAIN shows a sequential scan for WHERE name LIKE 'abc%'. The column has a btree index.",
        tags: &["postgres", "sql", "performance"],
        votes: 11,
        views: 301,
        hours_ago: 48,
        answers: &[SeedAnswer {
            author: 3,
            body: "Use text_pattern_ops on the index unless the database collation is C.",
            votes: 12,
            accepted: true,
            hours_after: 5,
        }],
    },
    SeedQuestion {
        author: 3,
        title: "Keeping a React list stable while filtering",
        body: "Items jump around when the filter changes. I sort after filtering with a comparator on votes.",
        tags: &["javascript", "react"],
        votes: 0,
        views: 19,
        hours_ago: 72,
        answers: &[],
    },
    SeedQuestion {
        author: 0,
        title: "What does 'static mean in a trait object bound?",
        body: "Box<dyn Error + 'static> compiles but I do not understand what the lifetime is constraining.",
        tags: &["rust", "lifetimes"],
        votes: 7,
        views: 120,
        hours_ago: 96,
        answers: &[SeedAnswer {
            author: 1,
            body: "It means the concrete type holds no borrowed references shorter than 'static, not that it lives forever.",
            votes: 10,
            accepted: false,
            hours_after: 6,
        }],
    },
];

/// Insert the demo members, questions and answers
///
/// Does nothing if any question is already stored.
///
/// # Errors
/// Returns an error if hashing the demo password or any repository write fails
pub async fn seed_demo_data(
    users: &dyn UserRepository,
    questions: &dyn QuestionRepository,
    answers: &dyn AnswerRepository,
    ids: &SnowflakeGenerator,
    demo: &DemoAccountConfig,
) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();
    if questions.count().await? > 0 {
        return Ok(report);
    }

    let password_hash = hash_password(&demo.password)?;
    let now = Utc::now();

    let mut member_ids = Vec::with_capacity(MEMBERS.len());
    for (index, member) in MEMBERS.iter().enumerate() {
        let (name, email) = if index == 0 {
            (demo.name.clone(), demo.email.clone())
        } else {
            (member.name.to_string(), member.email.to_string())
        };

        if let Some(existing) = users.find_by_email(&email).await? {
            member_ids.push(existing.id);
            continue;
        }

        let mut user = User::new(ids.generate(), name, email);
        user.role = member.role;
        user.reputation = member.reputation;
        user.joined_at = now - Duration::days(30 * (index as i64 + 1));
        users.create(&user, &password_hash).await?;

        member_ids.push(user.id);
        report.users += 1;
    }
    report.demo_user_id = member_ids.first().copied();

    for seed in QUESTIONS {
        let mut question = Question::new(
            ids.generate(),
            member_ids[seed.author],
            seed.title.to_string(),
            seed.body.to_string(),
            seed.tags.iter().collect::<TagSet>(),
        );
        question.votes = seed.votes;
        question.views = seed.views;
        question.created_at = now - Duration::hours(seed.hours_ago);
        question.updated_at = question.created_at;

        for answer_seed in seed.answers {
            let mut answer = Answer::new(
                ids.generate(),
                question.id,
                member_ids[answer_seed.author],
                answer_seed.body.to_string(),
            );
            answer.votes = answer_seed.votes;
            answer.accepted = answer_seed.accepted;
            answer.created_at = question.created_at + Duration::hours(answer_seed.hours_after);
            answer.updated_at = answer.created_at;
            answers.create(&answer).await?;

            question.answer_count += 1;
            if answer.accepted {
                question.accepted_answer_id = Some(answer.id);
            }
            report.answers += 1;
        }

        questions.create(&question).await?;
        report.questions += 1;
    }

    info!(
        users = report.users,
        questions = report.questions,
        answers = report.answers,
        "Seeded demo data"
    );

    Ok(report)
}
