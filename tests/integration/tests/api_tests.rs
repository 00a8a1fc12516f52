//! API Integration Tests
//!
//! Each test starts its own server on a free port with in-memory storage.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, test_config, TestServer,
};
use reqwest::StatusCode;

async fn register(server: &TestServer, name: &str) -> UserResponse {
    let response = server
        .post("/auth/register", &RegisterRequest::named(name))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn login(server: &TestServer, name: &str) {
    let request = LoginRequest::from_register(&RegisterRequest::named(name));
    let response = server.post("/auth/login", &request).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

async fn ask(server: &TestServer, title: &str, tags: &[&str]) -> QuestionResponse {
    let request = CreateQuestionRequest::new(title, "Some details", tags);
    let response = server.post("/questions", &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn answer(server: &TestServer, question_id: &str, body: &str) -> AnswerResponse {
    let response = server
        .post(
            &format!("/questions/{question_id}/answers"),
            &CreateAnswerRequest::new(body),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn feed(server: &TestServer) -> NotificationList {
    let response = server.get("/notifications").await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_register_signs_in() {
    let server = TestServer::start().await.unwrap();

    let me: SessionResponse = assert_json(server.get("/auth/me").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(!me.signed_in);
    assert!(me.user.is_none());

    let user = register(&server, "alice").await;
    assert_eq!(user.name, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.reputation, 0);

    let me: SessionResponse = assert_json(server.get("/auth/me").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(me.signed_in);
    assert_eq!(me.user.unwrap().id, user.id);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;

    let response = server
        .post("/auth/register", &RegisterRequest::named("alice"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_validation() {
    let server = TestServer::start().await.unwrap();

    let mut request = RegisterRequest::named("alice");
    request.email = "not-an-email".to_string();
    let response = server.post("/auth/register", &request).await.unwrap();
    let (code, message) = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
    assert!(message.contains("Invalid email format"));

    let mut request = RegisterRequest::named("bob");
    request.password = "abc".to_string();
    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_logout() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;

    let response = server.post_empty("/auth/logout").await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    // Twice is harmless
    let response = server.post_empty("/auth/logout").await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let request = LoginRequest::from_register(&RegisterRequest::named("alice"));
    let response = server.post("/auth/login", &request).await.unwrap();
    let session: SessionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(session.signed_in);
    assert_eq!(session.user.unwrap().name, "alice");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;
    server.post_empty("/auth/logout").await.unwrap();

    let request = LoginRequest {
        email: "alice@example.com".to_string(),
        password: "wrong-password".to_string(),
    };
    let response = server.post("/auth/login", &request).await.unwrap();
    let (code, _) = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_CREDENTIALS");

    let request = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: "secret123".to_string(),
    };
    let response = server.post("/auth/login", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_viewer_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut config = test_config();
    config.storage.path = Some(path.clone());
    let server = TestServer::start_with_config(config).await.unwrap();
    let user = register(&server, "alice").await;
    drop(server);

    let mut config = test_config();
    config.storage.path = Some(path);
    let server = TestServer::start_with_config(config).await.unwrap();
    let me: SessionResponse = assert_json(server.get("/auth/me").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(me.signed_in);
    assert_eq!(me.user.unwrap().id, user.id);
}

#[tokio::test]
async fn test_demo_account_is_seeded() {
    let mut config = test_config();
    config.forum.seed_demo_data = true;
    let server = TestServer::start_with_config(config.clone()).await.unwrap();

    let request = LoginRequest {
        email: config.forum.demo.email.clone(),
        password: config.forum.demo.password.clone(),
    };
    let response = server.post("/auth/login", &request).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let page: QuestionPage = assert_json(server.get("/questions").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(page.pagination.total_items > 0);
}

// ============================================================================
// Question Tests
// ============================================================================

#[tokio::test]
async fn test_ask_requires_viewer() {
    let server = TestServer::start().await.unwrap();
    let request = CreateQuestionRequest::new("Title", "Body", &["rust"]);
    let response = server.post("/questions", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_ask_validation_messages() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;

    let cases = [
        (CreateQuestionRequest::new("  ", "Body", &["rust"]), "Title is required"),
        (CreateQuestionRequest::new("Title", "", &["rust"]), "Question details are required"),
        (CreateQuestionRequest::new("Title", "Body", &[]), "At least one tag is required"),
        (
            CreateQuestionRequest::new("Title", "Body", &["a", "b", "c", "d", "e", "f"]),
            "At most 5 tags are allowed",
        ),
    ];

    for (request, expected) in cases {
        let response = server.post("/questions", &request).await.unwrap();
        let (code, message) = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(code, "VALIDATION_ERROR");
        assert_eq!(message, expected);
    }
}

#[tokio::test]
async fn test_question_detail() {
    let server = TestServer::start().await.unwrap();
    let alice = register(&server, "alice").await;
    let question = ask(&server, "How do lifetimes work?", &["Rust", "rust", "lifetimes"]).await;

    assert_eq!(question.tags, vec!["rust", "lifetimes"]);
    assert_eq!(question.author.as_ref().unwrap().id, alice.id);
    assert_eq!(question.votes, 0);
    assert_eq!(question.viewer_vote, "none");

    let response = server.get(&format!("/questions/{}", question.id)).await.unwrap();
    let detail: QuestionDetailResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.question.title, "How do lifetimes work?");
    assert_eq!(detail.question.body, "Some details");
    assert!(detail.answers.is_empty());

    let response = server.get("/questions/999").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get("/questions/not-an-id").await.unwrap();
    let (code, _) = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_listing_pagination() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;
    for i in 0..13 {
        ask(&server, &format!("Question {i}"), &["rust"]).await;
    }

    let page: QuestionPage = assert_json(server.get("/questions").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(page.data.len(), 6);
    assert_eq!(page.pagination.page, 1);
    assert_eq!(page.pagination.page_size, 6);
    assert_eq!(page.pagination.total_items, 13);
    assert_eq!(page.pagination.total_pages, 3);
    assert!(page.pagination.has_next);
    // Newest first
    assert_eq!(page.data[0].title, "Question 12");

    let page: QuestionPage =
        assert_json(server.get("/questions?page=3").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(page.data.len(), 1);
    assert!(!page.pagination.has_next);
    assert_eq!(page.data[0].title, "Question 0");

    let page: QuestionPage =
        assert_json(server.get("/questions?page=4").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.pagination.total_items, 13);
}

#[tokio::test]
async fn test_listing_filters_and_sorts() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;
    let tokio_q = ask(&server, "Spawning tasks with tokio", &["rust", "tokio"]).await;
    let css_q = ask(&server, "Centering a div", &["css"]).await;
    ask(&server, "Borrow checker woes", &["rust"]).await;

    answer(&server, &css_q.id, "Use flexbox").await;

    let page: QuestionPage =
        assert_json(server.get("/questions?tags=tokio").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(page.pagination.total_items, 1);
    assert_eq!(page.data[0].id, tokio_q.id);

    // Any listed tag matches
    let page: QuestionPage =
        assert_json(server.get("/questions?tags=css,tokio").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(page.pagination.total_items, 2);

    let page: QuestionPage =
        assert_json(server.get("/questions?q=CENTER").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(page.pagination.total_items, 1);
    assert_eq!(page.data[0].id, css_q.id);

    let page: QuestionPage =
        assert_json(server.get("/questions?sort=answers").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(page.data[0].id, css_q.id);
    assert_eq!(page.data[0].answer_count, 1);

    let response = server.get("/questions?sort=oldest").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_popular_tags() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;
    ask(&server, "One", &["rust", "async"]).await;
    ask(&server, "Two", &["rust"]).await;
    ask(&server, "Three", &["css"]).await;

    let tags: DataResponse<Vec<TagCount>> =
        assert_json(server.get("/tags").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(tags.data[0].tag, "rust");
    assert_eq!(tags.data[0].count, 2);
    assert_eq!(tags.data.len(), 3);

    let tags: DataResponse<Vec<TagCount>> =
        assert_json(server.get("/tags?limit=1").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(tags.data.len(), 1);
}

// ============================================================================
// Vote Tests
// ============================================================================

#[tokio::test]
async fn test_vote_requires_viewer() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;
    let question = ask(&server, "Title", &["rust"]).await;
    server.post_empty("/auth/logout").await.unwrap();

    let response = server
        .post(&format!("/questions/{}/vote", question.id), &VoteRequest::up())
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_vote_toggle_and_flip() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;
    let question = ask(&server, "Title", &["rust"]).await;
    let path = format!("/questions/{}/vote", question.id);

    let vote: VoteResponse = assert_json(
        server.post(&path, &VoteRequest::up()).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!((vote.state.as_str(), vote.count, vote.delta), ("up", 1, 1));

    let vote: VoteResponse = assert_json(
        server.post(&path, &VoteRequest::down()).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!((vote.state.as_str(), vote.count, vote.delta), ("down", -1, -2));

    let vote: VoteResponse = assert_json(
        server.post(&path, &VoteRequest::down()).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!((vote.state.as_str(), vote.count, vote.delta), ("none", 0, 1));
}

#[tokio::test]
async fn test_votes_are_per_viewer() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;
    let question = ask(&server, "Title", &["rust"]).await;
    let path = format!("/questions/{}/vote", question.id);
    server.post(&path, &VoteRequest::up()).await.unwrap();

    register(&server, "bob").await;
    let vote: VoteResponse = assert_json(
        server.post(&path, &VoteRequest::up()).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(vote.count, 2);

    // alice's vote is remembered across sign-ins
    login(&server, "alice").await;
    let detail: QuestionDetailResponse = assert_json(
        server.get(&format!("/questions/{}", question.id)).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(detail.question.votes, 2);
    assert_eq!(detail.question.viewer_vote, "up");
}

#[tokio::test]
async fn test_vote_on_answer() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;
    let question = ask(&server, "Title", &["rust"]).await;
    let reply = answer(&server, &question.id, "An answer").await;

    let vote: VoteResponse = assert_json(
        server
            .post(&format!("/answers/{}/vote", reply.id), &VoteRequest::down())
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(vote.count, -1);

    let response = server
        .post("/answers/12345/vote", &VoteRequest::up())
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Answer and Notification Tests
// ============================================================================

#[tokio::test]
async fn test_answer_notifies_question_author() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;
    let question = ask(&server, "Why is my future not Send?", &["rust"]).await;

    register(&server, "bob").await;
    let reply = answer(&server, &question.id, "Drop the guard before awaiting").await;
    assert_eq!(reply.question_id, question.id);
    assert!(!reply.accepted);
    assert!(feed(&server).await.data.is_empty());

    login(&server, "alice").await;
    let notes = feed(&server).await;
    assert_eq!(notes.unread_count, 1);
    assert_eq!(notes.data[0].kind, "answer_posted");
    assert_eq!(notes.data[0].related_id, question.id);
    assert!(notes.data[0].message.contains("Why is my future not Send?"));
}

#[tokio::test]
async fn test_empty_answer_rejected() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;
    let question = ask(&server, "Title", &["rust"]).await;

    let response = server
        .post(
            &format!("/questions/{}/answers", question.id),
            &CreateAnswerRequest::new(""),
        )
        .await
        .unwrap();
    let (_, message) = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(message.contains("Answer cannot be empty"));
}

#[tokio::test]
async fn test_accept_answer_flow() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;
    let question = ask(&server, "Title", &["rust"]).await;

    register(&server, "bob").await;
    let reply = answer(&server, &question.id, "Answer").await;
    let accept_path = format!("/answers/{}/accept", reply.id);

    let response = server.post_empty(&accept_path).await.unwrap();
    let (code, _) = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_QUESTION_AUTHOR");

    login(&server, "alice").await;
    let accepted: AnswerResponse =
        assert_json(server.post_empty(&accept_path).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert!(accepted.accepted);

    let detail: QuestionDetailResponse = assert_json(
        server.get(&format!("/questions/{}", question.id)).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(detail.question.accepted_answer_id.as_deref(), Some(reply.id.as_str()));

    login(&server, "bob").await;
    let notes = feed(&server).await;
    assert_eq!(notes.data[0].kind, "answer_accepted");
    assert_eq!(notes.data[0].related_id, reply.id);
}

#[tokio::test]
async fn test_mention_of_viewer() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;
    let question = ask(&server, "Title", &["rust"]).await;

    answer(&server, &question.id, "Note to self @alice: check the docs").await;
    let notes = feed(&server).await;
    assert_eq!(notes.data.len(), 1);
    assert_eq!(notes.data[0].kind, "mention");
    assert!(notes.data[0].message.ends_with("..."));
}

#[tokio::test]
async fn test_mark_read() {
    let server = TestServer::start().await.unwrap();
    register(&server, "alice").await;
    let question = ask(&server, "Title", &["rust"]).await;
    register(&server, "bob").await;
    answer(&server, &question.id, "First").await;
    answer(&server, &question.id, "Second").await;

    login(&server, "alice").await;
    let notes = feed(&server).await;
    assert_eq!(notes.unread_count, 2);

    let path = format!("/notifications/{}/read", notes.data[0].id);
    let result: MarkReadResponse =
        assert_json(server.post_empty(&path).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!((result.updated, result.unread_count), (1, 1));

    // Already read
    let result: MarkReadResponse =
        assert_json(server.post_empty(&path).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!((result.updated, result.unread_count), (0, 1));

    let result: MarkReadResponse = assert_json(
        server.post_empty("/notifications/read-all").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!((result.updated, result.unread_count), (1, 0));
    assert!(feed(&server).await.data.iter().all(|n| n.read));

    let response = server.post_empty("/notifications/777/read").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_notifications_require_viewer() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/notifications").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}
