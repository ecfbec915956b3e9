use codequiz_client::config::ApiConfig;
use codequiz_client::domain::{AnswerLetter, Difficulty, Language};
use codequiz_client::stub::StubState;
use codequiz_client::{HttpQuizApi, QuizApi, QuizError};
use serde_json::json;

mod common;

#[tokio::test]
async fn start_returns_first_of_five_questions() {
    let backend = common::spawn_backend(StubState::new()).await;
    let api = backend.api();

    let session = api.start_session(Language::Javascript, Difficulty::Intermediate).await.unwrap();
    assert_eq!(session.total_questions, 5);
    assert_eq!(session.score, 0);
    assert_eq!(session.language, Language::Javascript);
    assert_eq!(session.language_display_name, "JavaScript");
    assert_eq!(session.current_question.question_number, 1);
    let letters: Vec<_> = session.current_question.options.iter().map(|o| o.letter).collect();
    assert_eq!(letters, AnswerLetter::ALL.to_vec());
    assert_eq!(backend.state.session_count().await, 1);
}

#[tokio::test]
async fn empty_question_bank_leaves_no_session_behind() {
    let backend = common::spawn_backend(StubState::new().with_bank(Vec::new())).await;
    let err = backend.api().start_session(Language::Python, Difficulty::Beginner).await.unwrap_err();
    assert_eq!(err, QuizError::Backend("No questions available for this language".into()));
    assert_eq!(backend.state.session_count().await, 0);
}

#[tokio::test]
async fn answer_for_unknown_session_is_a_backend_error() {
    let backend = common::spawn_backend(StubState::new()).await;
    let err = backend.api().submit_answer("missing", AnswerLetter::A).await.unwrap_err();
    assert_eq!(err, QuizError::Backend("Quiz session not found or expired".into()));
}

#[tokio::test]
async fn status_and_extend_follow_the_session() {
    let backend = common::spawn_backend(StubState::new().with_questions_per_session(2)).await;
    let api = backend.api();
    let session = api.start_session(Language::Ruby, Difficulty::Advanced).await.unwrap();

    let fb = api.submit_answer(&session.session_id, AnswerLetter::D).await.unwrap();
    assert!(fb.has_next_question());
    assert_eq!(fb.next_question().map(|q| q.question_number), Some(2));

    let status = api.session_status(&session.session_id).await.unwrap();
    assert_eq!(status.current_question_number, 2);
    assert_eq!(status.total_questions, 2);
    assert_eq!(status.score, fb.current_score);
    assert!(!status.is_complete);

    api.extend_session(&session.session_id).await.unwrap();
    let err = api.extend_session("missing").await.unwrap_err();
    assert!(matches!(err, QuizError::Backend(_)));
}

#[tokio::test]
async fn outage_without_envelope_is_a_transport_error() {
    let backend = common::spawn_backend(StubState::new()).await;
    backend.state.set_unavailable(true);

    let err = backend.api().start_session(Language::Go, Difficulty::Beginner).await.unwrap_err();
    assert_eq!(err, QuizError::Transport("The quiz service is temporarily unavailable.".into()));
    assert!(backend.api().health().await.is_err());
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let api = HttpQuizApi::new(&ApiConfig { base_url: common::dead_base_url().await, timeout_secs: 2 }).unwrap();
    match api.start_session(Language::Python, Difficulty::Beginner).await {
        Err(QuizError::Transport(msg)) => assert!(msg.starts_with("Unable to reach the quiz service"), "{msg}"),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn stub_rejects_unknown_language_with_an_envelope() {
    let backend = common::spawn_backend(StubState::new()).await;
    let res = reqwest::Client::new()
        .post(format!("{}/start", backend.base_url()))
        .json(&json!({ "language": "klingon", "difficulty": "beginner" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["successful"], false);
    assert_eq!(body["errorMessage"], "Unsupported language");
}
