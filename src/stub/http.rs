//! Stub HTTP handlers. Thin wrappers over `StubState`; they speak the same
//! envelope contract as the real backend (`successful` + `errorMessage`).

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument};

use crate::domain::{AnswerLetter, Difficulty, Language};
use crate::protocol::*;
use crate::stub::seeds::BankQuestion;
use crate::stub::state::{StubError, StubSession, StubState};
use crate::validate::normalize;

fn fail(status: StatusCode, message: &str) -> Response {
  (status, Json(ErrorOut::new(message))).into_response()
}

/// Outage mode answers without an envelope so clients see a transport-level error.
fn outage() -> Response {
  (StatusCode::SERVICE_UNAVAILABLE, "stub backend unavailable").into_response()
}

fn question_out(number: usize, q: &BankQuestion) -> QuestionOut {
  QuestionOut {
    question_number: number as u32,
    text: q.text.to_string(),
    code_snippet: q.code_snippet.map(str::to_string),
    options: AnswerLetter::ALL
      .iter()
      .zip(q.options.iter())
      .map(|(letter, text)| OptionOut { letter: letter.to_string(), text: text.to_string() })
      .collect(),
  }
}

pub fn performance_label(percent: u32) -> &'static str {
  match percent {
    90..=100 => "excellent",
    70..=89 => "good",
    50..=69 => "fair",
    _ => "needs_improvement",
  }
}

fn summary_out(s: &StubSession) -> SummaryOut {
  let percent = if s.total() == 0 { 0 } else { s.correct * 100 / s.total() };
  SummaryOut {
    correct_answers: s.correct,
    total_questions: s.total(),
    score: i64::from(percent),
    performance: performance_label(percent).into(),
    language: s.language.code().into(),
    difficulty: s.difficulty.code().into(),
  }
}

#[instrument(level = "debug", skip_all)]
pub async fn http_health(State(state): State<StubState>) -> Response {
  if state.is_unavailable() {
    return outage();
  }
  Json(HealthOut { successful: true, status: "ok".into() }).into_response()
}

#[instrument(level = "info", skip(state), fields(language = %body.language, difficulty = %body.difficulty))]
pub async fn http_post_start(State(state): State<StubState>, Json(body): Json<StartIn>) -> Response {
  if state.is_unavailable() {
    return outage();
  }
  let Some(language) = Language::from_code(&normalize(&body.language)) else {
    return fail(StatusCode::BAD_REQUEST, "Unsupported language");
  };
  let Some(difficulty) = Difficulty::from_code(&normalize(&body.difficulty)) else {
    return fail(StatusCode::BAD_REQUEST, "Unsupported difficulty");
  };

  let Some(session) = state.create_session(language, difficulty).await else {
    return fail(StatusCode::INTERNAL_SERVER_ERROR, "No questions available for this language");
  };
  let Some(first) = session.current() else {
    return fail(StatusCode::INTERNAL_SERVER_ERROR, "No questions available for this language");
  };
  info!(target: "codequiz_stub", session_id = %session.id, "HTTP start served");
  Json(StartOut {
    successful: true,
    error_message: None,
    session_id: session.id.clone(),
    language: language.code().into(),
    language_display_name: Some(language.display_name().into()),
    difficulty: difficulty.code().into(),
    current_question: question_out(1, first),
    total_questions: session.total(),
    current_question_number: 1,
    score: 0,
    is_complete: false,
  })
  .into_response()
}

#[instrument(level = "info", skip(state, body), fields(session_id = %body.session_id))]
pub async fn http_post_answer(State(state): State<StubState>, Json(body): Json<AnswerIn>) -> Response {
  if state.is_unavailable() {
    return outage();
  }
  let Some(letter) = AnswerLetter::from_code(&body.answer.trim().to_uppercase()) else {
    return fail(StatusCode::BAD_REQUEST, "Answer must be one of: A, B, C, D");
  };

  let graded = match state.answer(&body.session_id, letter).await {
    Ok(g) => g,
    Err(StubError::NotFound) => return fail(StatusCode::NOT_FOUND, "Quiz session not found or expired"),
    Err(StubError::AlreadyComplete) => return fail(StatusCode::CONFLICT, "Quiz session is already complete"),
  };

  let s = &graded.session;
  let next_question = s.current().map(|q| question_out(s.index + 1, q));
  let session_summary = if s.is_complete() { Some(summary_out(s)) } else { None };
  info!(target: "codequiz_stub", session_id = %s.id, correct = graded.correct, score = s.correct, "HTTP answer graded");

  Json(AnswerOut {
    successful: true,
    error_message: None,
    correct: graded.correct,
    message: if graded.correct { "Correct!".into() } else { "Not quite.".into() },
    correct_answer: graded.answered.correct.to_string(),
    explanation: graded.answered.explanation.into(),
    current_score: s.correct,
    has_next_question: next_question.is_some(),
    next_question,
    session_summary,
  })
  .into_response()
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(State(state): State<StubState>, Path(id): Path<String>) -> Response {
  if state.is_unavailable() {
    return outage();
  }
  let Some(s) = state.get(&id).await else {
    return fail(StatusCode::NOT_FOUND, "Quiz session not found or expired");
  };
  Json(StatusOut {
    successful: true,
    error_message: None,
    session_id: s.id.clone(),
    language: s.language.code().into(),
    difficulty: s.difficulty.code().into(),
    current_question_number: (s.index as u32 + 1).min(s.total()),
    total_questions: s.total(),
    score: s.correct,
    is_complete: s.is_complete(),
  })
  .into_response()
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_extend(State(state): State<StubState>, Path(id): Path<String>) -> Response {
  if state.is_unavailable() {
    return outage();
  }
  match state.touch(&id).await {
    Ok(()) => Json(ExtendOut {
      successful: true,
      error_message: None,
      expires_in_seconds: Some(state.session_ttl().as_secs()),
    })
    .into_response(),
    Err(_) => fail(StatusCode::NOT_FOUND, "Quiz session not found or expired"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn performance_tiers_cover_the_range() {
    assert_eq!(performance_label(100), "excellent");
    assert_eq!(performance_label(80), "good");
    assert_eq!(performance_label(60), "fair");
    assert_eq!(performance_label(0), "needs_improvement");
  }
}
