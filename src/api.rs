//! HTTP client for the quiz backend.
//!
//! Every response is classified the same way:
//!   1. body is an envelope with `successful: false`  -> `QuizError::Backend` (any HTTP status)
//!   2. non-2xx status without such an envelope         -> `QuizError::Transport`, generic text
//!   3. 2xx body that does not fit the schema           -> `QuizError::Protocol`
//!
//! Calls are instrumented and log session ids, status codes and latencies (never answers or
//! full payloads).

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::config::ApiConfig;
use crate::domain::{AnswerFeedback, AnswerLetter, Difficulty, Language, QuizSession, SessionStatus};
use crate::error::QuizError;
use crate::protocol::{AnswerIn, AnswerOut, Envelope, ExtendOut, HealthOut, StartIn, StartOut, StatusOut};
use crate::util::trunc_for_log;

const CLIENT_UA: &str = concat!("codequiz-client/", env!("CARGO_PKG_VERSION"));

pub const START_FALLBACK: &str = "Failed to start quiz session";
pub const ANSWER_FALLBACK: &str = "Failed to submit answer";
pub const STATUS_FALLBACK: &str = "Failed to load session status";
pub const EXTEND_FALLBACK: &str = "Failed to extend session";

/// Operations the controller consumes from the quiz backend.
#[async_trait]
pub trait QuizApi: Send + Sync {
  async fn start_session(&self, language: Language, difficulty: Difficulty) -> Result<QuizSession, QuizError>;
  async fn submit_answer(&self, session_id: &str, answer: AnswerLetter) -> Result<AnswerFeedback, QuizError>;
  async fn session_status(&self, session_id: &str) -> Result<SessionStatus, QuizError>;
  async fn extend_session(&self, session_id: &str) -> Result<(), QuizError>;

  async fn health(&self) -> Result<(), QuizError> {
    Ok(())
  }
}

/// Lets callers keep a handle on a shared API (fakes in tests, one client across screens).
#[async_trait]
impl<T: QuizApi + ?Sized> QuizApi for Arc<T> {
  async fn start_session(&self, language: Language, difficulty: Difficulty) -> Result<QuizSession, QuizError> {
    (**self).start_session(language, difficulty).await
  }

  async fn submit_answer(&self, session_id: &str, answer: AnswerLetter) -> Result<AnswerFeedback, QuizError> {
    (**self).submit_answer(session_id, answer).await
  }

  async fn session_status(&self, session_id: &str) -> Result<SessionStatus, QuizError> {
    (**self).session_status(session_id).await
  }

  async fn extend_session(&self, session_id: &str) -> Result<(), QuizError> {
    (**self).extend_session(session_id).await
  }

  async fn health(&self) -> Result<(), QuizError> {
    (**self).health().await
  }
}

#[derive(Clone, Debug)]
pub struct HttpQuizApi {
  client: reqwest::Client,
  base_url: Url,
}

impl HttpQuizApi {
  pub fn new(cfg: &ApiConfig) -> Result<Self, String> {
    let base_url = Url::parse(cfg.base_url.trim())
      .map_err(|e| format!("invalid quiz API base URL '{}': {}", cfg.base_url, e))?;
    if base_url.cannot_be_a_base() {
      return Err(format!("quiz API base URL '{}' cannot carry a path", cfg.base_url));
    }
    if cfg.timeout_secs == 0 {
      return Err("quiz API timeout must be greater than zero".into());
    }
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(cfg.timeout_secs))
      .build()
      .map_err(|e| format!("failed to build HTTP client: {}", e))?;
    Ok(Self { client, base_url })
  }

  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  /// Append path segments to the base URL; segments are percent-encoded.
  fn endpoint(&self, segments: &[&str]) -> Url {
    let mut url = self.base_url.clone();
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    url
  }

  async fn call<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder, fallback: &str) -> Result<T, QuizError> {
    let start = Instant::now();
    let res = req
      .header(USER_AGENT, CLIENT_UA)
      .send()
      .await
      .map_err(transport_error)?;

    let status = res.status();
    let body = res.text().await.map_err(transport_error)?;
    debug!(target: "codequiz", %status, elapsed = ?start.elapsed(), body_len = body.len(), "Quiz API response");

    classify(status, &body, fallback)
  }
}

/// Shared classification so fakes and tests can exercise the same rules.
pub fn classify<T: DeserializeOwned>(status: StatusCode, body: &str, fallback: &str) -> Result<T, QuizError> {
  if let Ok(env) = serde_json::from_str::<Envelope>(body) {
    if !env.successful {
      let message = env
        .error_message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string());
      return Err(QuizError::Backend(message));
    }
  }

  if !status.is_success() {
    warn!(target: "codequiz", %status, body = %trunc_for_log(body, 120), "Quiz API HTTP error without envelope");
    return Err(QuizError::Transport(http_status_message(status)));
  }

  serde_json::from_str::<T>(body).map_err(|e| QuizError::Protocol(e.to_string()))
}

pub fn http_status_message(status: StatusCode) -> String {
  match status {
    StatusCode::NOT_FOUND => "The requested quiz resource was not found.".into(),
    StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => "The quiz service took too long to respond.".into(),
    StatusCode::TOO_MANY_REQUESTS => "Too many requests. Please wait a moment and try again.".into(),
    s if s.is_server_error() => "The quiz service is temporarily unavailable.".into(),
    s => format!("Request failed (HTTP {}).", s.as_u16()),
  }
}

fn transport_error(e: reqwest::Error) -> QuizError {
  warn!(target: "codequiz", error = %e, "Quiz API transport failure");
  if e.is_timeout() {
    QuizError::Transport("The quiz service took too long to respond.".into())
  } else {
    QuizError::Transport("Unable to reach the quiz service. Please check your connection and try again.".into())
  }
}

#[async_trait]
impl QuizApi for HttpQuizApi {
  #[instrument(level = "info", skip(self), fields(%language, %difficulty))]
  async fn start_session(&self, language: Language, difficulty: Difficulty) -> Result<QuizSession, QuizError> {
    let body = StartIn { language: language.code().into(), difficulty: difficulty.code().into() };
    let req = self.client.post(self.endpoint(&["start"])).json(&body);
    let out: StartOut = self.call(req, START_FALLBACK).await?;
    let session = out.into_domain().map_err(QuizError::Protocol)?;
    info!(target: "quiz_session", session_id = %session.session_id, total = session.total_questions, "Session started");
    Ok(session)
  }

  #[instrument(level = "info", skip(self), fields(%session_id, %answer))]
  async fn submit_answer(&self, session_id: &str, answer: AnswerLetter) -> Result<AnswerFeedback, QuizError> {
    let body = AnswerIn { session_id: session_id.into(), answer: answer.to_string() };
    let req = self.client.post(self.endpoint(&["answer"])).json(&body);
    let out: AnswerOut = self.call(req, ANSWER_FALLBACK).await?;
    let feedback = out.into_domain(answer).map_err(QuizError::Protocol)?;
    info!(
      target: "quiz_session",
      %session_id,
      correct = feedback.correct,
      score = feedback.current_score,
      has_next = feedback.has_next_question(),
      "Answer evaluated"
    );
    Ok(feedback)
  }

  #[instrument(level = "debug", skip(self), fields(%session_id))]
  async fn session_status(&self, session_id: &str) -> Result<SessionStatus, QuizError> {
    let req = self.client.get(self.endpoint(&["session", session_id]));
    let out: StatusOut = self.call(req, STATUS_FALLBACK).await?;
    out.into_domain().map_err(QuizError::Protocol)
  }

  #[instrument(level = "debug", skip(self), fields(%session_id))]
  async fn extend_session(&self, session_id: &str) -> Result<(), QuizError> {
    let req = self.client.post(self.endpoint(&["session", session_id, "extend"]));
    let out: ExtendOut = self.call(req, EXTEND_FALLBACK).await?;
    debug!(target: "quiz_session", %session_id, expires_in = ?out.expires_in_seconds, "Session extended");
    Ok(())
  }

  async fn health(&self) -> Result<(), QuizError> {
    let req = self.client.get(self.endpoint(&["health"]));
    let _: HealthOut = self.call(req, "Quiz service is unhealthy").await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn api(base: &str) -> HttpQuizApi {
    HttpQuizApi::new(&ApiConfig { base_url: base.into(), timeout_secs: 5 }).unwrap()
  }

  #[test]
  fn endpoints_extend_base_path_and_encode_ids() {
    let a = api("http://localhost:1/api/quiz/");
    assert_eq!(a.endpoint(&["start"]).as_str(), "http://localhost:1/api/quiz/start");
    assert_eq!(
      a.endpoint(&["session", "a b/c", "extend"]).as_str(),
      "http://localhost:1/api/quiz/session/a%20b%2Fc/extend"
    );
  }

  #[test]
  fn bad_base_url_is_rejected() {
    assert!(HttpQuizApi::new(&ApiConfig { base_url: "not a url".into(), timeout_secs: 1 }).is_err());
    assert!(HttpQuizApi::new(&ApiConfig { base_url: "mailto:x@y".into(), timeout_secs: 1 }).is_err());
  }

  #[test]
  fn zero_timeout_is_rejected() {
    let cfg = ApiConfig { timeout_secs: 0, ..ApiConfig::default() };
    assert!(HttpQuizApi::new(&cfg).is_err());
  }

  #[test]
  fn failure_envelope_wins_over_http_status() {
    let body = r#"{"successful":false,"errorMessage":"Session not found"}"#;
    let err = classify::<ExtendOut>(StatusCode::BAD_REQUEST, body, EXTEND_FALLBACK).unwrap_err();
    assert_eq!(err, QuizError::Backend("Session not found".into()));

    let err = classify::<ExtendOut>(StatusCode::OK, r#"{"successful":false}"#, EXTEND_FALLBACK).unwrap_err();
    assert_eq!(err, QuizError::Backend(EXTEND_FALLBACK.into()));
  }

  #[test]
  fn http_errors_without_envelope_are_generic() {
    let err = classify::<ExtendOut>(StatusCode::BAD_GATEWAY, "<html>oops</html>", EXTEND_FALLBACK).unwrap_err();
    assert_eq!(err, QuizError::Transport("The quiz service is temporarily unavailable.".into()));
    let err = classify::<ExtendOut>(StatusCode::FORBIDDEN, "", EXTEND_FALLBACK).unwrap_err();
    assert_eq!(err, QuizError::Transport("Request failed (HTTP 403).".into()));
  }

  #[test]
  fn schema_mismatch_is_a_protocol_error() {
    let err = classify::<StartOut>(StatusCode::OK, r#"{"successful":true}"#, START_FALLBACK).unwrap_err();
    assert!(matches!(err, QuizError::Protocol(_)));
  }
}
