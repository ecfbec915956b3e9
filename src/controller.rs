//! Quiz session controller: owns the client-side state machine and drives the backend.
//!
//! ```text
//! Setup --start--> Playing --submit--> Feedback --proceed--> Playing | Completed
//! Completed --reset--> Setup      {Playing, Feedback} --cancel--> Setup
//! ```
//!
//! Every submission lands in `Feedback`, even the last one; only `proceed` decides
//! between the next question and the summary. A failed operation never mutates the
//! state: results are checked first and committed in one assignment.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::api::QuizApi;
use crate::domain::{AnswerFeedback, FeedbackOutcome, Question, QuizSession, SessionStatus, SessionSummary};
use crate::error::QuizError;
use crate::prefs::{MemoryPreferences, Preferences, QuizPreferences};
use crate::validate::{validate_answer, validate_session_params};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizState {
    Setup,
    Playing {
        session: QuizSession,
    },
    Feedback {
        session: QuizSession,
        feedback: AnswerFeedback,
    },
    Completed {
        summary: SessionSummary,
    },
}

/// Payload-free view of `QuizState`, handy for UIs and assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Playing,
    Feedback,
    Completed,
}

impl QuizState {
    pub fn phase(&self) -> Phase {
        match self {
            QuizState::Setup => Phase::Setup,
            QuizState::Playing { .. } => Phase::Playing,
            QuizState::Feedback { .. } => Phase::Feedback,
            QuizState::Completed { .. } => Phase::Completed,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            QuizState::Setup => "no quiz is running",
            QuizState::Playing { .. } => "a question is waiting for an answer",
            QuizState::Feedback { .. } => "feedback is being shown",
            QuizState::Completed { .. } => "the quiz is complete",
        }
    }
}

pub struct QuizController<A: QuizApi> {
    api: A,
    prefs: Arc<dyn Preferences>,
    state: QuizState,
    last_error: Option<QuizError>,
}

impl<A: QuizApi> QuizController<A> {
    pub fn new(api: A) -> Self {
        Self::with_preferences(api, Arc::new(MemoryPreferences::default()))
    }

    pub fn with_preferences(api: A, prefs: Arc<dyn Preferences>) -> Self {
        Self { api, prefs, state: QuizState::Setup, last_error: None }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn preferences(&self) -> QuizPreferences {
        self.prefs.load()
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Active session while playing or showing feedback.
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.state {
            QuizState::Playing { session } | QuizState::Feedback { session, .. } => Some(session),
            QuizState::Setup | QuizState::Completed { .. } => None,
        }
    }

    pub fn score(&self) -> Option<u32> {
        self.session().map(|s| s.score)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session().map(|s| &s.current_question)
    }

    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        match &self.state {
            QuizState::Feedback { feedback, .. } => Some(feedback),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        match &self.state {
            QuizState::Completed { summary } => Some(summary),
            QuizState::Feedback { feedback, .. } => feedback.summary(),
            _ => None,
        }
    }

    /// Most recent failure, cleared by the next successful operation or a reset.
    pub fn last_error(&self) -> Option<&QuizError> {
        self.last_error.as_ref()
    }

    fn fail<T>(&mut self, err: QuizError) -> Result<T, QuizError> {
        debug!(target: "quiz_session", error = %err, phase = ?self.phase(), "Quiz operation failed");
        self.last_error = Some(err.clone());
        Err(err)
    }

    fn invalid_state<T>(&mut self, action: &'static str) -> Result<T, QuizError> {
        let state = self.state.describe();
        self.fail(QuizError::InvalidState { action, state })
    }

    /// Validate, then ask the backend for a new session. Only legal in `Setup`.
    #[instrument(level = "info", skip(self))]
    pub async fn start_session(&mut self, language: &str, difficulty: &str) -> Result<&QuizSession, QuizError> {
        if self.phase() != Phase::Setup {
            return self.invalid_state("start a new quiz");
        }
        let (language, difficulty) = match validate_session_params(language, difficulty) {
            Ok(v) => v,
            Err(msg) => return self.fail(QuizError::Validation(msg)),
        };

        let session = match self.api.start_session(language, difficulty).await {
            Ok(s) => s,
            Err(e) => return self.fail(e),
        };
        if session.score != 0 {
            let msg = format!("new session {} started with score {}", session.session_id, session.score);
            return self.fail(QuizError::Protocol(msg));
        }

        info!(
            target: "quiz_session",
            session_id = %session.session_id,
            %language,
            %difficulty,
            total = session.total_questions,
            "Quiz started"
        );
        self.last_error = None;
        self.state = QuizState::Playing { session };

        let prefs = QuizPreferences { language: Some(language), difficulty: Some(difficulty) };
        if let Err(e) = self.prefs.save(prefs) {
            warn!(target: "quiz_session", error = %e, "Could not remember quiz preferences");
        }

        let state = self.state.describe();
        self.session().ok_or(QuizError::InvalidState { action: "start a new quiz", state })
    }

    /// Answer the active question of the current session.
    pub async fn submit_answer(&mut self, answer: &str) -> Result<&AnswerFeedback, QuizError> {
        let Some(session_id) = self.active_playing_id() else {
            return self.invalid_state("submit an answer");
        };
        self.submit_answer_for(&session_id, Some(answer)).await
    }

    /// Explicit-id form. `session_id` must name the active session.
    #[instrument(level = "info", skip(self, answer), fields(%session_id))]
    pub async fn submit_answer_for(&mut self, session_id: &str, answer: Option<&str>) -> Result<&AnswerFeedback, QuizError> {
        let (session_id, letter) = match validate_answer(session_id, answer) {
            Ok(v) => v,
            Err(msg) => return self.fail(QuizError::Validation(msg)),
        };
        let Some(active_id) = self.active_playing_id() else {
            return self.invalid_state("submit an answer");
        };
        if active_id != session_id {
            return self.fail(QuizError::Validation("Session ID does not match the active quiz".into()));
        }

        let feedback = match self.api.submit_answer(&session_id, letter).await {
            Ok(f) => f,
            Err(e) => return self.fail(e),
        };

        let QuizState::Playing { session } = &self.state else {
            return self.invalid_state("submit an answer");
        };
        if let Err(msg) = check_score(session, &feedback) {
            return self.fail(QuizError::Protocol(msg));
        }

        let mut session = session.clone();
        session.score = feedback.current_score;
        info!(
            target: "quiz_session",
            %session_id,
            question = session.current_question.question_number,
            correct = feedback.correct,
            score = session.score,
            finished = !feedback.has_next_question(),
            "Answer recorded"
        );
        self.last_error = None;
        self.state = QuizState::Feedback { session, feedback };

        let state = self.state.describe();
        self.feedback().ok_or(QuizError::InvalidState { action: "submit an answer", state })
    }

    /// Leave the feedback screen: next question, or the summary if the session ended.
    pub fn proceed(&mut self) -> Result<Phase, QuizError> {
        let (mut session, feedback) = match std::mem::replace(&mut self.state, QuizState::Setup) {
            QuizState::Feedback { session, feedback } => (session, feedback),
            other => {
                self.state = other;
                return self.invalid_state("continue");
            }
        };
        self.state = match feedback.outcome {
            FeedbackOutcome::Next(question) => {
                session.current_question = question;
                QuizState::Playing { session }
            }
            FeedbackOutcome::Finished(summary) => {
                info!(
                    target: "quiz_session",
                    session_id = %session.session_id,
                    correct = summary.correct_answers,
                    total = summary.total_questions,
                    percent = summary.score,
                    "Quiz completed"
                );
                QuizState::Completed { summary }
            }
        };
        self.last_error = None;
        Ok(self.phase())
    }

    /// Abandon a running quiz. The backend is not told; it expires idle sessions itself.
    pub fn cancel(&mut self) -> Result<(), QuizError> {
        match self.phase() {
            Phase::Playing | Phase::Feedback => {
                if let Some(s) = self.session() {
                    info!(target: "quiz_session", session_id = %s.session_id, "Quiz cancelled");
                }
                self.reset_session();
                Ok(())
            }
            Phase::Setup | Phase::Completed => self.invalid_state("cancel"),
        }
    }

    /// Drop all session data and return to `Setup`. Always succeeds.
    pub fn reset_session(&mut self) {
        self.state = QuizState::Setup;
        self.last_error = None;
    }

    /// Best-effort keep-alive. Failures are logged, never surfaced.
    #[instrument(level = "debug", skip(self))]
    pub async fn extend_session(&self) -> bool {
        let Some(session) = self.session() else {
            debug!(target: "quiz_session", "No active session to extend");
            return false;
        };
        match self.api.extend_session(&session.session_id).await {
            Ok(()) => true,
            Err(e) => {
                warn!(target: "quiz_session", session_id = %session.session_id, error = %e, "Session keep-alive failed");
                false
            }
        }
    }

    /// Read-only status snapshot of the active session; never changes local state.
    pub async fn refresh_status(&self) -> Result<SessionStatus, QuizError> {
        let Some(session) = self.session() else {
            return Err(QuizError::InvalidState { action: "load session status", state: self.state.describe() });
        };
        self.api.session_status(&session.session_id).await
    }

    fn active_playing_id(&self) -> Option<String> {
        match &self.state {
            QuizState::Playing { session } => Some(session.session_id.clone()),
            _ => None,
        }
    }
}

/// Score reported by the backend must stay within `previous..=total`, and a final
/// summary must agree with both the session and that score.
fn check_score(session: &QuizSession, feedback: &AnswerFeedback) -> Result<(), String> {
    let new = feedback.current_score;
    if new < session.score {
        return Err(format!("score went down from {} to {}", session.score, new));
    }
    if new > session.total_questions {
        return Err(format!("score {} exceeds {} questions", new, session.total_questions));
    }
    if let Some(summary) = feedback.summary() {
        if summary.total_questions != session.total_questions {
            return Err(format!(
                "summary covers {} questions, session has {}",
                summary.total_questions, session.total_questions
            ));
        }
        if summary.correct_answers != new {
            return Err(format!("summary counts {} correct, score is {}", summary.correct_answers, new));
        }
    }
    Ok(())
}
