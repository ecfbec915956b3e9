//! Stub backend state: in-memory session store plus the question bank.
//!
//! Sessions expire after `session_ttl` without activity; `extend` and every
//! answer refresh the clock. The store is shared across handlers behind a
//! tokio RwLock, one map keyed by session id.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::{AnswerLetter, Difficulty, Language};
use crate::stub::seeds::{questions_for, seed_questions, BankQuestion};

pub const DEFAULT_QUESTIONS_PER_SESSION: usize = 5;
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Clone, Debug)]
pub struct StubSession {
    pub id: String,
    pub language: Language,
    pub difficulty: Difficulty,
    pub questions: Vec<BankQuestion>,
    /// Index of the question awaiting an answer; equals `questions.len()` once complete.
    pub index: usize,
    pub correct: u32,
    last_active: Instant,
}

impl StubSession {
    pub fn total(&self) -> u32 {
        self.questions.len() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.questions.len()
    }

    pub fn current(&self) -> Option<&BankQuestion> {
        self.questions.get(self.index)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum StubError {
    NotFound,
    AlreadyComplete,
}

/// Result of grading one answer, with the session as it stands afterwards.
#[derive(Debug)]
pub struct Graded {
    pub correct: bool,
    pub answered: BankQuestion,
    pub session: StubSession,
}

#[derive(Clone)]
pub struct StubState {
    sessions: Arc<RwLock<HashMap<String, StubSession>>>,
    bank: Arc<Vec<BankQuestion>>,
    questions_per_session: usize,
    session_ttl: Duration,
    unavailable: Arc<AtomicBool>,
}

impl Default for StubState {
    fn default() -> Self {
        Self::new()
    }
}

impl StubState {
    pub fn new() -> Self {
        let bank = seed_questions();
        info!(target: "codequiz_stub", questions = bank.len(), "Stub question bank loaded");
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            bank: Arc::new(bank),
            questions_per_session: DEFAULT_QUESTIONS_PER_SESSION,
            session_ttl: DEFAULT_SESSION_TTL,
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_questions_per_session(mut self, n: usize) -> Self {
        self.questions_per_session = n.max(1);
        self
    }

    /// Replace the built-in question bank.
    pub fn with_bank(mut self, bank: Vec<BankQuestion>) -> Self {
        self.bank = Arc::new(bank);
        self
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Simulate an outage: handlers answer 503 without an envelope.
    pub fn set_unavailable(&self, down: bool) {
        self.unavailable.store(down, Ordering::SeqCst);
    }

    pub fn is_unavailable(&self) -> bool {
        self.unavailable.load(Ordering::SeqCst)
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn purge_expired(&self) {
        let ttl = self.session_ttl;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_active.elapsed() < ttl);
        let dropped = before - sessions.len();
        if dropped > 0 {
            debug!(target: "codequiz_stub", dropped, "Expired idle sessions");
        }
    }

    /// Pick questions (language-specific first, each group shuffled) and open a session.
    /// Returns `None` without storing anything when no question fits.
    #[instrument(level = "info", skip(self), fields(%language, %difficulty))]
    pub async fn create_session(&self, language: Language, difficulty: Difficulty) -> Option<StubSession> {
        self.purge_expired().await;

        let (mut specific, mut generic) = questions_for(&self.bank, language);
        {
            let mut rng = rand::thread_rng();
            specific.shuffle(&mut rng);
            generic.shuffle(&mut rng);
        }
        let questions: Vec<BankQuestion> = specific
            .into_iter()
            .chain(generic)
            .take(self.questions_per_session)
            .collect();
        if questions.is_empty() {
            info!(target: "codequiz_stub", %language, "No questions available; session not created");
            return None;
        }

        let session = StubSession {
            id: Uuid::new_v4().to_string(),
            language,
            difficulty,
            questions,
            index: 0,
            correct: 0,
            last_active: Instant::now(),
        };
        self.sessions.write().await.insert(session.id.clone(), session.clone());
        info!(target: "codequiz_stub", session_id = %session.id, total = session.total(), "Stub session created");
        Some(session)
    }

    #[instrument(level = "info", skip(self), fields(%id, %answer))]
    pub async fn answer(&self, id: &str, answer: AnswerLetter) -> Result<Graded, StubError> {
        self.purge_expired().await;
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id).ok_or(StubError::NotFound)?;
        let answered = session.current().cloned().ok_or(StubError::AlreadyComplete)?;

        let correct = answered.correct == answer;
        if correct {
            session.correct += 1;
        }
        session.index += 1;
        session.last_active = Instant::now();
        debug!(target: "codequiz_stub", %id, correct, index = session.index, "Stub answer graded");

        Ok(Graded { correct, answered, session: session.clone() })
    }

    pub async fn get(&self, id: &str) -> Option<StubSession> {
        self.purge_expired().await;
        self.sessions.read().await.get(id).cloned()
    }

    /// Refresh the idle clock. Completed sessions can still be extended (status stays readable).
    pub async fn touch(&self, id: &str) -> Result<(), StubError> {
        self.purge_expired().await;
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id).ok_or(StubError::NotFound)?;
        session.last_active = Instant::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn session_prefers_language_specific_questions() {
        let state = StubState::new();
        let s = state.create_session(Language::Rust, Difficulty::Beginner).await.unwrap();
        assert_eq!(s.total(), 5);
        assert_eq!(s.questions[0].language, Some(Language::Rust));
        assert!(s.questions[1..].iter().all(|q| q.language.is_none()));
    }

    #[tokio::test]
    async fn answering_advances_until_complete() {
        let state = StubState::new().with_questions_per_session(2);
        let s = state.create_session(Language::Php, Difficulty::Advanced).await.unwrap();

        let first = s.questions[0].correct;
        let g = state.answer(&s.id, first).await.unwrap();
        assert!(g.correct);
        assert_eq!(g.session.correct, 1);
        assert!(!g.session.is_complete());

        state.answer(&s.id, AnswerLetter::A).await.unwrap();
        assert_eq!(state.answer(&s.id, AnswerLetter::A).await.unwrap_err(), StubError::AlreadyComplete);
        assert_eq!(state.answer("nope", AnswerLetter::A).await.unwrap_err(), StubError::NotFound);
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let state = StubState::new().with_session_ttl(Duration::ZERO);
        let s = state.create_session(Language::Go, Difficulty::Beginner).await.unwrap();
        assert!(state.get(&s.id).await.is_none());
        assert_eq!(state.touch(&s.id).await, Err(StubError::NotFound));
    }

    #[tokio::test]
    async fn empty_bank_stores_no_session() {
        let state = StubState::new().with_bank(Vec::new());
        assert!(state.create_session(Language::Ruby, Difficulty::Beginner).await.is_none());
        assert_eq!(state.session_count().await, 0);
    }
}
