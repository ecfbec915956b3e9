//! Code quiz client: a session controller over a remote AI quiz backend.
//!
//! - `controller`: the `setup → playing → feedback → completed` state machine
//! - `api`: REST client for the backend (reqwest) behind the `QuizApi` trait
//! - `validate` / `display`: pure helpers for input normalization and presentation
//! - `stub`: a local axum stand-in for the backend (dev server + test fixture)
//!
//! Important env variables:
//!   QUIZ_CONFIG_PATH      : path to TOML config
//!   QUIZ_API_BASE_URL     : default "http://localhost:8089/api/quiz"
//!   QUIZ_API_TIMEOUT_SECS : request timeout, default 30
//!   QUIZ_PREFS_PATH       : where last-used language/difficulty are kept
//!   LOG_LEVEL             : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT            : "pretty" (default) or "json"

pub mod api;
pub mod config;
pub mod controller;
pub mod display;
pub mod domain;
pub mod error;
pub mod prefs;
pub mod protocol;
pub mod stub;
pub mod telemetry;
pub mod util;
pub mod validate;

pub use api::{HttpQuizApi, QuizApi};
pub use controller::{Phase, QuizController, QuizState};
pub use domain::{AnswerFeedback, AnswerLetter, Difficulty, FeedbackOutcome, Language, Question, QuizSession, SessionSummary};
pub use error::QuizError;
