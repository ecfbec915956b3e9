//! Domain models for a quiz session: supported languages/levels, questions,
//! per-answer feedback and the terminal session summary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Programming languages the quiz backend can generate questions for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  Python,
  Javascript,
  Java,
  Csharp,
  Cpp,
  Go,
  Rust,
  Typescript,
  Php,
  Ruby,
}

impl Language {
  pub const ALL: [Language; 10] = [
    Language::Python,
    Language::Javascript,
    Language::Java,
    Language::Csharp,
    Language::Cpp,
    Language::Go,
    Language::Rust,
    Language::Typescript,
    Language::Php,
    Language::Ruby,
  ];

  /// Canonical lowercase code sent over the wire.
  pub fn code(self) -> &'static str {
    match self {
      Language::Python => "python",
      Language::Javascript => "javascript",
      Language::Java => "java",
      Language::Csharp => "csharp",
      Language::Cpp => "cpp",
      Language::Go => "go",
      Language::Rust => "rust",
      Language::Typescript => "typescript",
      Language::Php => "php",
      Language::Ruby => "ruby",
    }
  }

  pub fn display_name(self) -> &'static str {
    match self {
      Language::Python => "Python",
      Language::Javascript => "JavaScript",
      Language::Java => "Java",
      Language::Csharp => "C#",
      Language::Cpp => "C++",
      Language::Go => "Go",
      Language::Rust => "Rust",
      Language::Typescript => "TypeScript",
      Language::Php => "PHP",
      Language::Ruby => "Ruby",
    }
  }

  /// Exact match on the canonical code (no trimming, no case folding).
  pub fn from_code(code: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|l| l.code() == code)
  }
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Beginner,
  Intermediate,
  Advanced,
}

impl Difficulty {
  pub const ALL: [Difficulty; 3] = [Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Advanced];

  pub fn code(self) -> &'static str {
    match self {
      Difficulty::Beginner => "beginner",
      Difficulty::Intermediate => "intermediate",
      Difficulty::Advanced => "advanced",
    }
  }

  pub fn display_name(self) -> &'static str {
    match self {
      Difficulty::Beginner => "Beginner",
      Difficulty::Intermediate => "Intermediate",
      Difficulty::Advanced => "Advanced",
    }
  }

  pub fn from_code(code: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|d| d.code() == code)
  }
}

impl fmt::Display for Difficulty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}

/// One of the four option letters of a question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnswerLetter {
  A,
  B,
  C,
  D,
}

impl AnswerLetter {
  pub const ALL: [AnswerLetter; 4] = [AnswerLetter::A, AnswerLetter::B, AnswerLetter::C, AnswerLetter::D];

  pub fn as_str(self) -> &'static str {
    match self {
      AnswerLetter::A => "A",
      AnswerLetter::B => "B",
      AnswerLetter::C => "C",
      AnswerLetter::D => "D",
    }
  }

  pub fn from_code(code: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|l| l.as_str() == code)
  }
}

impl fmt::Display for AnswerLetter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOption {
  pub letter: AnswerLetter,
  pub text: String,
}

/// A multiple-choice question. `options` always holds A, B, C, D in order;
/// the protocol layer refuses anything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
  /// 1-based ordinal within the session.
  pub question_number: u32,
  pub text: String,
  pub code_snippet: Option<String>,
  pub options: [AnswerOption; 4],
}

impl Question {
  pub fn option(&self, letter: AnswerLetter) -> &AnswerOption {
    &self.options[letter as usize]
  }
}

/// Client-held mirror of the backend session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSession {
  pub session_id: String,
  pub language: Language,
  pub language_display_name: String,
  pub difficulty: Difficulty,
  pub total_questions: u32,
  /// Correct answers so far, as reported by the backend.
  pub score: u32,
  pub current_question: Question,
}

/// Terminal result of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
  pub correct_answers: u32,
  pub total_questions: u32,
  /// Percentage, 0..=100.
  pub score: u8,
  pub performance: String,
  pub language: Language,
  pub difficulty: Difficulty,
}

/// Either the session continues with another question or it has ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedbackOutcome {
  Next(Question),
  Finished(SessionSummary),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerFeedback {
  pub correct: bool,
  pub selected_answer: AnswerLetter,
  pub correct_answer: AnswerLetter,
  pub message: String,
  pub explanation: String,
  pub current_score: u32,
  pub outcome: FeedbackOutcome,
}

impl AnswerFeedback {
  pub fn has_next_question(&self) -> bool {
    matches!(self.outcome, FeedbackOutcome::Next(_))
  }

  pub fn next_question(&self) -> Option<&Question> {
    match &self.outcome {
      FeedbackOutcome::Next(q) => Some(q),
      FeedbackOutcome::Finished(_) => None,
    }
  }

  pub fn summary(&self) -> Option<&SessionSummary> {
    match &self.outcome {
      FeedbackOutcome::Finished(s) => Some(s),
      FeedbackOutcome::Next(_) => None,
    }
  }
}

/// Read-only snapshot from the session status endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionStatus {
  pub session_id: String,
  pub language: Language,
  pub difficulty: Difficulty,
  pub current_question_number: u32,
  pub total_questions: u32,
  pub score: u32,
  pub is_complete: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn codes_roundtrip_through_from_code() {
    for l in Language::ALL {
      assert_eq!(Language::from_code(l.code()), Some(l));
    }
    for d in Difficulty::ALL {
      assert_eq!(Difficulty::from_code(d.code()), Some(d));
    }
    assert_eq!(Language::from_code("Python"), None);
  }

  #[test]
  fn option_lookup_uses_letter_position() {
    let q = Question {
      question_number: 1,
      text: "?".into(),
      code_snippet: None,
      options: AnswerLetter::ALL.map(|letter| AnswerOption { letter, text: format!("opt {letter}") }),
    };
    assert_eq!(q.option(AnswerLetter::C).text, "opt C");
  }
}
