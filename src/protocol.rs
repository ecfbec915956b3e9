//! Wire structs for the quiz backend REST API (serde ready, camelCase JSON).
//! Shared by the HTTP client and the stub backend so both sides agree on shape.
//!
//! Conversions into domain types live here too: they are the single place where
//! a payload is checked and refused, so nothing downstream sees a half-valid
//! question or a summary with an impossible score.

use serde::{Deserialize, Serialize};

use crate::domain::{
    AnswerFeedback, AnswerLetter, AnswerOption, Difficulty, FeedbackOutcome, Language, Question,
    QuizSession, SessionStatus, SessionSummary,
};

/// Minimal view of any backend response: just the success flag and message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub successful: bool,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Failure envelope written by the stub backend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOut {
    pub successful: bool,
    pub error_message: String,
}

impl ErrorOut {
    pub fn new(message: impl Into<String>) -> Self {
        Self { successful: false, error_message: message.into() }
    }
}

//
// Requests
//

#[derive(Debug, Serialize, Deserialize)]
pub struct StartIn {
    pub language: String,
    pub difficulty: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerIn {
    pub session_id: String,
    pub answer: String,
}

//
// Responses
//

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OptionOut {
    pub letter: String,
    pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOut {
    pub question_number: u32,
    #[serde(alias = "question")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    pub options: Vec<OptionOut>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOut {
    pub successful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub session_id: String,
    pub language: String,
    #[serde(default)]
    pub language_display_name: Option<String>,
    pub difficulty: String,
    pub current_question: QuestionOut,
    pub total_questions: u32,
    pub current_question_number: u32,
    pub score: u32,
    #[serde(default)]
    pub is_complete: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOut {
    pub correct_answers: u32,
    pub total_questions: u32,
    pub score: i64,
    pub performance: String,
    pub language: String,
    pub difficulty: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOut {
    pub successful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub correct: bool,
    pub message: String,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
    pub current_score: u32,
    pub has_next_question: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_question: Option<QuestionOut>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_summary: Option<SummaryOut>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOut {
    pub successful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub session_id: String,
    pub language: String,
    pub difficulty: String,
    pub current_question_number: u32,
    pub total_questions: u32,
    pub score: u32,
    pub is_complete: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendOut {
    pub successful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in_seconds: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthOut {
    pub successful: bool,
    pub status: String,
}

//
// Boundary conversions
//

fn language_from_wire(raw: &str) -> Result<Language, String> {
    Language::from_code(&crate::validate::normalize(raw))
        .ok_or_else(|| format!("unknown language '{}'", raw))
}

fn difficulty_from_wire(raw: &str) -> Result<Difficulty, String> {
    Difficulty::from_code(&crate::validate::normalize(raw))
        .ok_or_else(|| format!("unknown difficulty '{}'", raw))
}

fn letter_from_wire(raw: &str) -> Result<AnswerLetter, String> {
    AnswerLetter::from_code(&raw.trim().to_uppercase())
        .ok_or_else(|| format!("invalid option letter '{}'", raw))
}

impl QuestionOut {
    /// Options must be exactly A, B, C, D (any order, no duplicates).
    pub fn into_domain(self) -> Result<Question, String> {
        if self.question_number == 0 {
            return Err("question number must be 1-based".into());
        }
        if self.options.len() != 4 {
            return Err(format!("expected 4 options, got {}", self.options.len()));
        }
        let mut slots: [Option<String>; 4] = Default::default();
        for opt in self.options {
            let letter = letter_from_wire(&opt.letter)?;
            let slot = &mut slots[letter as usize];
            if slot.is_some() {
                return Err(format!("duplicate option letter {}", letter));
            }
            *slot = Some(opt.text);
        }
        let options = AnswerLetter::ALL.map(|letter| AnswerOption {
            letter,
            text: slots[letter as usize].take().unwrap_or_default(),
        });
        Ok(Question {
            question_number: self.question_number,
            text: self.text,
            code_snippet: self.code_snippet.filter(|s| !s.trim().is_empty()),
            options,
        })
    }
}

impl From<&Question> for QuestionOut {
    fn from(q: &Question) -> Self {
        QuestionOut {
            question_number: q.question_number,
            text: q.text.clone(),
            code_snippet: q.code_snippet.clone(),
            options: q
                .options
                .iter()
                .map(|o| OptionOut { letter: o.letter.to_string(), text: o.text.clone() })
                .collect(),
        }
    }
}

impl StartOut {
    pub fn into_domain(self) -> Result<QuizSession, String> {
        if self.session_id.trim().is_empty() {
            return Err("missing session id".into());
        }
        if self.total_questions == 0 {
            return Err("session has no questions".into());
        }
        if self.score > self.total_questions {
            return Err(format!("score {} exceeds {} questions", self.score, self.total_questions));
        }
        let language = language_from_wire(&self.language)?;
        let difficulty = difficulty_from_wire(&self.difficulty)?;
        let current_question = self.current_question.into_domain()?;
        let language_display_name = self
            .language_display_name
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| language.display_name().to_string());
        Ok(QuizSession {
            session_id: self.session_id,
            language,
            language_display_name,
            difficulty,
            total_questions: self.total_questions,
            score: self.score,
            current_question,
        })
    }
}

impl SummaryOut {
    pub fn into_domain(self) -> Result<SessionSummary, String> {
        let score = u8::try_from(self.score)
            .ok()
            .filter(|s| *s <= 100)
            .ok_or_else(|| format!("summary score {} outside 0-100", self.score))?;
        if self.correct_answers > self.total_questions {
            return Err(format!(
                "summary reports {} correct of {}",
                self.correct_answers, self.total_questions
            ));
        }
        Ok(SessionSummary {
            correct_answers: self.correct_answers,
            total_questions: self.total_questions,
            score,
            performance: self.performance,
            language: language_from_wire(&self.language)?,
            difficulty: difficulty_from_wire(&self.difficulty)?,
        })
    }
}

impl AnswerOut {
    /// `selected` is the letter the client sent; the backend does not echo it.
    pub fn into_domain(self, selected: AnswerLetter) -> Result<AnswerFeedback, String> {
        let correct_answer = letter_from_wire(&self.correct_answer)?;
        let outcome = if self.has_next_question {
            let next = self.next_question.ok_or("hasNextQuestion without nextQuestion")?;
            FeedbackOutcome::Next(next.into_domain()?)
        } else {
            let summary = self.session_summary.ok_or("session ended without a summary")?;
            FeedbackOutcome::Finished(summary.into_domain()?)
        };
        Ok(AnswerFeedback {
            correct: self.correct,
            selected_answer: selected,
            correct_answer,
            message: self.message,
            explanation: self.explanation,
            current_score: self.current_score,
            outcome,
        })
    }
}

impl StatusOut {
    pub fn into_domain(self) -> Result<SessionStatus, String> {
        Ok(SessionStatus {
            language: language_from_wire(&self.language)?,
            difficulty: difficulty_from_wire(&self.difficulty)?,
            session_id: self.session_id,
            current_question_number: self.current_question_number,
            total_questions: self.total_questions,
            score: self.score,
            is_complete: self.is_complete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(letters: &[&str]) -> Vec<OptionOut> {
        letters
            .iter()
            .map(|l| OptionOut { letter: l.to_string(), text: format!("text {l}") })
            .collect()
    }

    fn question(letters: &[&str]) -> QuestionOut {
        QuestionOut { question_number: 1, text: "What?".into(), code_snippet: None, options: options(letters) }
    }

    #[test]
    fn question_options_are_reordered_by_letter() {
        let q = question(&["d", "B", "A", "c"]).into_domain().unwrap();
        let letters: Vec<_> = q.options.iter().map(|o| o.letter).collect();
        assert_eq!(letters, AnswerLetter::ALL.to_vec());
        assert_eq!(q.option(AnswerLetter::D).text, "text d");
    }

    #[test]
    fn malformed_option_lists_are_refused() {
        assert!(question(&["A", "B", "C"]).into_domain().unwrap_err().contains("expected 4"));
        assert!(question(&["A", "B", "C", "C"]).into_domain().unwrap_err().contains("duplicate"));
        assert!(question(&["A", "B", "C", "E"]).into_domain().unwrap_err().contains("invalid option"));
    }

    #[test]
    fn start_payload_parses_from_camel_case() {
        let body = json!({
            "successful": true,
            "sessionId": "abc",
            "language": "Python",
            "languageDisplayName": "Python",
            "difficulty": "beginner",
            "currentQuestion": {
                "questionNumber": 1,
                "question": "Which keyword defines a function?",
                "codeSnippet": "",
                "options": [
                    {"letter": "A", "text": "def"},
                    {"letter": "B", "text": "fn"},
                    {"letter": "C", "text": "func"},
                    {"letter": "D", "text": "function"}
                ]
            },
            "totalQuestions": 5,
            "currentQuestionNumber": 1,
            "score": 0,
            "isComplete": false
        });
        let out: StartOut = serde_json::from_value(body).unwrap();
        let session = out.into_domain().unwrap();
        assert_eq!(session.language, Language::Python);
        assert_eq!(session.current_question.code_snippet, None);
        assert_eq!(session.total_questions, 5);
    }

    #[test]
    fn answer_payload_requires_matching_branch() {
        let body = json!({
            "successful": true,
            "correct": true,
            "message": "Correct!",
            "correctAnswer": "a",
            "currentScore": 1,
            "hasNextQuestion": true
        });
        let out: AnswerOut = serde_json::from_value(body).unwrap();
        assert!(out.into_domain(AnswerLetter::A).unwrap_err().contains("nextQuestion"));
    }

    #[test]
    fn summary_score_must_be_a_percentage() {
        let s = SummaryOut {
            correct_answers: 3,
            total_questions: 5,
            score: 140,
            performance: "good".into(),
            language: "go".into(),
            difficulty: "advanced".into(),
        };
        assert!(s.into_domain().is_err());
    }
}
