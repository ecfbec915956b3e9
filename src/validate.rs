//! Pure input validation. Every malformed input maps to exactly one message;
//! nothing here performs I/O.

use crate::domain::{AnswerLetter, Difficulty, Language};

pub fn normalize(raw: &str) -> String {
  raw.trim().to_lowercase()
}

fn allowed_languages() -> String {
  Language::ALL.iter().map(|l| l.code()).collect::<Vec<_>>().join(", ")
}

fn allowed_difficulties() -> String {
  Difficulty::ALL.iter().map(|d| d.code()).collect::<Vec<_>>().join(", ")
}

pub fn parse_language(raw: &str) -> Result<Language, String> {
  let code = normalize(raw);
  if code.is_empty() {
    return Err(format!("Language is required. Supported languages: {}", allowed_languages()));
  }
  Language::from_code(&code)
    .ok_or_else(|| format!("Unsupported language. Supported languages: {}", allowed_languages()))
}

pub fn parse_difficulty(raw: &str) -> Result<Difficulty, String> {
  let code = normalize(raw);
  if code.is_empty() {
    return Err(format!("Difficulty is required. Supported levels: {}", allowed_difficulties()));
  }
  Difficulty::from_code(&code)
    .ok_or_else(|| format!("Unsupported difficulty. Supported levels: {}", allowed_difficulties()))
}

/// Language is checked first; the first failure wins.
pub fn validate_session_params(language: &str, difficulty: &str) -> Result<(Language, Difficulty), String> {
  let language = parse_language(language)?;
  let difficulty = parse_difficulty(difficulty)?;
  Ok((language, difficulty))
}

/// `answer` is optional so callers holding an unset field (the `null` case)
/// get the same deterministic message as an empty string.
pub fn validate_answer(session_id: &str, answer: Option<&str>) -> Result<(String, AnswerLetter), String> {
  let session_id = session_id.trim();
  if session_id.is_empty() {
    return Err("Session ID is required".into());
  }
  let raw = answer.map(str::trim).unwrap_or_default();
  if raw.is_empty() {
    return Err("Answer is required. Choose one of: A, B, C, D".into());
  }
  let letter = AnswerLetter::from_code(&raw.to_uppercase())
    .ok_or_else(|| "Answer must be one of: A, B, C, D".to_string())?;
  Ok((session_id.to_string(), letter))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_language_normalizes_in_any_casing() {
    for l in Language::ALL {
      let code = l.code();
      for raw in [code.to_string(), code.to_uppercase(), format!("  {code}\t"), format!(" {} ", code.to_uppercase())] {
        let (lang, diff) = validate_session_params(&raw, "beginner").unwrap();
        assert_eq!(lang, l);
        assert_eq!(diff, Difficulty::Beginner);
      }
    }
  }

  #[test]
  fn every_difficulty_normalizes_in_any_casing() {
    for d in Difficulty::ALL {
      for raw in [d.code().to_uppercase(), d.display_name().to_string(), format!(" {} ", d.code())] {
        assert_eq!(validate_session_params("python", &raw).unwrap().1, d);
      }
    }
  }

  #[test]
  fn unknown_language_names_the_valid_set() {
    let err = validate_session_params("klingon", "beginner").unwrap_err();
    for l in Language::ALL {
      assert!(err.contains(l.code()), "{err} should list {}", l.code());
    }
    assert!(validate_session_params("", "beginner").unwrap_err().starts_with("Language is required"));
  }

  #[test]
  fn unknown_difficulty_names_the_valid_set() {
    let err = validate_session_params("rust", "expert").unwrap_err();
    assert_eq!(err, "Unsupported difficulty. Supported levels: beginner, intermediate, advanced");
  }

  #[test]
  fn answers_normalize_to_letters() {
    for l in AnswerLetter::ALL {
      let lower = l.as_str().to_lowercase();
      assert_eq!(validate_answer("s1", Some(&format!(" {lower} "))).unwrap().1, l);
      assert_eq!(validate_answer("s1", Some(l.as_str())).unwrap().1, l);
    }
  }

  #[test]
  fn bad_answers_are_rejected() {
    assert_eq!(validate_answer("s1", Some("E")).unwrap_err(), "Answer must be one of: A, B, C, D");
    assert_eq!(validate_answer("s1", Some("1")).unwrap_err(), "Answer must be one of: A, B, C, D");
    assert_eq!(validate_answer("s1", Some("AB")).unwrap_err(), "Answer must be one of: A, B, C, D");
    assert!(validate_answer("s1", Some("")).unwrap_err().starts_with("Answer is required"));
    assert!(validate_answer("s1", None).unwrap_err().starts_with("Answer is required"));
    assert_eq!(validate_answer("  ", Some("A")).unwrap_err(), "Session ID is required");
  }
}
