//! Built-in question bank for the stub backend.
//!
//! Generic questions apply to every language; a few language-specific ones are
//! mixed in first so each session feels tailored.

use crate::domain::{AnswerLetter, Language};

#[derive(Clone, Debug)]
pub struct BankQuestion {
  /// None = applies to every language.
  pub language: Option<Language>,
  pub text: &'static str,
  pub code_snippet: Option<&'static str>,
  pub options: [&'static str; 4],
  pub correct: AnswerLetter,
  pub explanation: &'static str,
}

pub fn seed_questions() -> Vec<BankQuestion> {
  use AnswerLetter::*;
  vec![
    BankQuestion {
      language: None,
      text: "What is the time complexity of looking up a key in a hash map on average?",
      code_snippet: None,
      options: ["O(1)", "O(log n)", "O(n)", "O(n log n)"],
      correct: A,
      explanation: "Hashing maps a key straight to a bucket, so average lookup is constant time.",
    },
    BankQuestion {
      language: None,
      text: "Which data structure follows last-in, first-out order?",
      code_snippet: None,
      options: ["Queue", "Stack", "Heap", "Linked list"],
      correct: B,
      explanation: "A stack pops the most recently pushed element first.",
    },
    BankQuestion {
      language: None,
      text: "What does a unit test primarily verify?",
      code_snippet: None,
      options: [
        "The whole system end to end",
        "Network performance",
        "A small isolated piece of behaviour",
        "The database schema",
      ],
      correct: C,
      explanation: "Unit tests exercise one unit of code in isolation.",
    },
    BankQuestion {
      language: None,
      text: "Which of these is NOT a version control system?",
      code_snippet: None,
      options: ["Git", "Mercurial", "Subversion", "Docker"],
      correct: D,
      explanation: "Docker is a container platform, not a version control system.",
    },
    BankQuestion {
      language: None,
      text: "What is recursion?",
      code_snippet: None,
      options: [
        "A function that calls itself",
        "A loop that never ends",
        "A variable shared between threads",
        "A compiler optimisation pass",
      ],
      correct: A,
      explanation: "A recursive function solves a problem by calling itself on smaller inputs.",
    },
    BankQuestion {
      language: None,
      text: "Binary search requires its input to be…",
      code_snippet: None,
      options: ["Unique", "Sorted", "Numeric", "Stored in a linked list"],
      correct: B,
      explanation: "Binary search halves the range by comparing against the middle element, which only works on sorted data.",
    },
    BankQuestion {
      language: Some(Language::Python),
      text: "What does this code print?",
      code_snippet: Some("xs = [1, 2, 3]\nprint(xs[-1])"),
      options: ["1", "3", "IndexError", "[3]"],
      correct: B,
      explanation: "Negative indices count from the end, so xs[-1] is the last element.",
    },
    BankQuestion {
      language: Some(Language::Rust),
      text: "What happens to `s` after this code runs?",
      code_snippet: Some("let s = String::from(\"hi\");\nlet t = s;"),
      options: ["It is copied", "It is moved and can no longer be used", "It is borrowed", "It is dropped twice"],
      correct: B,
      explanation: "String is not Copy, so assignment moves ownership to `t`.",
    },
    BankQuestion {
      language: Some(Language::Javascript),
      text: "What is the result of this expression?",
      code_snippet: Some("typeof null"),
      options: ["\"null\"", "\"undefined\"", "\"object\"", "\"number\""],
      correct: C,
      explanation: "A long-standing quirk: typeof null evaluates to \"object\".",
    },
    BankQuestion {
      language: Some(Language::Go),
      text: "Which keyword starts a new goroutine?",
      code_snippet: None,
      options: ["async", "spawn", "thread", "go"],
      correct: D,
      explanation: "Prefixing a call with `go` runs it in a new goroutine.",
    },
  ]
}

/// Questions usable for `language`: specific ones first, then generic.
pub fn questions_for(bank: &[BankQuestion], language: Language) -> (Vec<BankQuestion>, Vec<BankQuestion>) {
  let specific = bank.iter().filter(|q| q.language == Some(language)).cloned().collect();
  let generic = bank.iter().filter(|q| q.language.is_none()).cloned().collect();
  (specific, generic)
}
