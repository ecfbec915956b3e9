//! Terminal driver for the quiz controller.
//!
//! A plain line-oriented UI: every screen is a prompt, every answer is one line.
//! It drives `QuizController` exactly as any other front-end would.
//!
//! Run `codequiz-stub` in another terminal for a local backend, or point
//! QUIZ_API_BASE_URL at a real one.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};

use codequiz_client::config::load_client_config_from_env;
use codequiz_client::display::{difficulty_badge, performance_badge, Badge, Tier};
use codequiz_client::domain::{AnswerFeedback, Difficulty, Language, Question, SessionSummary};
use codequiz_client::prefs::{MemoryPreferences, Preferences, TomlPreferences};
use codequiz_client::{telemetry, HttpQuizApi, Phase, QuizApi, QuizController};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing("warn,codequiz=info,quiz_session=info");

  let cfg = load_client_config_from_env();
  let api = HttpQuizApi::new(&cfg.api)?;
  info!(target: "codequiz", base_url = %api.base_url(), timeout_secs = cfg.api.timeout_secs, "Quiz client configured");

  if let Err(e) = api.health().await {
    warn!(target: "codequiz", error = %e, "Quiz service health check failed; continuing anyway");
  }

  let prefs: Arc<dyn Preferences> = match &cfg.preferences_path {
    Some(path) => Arc::new(TomlPreferences::new(path)),
    None => Arc::new(MemoryPreferences::default()),
  };
  let mut quiz = QuizController::with_preferences(api, prefs);
  let mut input = BufReader::new(tokio::io::stdin()).lines();

  println!("Code Quiz. Type 'q' at any prompt to quit.");
  loop {
    let keep_going = match quiz.phase() {
      Phase::Setup => setup_screen(&mut quiz, &mut input).await?,
      Phase::Playing => question_screen(&mut quiz, &mut input).await?,
      Phase::Feedback => feedback_screen(&mut quiz, &mut input).await?,
      Phase::Completed => summary_screen(&mut quiz, &mut input).await?,
    };
    if !keep_going {
      break;
    }
  }
  println!("Bye!");
  Ok(())
}

/// None on EOF or 'q'.
async fn prompt(input: &mut Input, text: &str) -> std::io::Result<Option<String>> {
  print!("{text}");
  std::io::stdout().flush()?;
  match input.next_line().await? {
    Some(line) if line.trim().eq_ignore_ascii_case("q") => Ok(None),
    Some(line) => Ok(Some(line)),
    None => Ok(None),
  }
}

fn badge(b: &Badge) -> String {
  let mark = match b.tier {
    Tier::Success => "+",
    Tier::Info => "i",
    Tier::Warning => "!",
    Tier::Danger => "x",
    Tier::Neutral => "-",
  };
  format!("[{mark}] {}", b.label)
}

async fn setup_screen<A: QuizApi>(quiz: &mut QuizController<A>, input: &mut Input) -> std::io::Result<bool> {
  let last = quiz.preferences();
  let default_lang = last.language.unwrap_or(Language::Python);
  let default_diff = last.difficulty.unwrap_or(Difficulty::Beginner);

  let codes: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
  println!("\nLanguages: {}", codes.join(", "));
  let Some(lang) = prompt(input, &format!("Language [{default_lang}]: ")).await? else {
    return Ok(false);
  };
  let Some(diff) = prompt(input, &format!("Difficulty (beginner/intermediate/advanced) [{default_diff}]: ")).await? else {
    return Ok(false);
  };
  let lang = if lang.trim().is_empty() { default_lang.code().to_string() } else { lang };
  let diff = if diff.trim().is_empty() { default_diff.code().to_string() } else { diff };

  match quiz.start_session(&lang, &diff).await {
    Ok(s) => println!(
      "\nStarting a {} quiz on {} ({} questions).",
      badge(&difficulty_badge(s.difficulty.code())),
      s.language_display_name,
      s.total_questions
    ),
    Err(e) => println!("Error: {e}"),
  }
  Ok(true)
}

fn print_question(q: &Question, total: u32, score: u32) {
  println!("\nQuestion {}/{}  (score {})", q.question_number, total, score);
  println!("{}", q.text);
  if let Some(code) = &q.code_snippet {
    println!("----\n{code}\n----");
  }
  for opt in &q.options {
    println!("  {}) {}", opt.letter, opt.text);
  }
}

async fn question_screen<A: QuizApi>(quiz: &mut QuizController<A>, input: &mut Input) -> std::io::Result<bool> {
  if let Some(s) = quiz.session() {
    print_question(&s.current_question, s.total_questions, s.score);
  }
  let Some(line) = prompt(input, "Answer (A-D, 'x' cancel, 's' status): ").await? else {
    return Ok(false);
  };
  match line.trim().to_lowercase().as_str() {
    "x" => {
      let _ = quiz.cancel();
      println!("Quiz cancelled.");
    }
    "s" => match quiz.refresh_status().await {
      Ok(st) => println!(
        "Session {}: question {}/{}, score {}{}",
        st.session_id,
        st.current_question_number,
        st.total_questions,
        st.score,
        if st.is_complete { " (complete)" } else { "" }
      ),
      Err(e) => println!("Error: {e}"),
    },
    _ => {
      if let Err(e) = quiz.submit_answer(&line).await {
        println!("Error: {e}");
      }
    }
  }
  Ok(true)
}

fn print_feedback(fb: &AnswerFeedback) {
  if fb.correct {
    println!("\n{} You answered {}.", fb.message, fb.selected_answer);
  } else {
    println!("\n{} You answered {}, the correct answer is {}.", fb.message, fb.selected_answer, fb.correct_answer);
  }
  if !fb.explanation.is_empty() {
    println!("{}", fb.explanation);
  }
  println!("Score: {}", fb.current_score);
}

async fn feedback_screen<A: QuizApi>(quiz: &mut QuizController<A>, input: &mut Input) -> std::io::Result<bool> {
  let finished = match quiz.feedback() {
    Some(fb) => {
      print_feedback(fb);
      !fb.has_next_question()
    }
    None => false,
  };
  let label = if finished { "Enter to see your results ('x' cancel): " } else { "Enter for the next question ('x' cancel): " };
  let Some(line) = prompt(input, label).await? else {
    return Ok(false);
  };
  if line.trim().eq_ignore_ascii_case("x") {
    let _ = quiz.cancel();
    println!("Quiz cancelled.");
    return Ok(true);
  }
  if quiz.proceed().is_ok() && quiz.phase() == Phase::Playing {
    quiz.extend_session().await;
  }
  Ok(true)
}

fn print_summary(s: &SessionSummary) {
  println!("\n=== Quiz complete ===");
  println!("{} / {} correct ({}%)", s.correct_answers, s.total_questions, s.score);
  println!("Performance: {}", badge(&performance_badge(&s.performance)));
  println!("{} · {}", s.language.display_name(), s.difficulty.display_name());
}

async fn summary_screen<A: QuizApi>(quiz: &mut QuizController<A>, input: &mut Input) -> std::io::Result<bool> {
  if let Some(s) = quiz.summary() {
    print_summary(s);
  }
  let Some(_) = prompt(input, "Enter for a new quiz: ").await? else {
    return Ok(false);
  };
  quiz.reset_session();
  Ok(true)
}
