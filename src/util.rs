//! Small utility helpers used across modules.

/// Log-safe truncation for large strings.
/// Avoids spamming logs with question text or backend error bodies.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let head: String = s.chars().take(max).collect();
    format!("{}… ({} bytes total)", head, s.len())
  }
}
