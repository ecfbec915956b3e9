//! Presentation mapping for backend codes: label + severity tier.
//! Unknown codes never fail; they fall back to `Tier::Neutral`.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
  Success,
  Info,
  Warning,
  Danger,
  Neutral,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Badge {
  pub label: String,
  pub tier: Tier,
}

impl Badge {
  fn new(label: &str, tier: Tier) -> Self {
    Self { label: label.to_string(), tier }
  }

  fn fallback(raw: &str) -> Self {
    let label = raw.trim();
    Self::new(if label.is_empty() { "Unknown" } else { label }, Tier::Neutral)
  }
}

pub fn difficulty_badge(code: &str) -> Badge {
  match crate::validate::normalize(code).as_str() {
    "beginner" => Badge::new("Beginner", Tier::Success),
    "intermediate" => Badge::new("Intermediate", Tier::Warning),
    "advanced" => Badge::new("Advanced", Tier::Danger),
    _ => Badge::fallback(code),
  }
}

pub fn confidence_badge(code: &str) -> Badge {
  match crate::validate::normalize(code).as_str() {
    "high" => Badge::new("High confidence", Tier::Success),
    "medium" => Badge::new("Medium confidence", Tier::Warning),
    "low" => Badge::new("Low confidence", Tier::Danger),
    _ => Badge::fallback(code),
  }
}

// Performance tiers as labelled by the backend summary.
pub fn performance_badge(code: &str) -> Badge {
  match crate::validate::normalize(code).replace(|c: char| c == ' ' || c == '-', "_").as_str() {
    "excellent" => Badge::new("Excellent", Tier::Success),
    "good" => Badge::new("Good", Tier::Info),
    "fair" | "average" => Badge::new("Fair", Tier::Warning),
    "needs_improvement" | "poor" => Badge::new("Needs improvement", Tier::Danger),
    _ => Badge::fallback(code),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_codes_map_case_insensitively() {
    assert_eq!(difficulty_badge(" ADVANCED ").tier, Tier::Danger);
    assert_eq!(confidence_badge("High").label, "High confidence");
    assert_eq!(performance_badge("Needs Improvement").tier, Tier::Danger);
    assert_eq!(performance_badge("needs-improvement").label, "Needs improvement");
  }

  #[test]
  fn unknown_codes_fall_back_to_neutral() {
    assert_eq!(difficulty_badge("legendary"), Badge { label: "legendary".into(), tier: Tier::Neutral });
    assert_eq!(confidence_badge("").label, "Unknown");
    assert_eq!(performance_badge("???").tier, Tier::Neutral);
  }
}
