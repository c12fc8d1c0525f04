use serde::{Deserialize, Serialize};

use super::super::intake::Answers;
use super::factors::RiskFactor;
use super::signals::LifestyleSignals;

const SMOKING_POINTS: u32 = 50;
const LOW_ACTIVITY_POINTS: u32 = 20;
const POOR_DIET_POINTS: u32 = 20;
const SENIOR_AGE: f64 = 65.0;
const SENIOR_POINTS: u32 = 10;
const MIDDLE_AGE: f64 = 45.0;
const MIDDLE_AGE_POINTS: u32 = 5;

const HIGH_THRESHOLD: u32 = 65;
const MODERATE_THRESHOLD: u32 = 35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const fn from_score(score: u32) -> Self {
        if score >= HIGH_THRESHOLD {
            Self::High
        } else if score >= MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskResult {
    pub risk_level: RiskLevel,
    pub score: u32,
    pub rationale: Vec<String>,
}

impl RiskResult {
    pub fn summary(&self) -> String {
        format!(
            "{} (score {}); rationale: {}",
            self.risk_level.label(),
            self.score,
            self.rationale.join(", ")
        )
    }
}

/// Additive, non-diagnostic lifestyle score. Age raises the score without
/// adding a rationale entry.
///
/// The extracted factors are accepted alongside the answers, but the score is
/// derived from the answers alone.
pub fn classify_risk(answers: &Answers, _factors: &[RiskFactor]) -> RiskResult {
    let signals = LifestyleSignals::from_answers(answers);
    let mut score = 0;
    let mut rationale = Vec::new();

    if signals.smoker {
        score += SMOKING_POINTS;
        rationale.push("smoking".to_string());
    }
    if signals.low_activity {
        score += LOW_ACTIVITY_POINTS;
        rationale.push("low activity".to_string());
    }
    if signals.poor_diet {
        score += POOR_DIET_POINTS;
        rationale.push("high sugar/poor diet".to_string());
    }
    score += match signals.age {
        Some(age) if age >= SENIOR_AGE => SENIOR_POINTS,
        Some(age) if age >= MIDDLE_AGE => MIDDLE_AGE_POINTS,
        _ => 0,
    };

    RiskResult {
        risk_level: RiskLevel::from_score(score),
        score,
        rationale,
    }
}
