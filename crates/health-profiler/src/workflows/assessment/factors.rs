use std::fmt;

use serde::{Deserialize, Serialize};

use super::super::intake::Answers;
use super::signals::LifestyleSignals;

const BASE_CONFIDENCE: f64 = 0.80;
const SMOKER_CONFIDENCE_BONUS: f64 = 0.05;
const AGE_CONFIDENCE_BONUS: f64 = 0.03;
const MAX_FACTOR_CONFIDENCE: f64 = 0.95;

/// Named lifestyle contributor to the heuristic risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskFactor {
    #[serde(rename = "smoking")]
    Smoking,
    #[serde(rename = "low exercise")]
    LowExercise,
    #[serde(rename = "poor diet")]
    PoorDiet,
}

impl RiskFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Smoking => "smoking",
            Self::LowExercise => "low exercise",
            Self::PoorDiet => "poor diet",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorsResult {
    pub factors: Vec<RiskFactor>,
    pub confidence: f64,
}

/// Derives factors in a fixed order: smoking, low exercise, poor diet.
pub fn extract_factors(answers: &Answers) -> FactorsResult {
    let signals = LifestyleSignals::from_answers(answers);
    let mut factors = Vec::new();
    let mut confidence = BASE_CONFIDENCE;

    if signals.smoker {
        factors.push(RiskFactor::Smoking);
        confidence += SMOKER_CONFIDENCE_BONUS;
    }
    if signals.low_activity {
        factors.push(RiskFactor::LowExercise);
    }
    if signals.poor_diet {
        factors.push(RiskFactor::PoorDiet);
    }
    // Age is not a factor but a known age makes the extraction more certain.
    if signals.age.is_some_and(f64::is_finite) {
        confidence += AGE_CONFIDENCE_BONUS;
    }

    FactorsResult {
        factors,
        confidence: confidence.min(MAX_FACTOR_CONFIDENCE),
    }
}
