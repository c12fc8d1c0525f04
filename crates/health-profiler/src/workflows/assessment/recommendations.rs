use serde::{Deserialize, Serialize};

use super::super::intake::ProfileStatus;
use super::factors::RiskFactor;
use super::risk::{RiskLevel, RiskResult};

const QUIT_SMOKING: &str = "Quit smoking (seek professional support)";
const IMPROVE_DIET: &str = "Reduce sugar and ultra-processed foods";
const MOVE_MORE: &str = "Walk 30 minutes daily and add light strength work";
const MAINTAIN: &str = "Maintain balanced diet and regular physical activity";

/// Advice emitted in priority order when its factor is present.
const ADVICE: [(RiskFactor, &str); 3] = [
    (RiskFactor::Smoking, QUIT_SMOKING),
    (RiskFactor::PoorDiet, IMPROVE_DIET),
    (RiskFactor::LowExercise, MOVE_MORE),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub risk_level: RiskLevel,
    pub factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
    pub status: ProfileStatus,
}

/// Maps factors to fixed advice; falls back to general upkeep advice.
pub fn generate_recommendations(risk: &RiskResult, factors: &[RiskFactor]) -> RecommendationResult {
    let mut recommendations: Vec<String> = ADVICE
        .iter()
        .filter(|(factor, _)| factors.contains(factor))
        .map(|(_, advice)| advice.to_string())
        .collect();

    if recommendations.is_empty() {
        recommendations.push(MAINTAIN.to_string());
    }

    RecommendationResult {
        risk_level: risk.risk_level,
        factors: factors.to_vec(),
        recommendations,
        status: ProfileStatus::Ok,
    }
}
