mod factors;
mod recommendations;
mod risk;
mod signals;

pub use factors::{extract_factors, FactorsResult, RiskFactor};
pub use recommendations::{generate_recommendations, RecommendationResult};
pub use risk::{classify_risk, RiskLevel, RiskResult};

use super::intake::Answers;
use tracing::debug;

/// Output of the factor, risk, and recommendation stages for one answer set.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub factors: FactorsResult,
    pub risk: RiskResult,
    pub recommendation: RecommendationResult,
}

/// Runs the scoring stages in order over already-normalized answers.
pub fn assess(answers: &Answers) -> Assessment {
    let factors = extract_factors(answers);
    let risk = classify_risk(answers, &factors.factors);
    let recommendation = generate_recommendations(&risk, &factors.factors);

    debug!(
        score = risk.score,
        level = risk.risk_level.label(),
        factors = factors.factors.len(),
        "assessed answers"
    );

    Assessment {
        factors,
        risk,
        recommendation,
    }
}
