//! Per-session factor weights learned from thumbs-up/down feedback.
//!
//! Weights live in `[0.9, 1.3]`: a factor whose advice was always marked
//! helpful sits at 1.3, one that was never helpful at 0.9. They only rank
//! factors for display and notes context; they never change a risk score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const MIN_WEIGHT: f64 = 0.9;
const WEIGHT_SPAN: f64 = 0.4;
const NEUTRAL_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCounts {
    pub helpful: u32,
    pub not_helpful: u32,
}

impl FeedbackCounts {
    pub fn record(&mut self, helpful: bool) {
        if helpful {
            self.helpful += 1;
        } else {
            self.not_helpful += 1;
        }
    }

    /// Share of helpful votes, or 0.5 before any vote.
    pub fn helpful_ratio(&self) -> f64 {
        let total = self.helpful + self.not_helpful;
        if total == 0 {
            NEUTRAL_RATIO
        } else {
            f64::from(self.helpful) / f64::from(total)
        }
    }

    pub fn weight(&self) -> f64 {
        round_to_thousandths(MIN_WEIGHT + self.helpful_ratio() * WEIGHT_SPAN)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizationWeights {
    #[serde(default)]
    pub factor_weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub feedback_counts: BTreeMap<String, FeedbackCounts>,
}

impl PersonalizationWeights {
    /// Records one vote per listed factor. Repeated labels vote repeatedly.
    pub fn apply_feedback<S: AsRef<str>>(&mut self, factors: &[S], helpful: bool) {
        for factor in factors {
            let factor = factor.as_ref();
            let counts = self.feedback_counts.entry(factor.to_string()).or_default();
            counts.record(helpful);
            let weight = counts.weight();
            self.factor_weights.insert(factor.to_string(), weight);
        }
    }

    /// Highest weights first; ties resolve alphabetically by factor.
    pub fn top_weighted(&self, limit: usize) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> = self
            .factor_weights
            .iter()
            .map(|(factor, weight)| (factor.clone(), *weight))
            .collect();
        ranked.sort_by(|left, right| right.1.total_cmp(&left.1));
        ranked.truncate(limit);
        ranked
    }
}

/// Returns `current` with the feedback folded in.
pub fn adjust_weights<S: AsRef<str>>(
    mut current: PersonalizationWeights,
    factors: &[S],
    helpful: bool,
) -> PersonalizationWeights {
    current.apply_feedback(factors, helpful);
    current
}

fn round_to_thousandths(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistent_praise_reaches_the_ceiling() {
        let mut weights = PersonalizationWeights::default();
        for _ in 0..3 {
            weights = adjust_weights(weights, &["smoking"], true);
        }

        assert_eq!(weights.factor_weights["smoking"], 1.3);
        assert_eq!(
            weights.feedback_counts["smoking"],
            FeedbackCounts {
                helpful: 3,
                not_helpful: 0
            }
        );
    }

    #[test]
    fn single_negative_vote_hits_the_floor() {
        let weights = adjust_weights(PersonalizationWeights::default(), &["poor diet"], false);
        assert_eq!(weights.factor_weights["poor diet"], 0.9);
    }

    #[test]
    fn mixed_votes_round_to_three_places() {
        let mut weights = PersonalizationWeights::default();
        weights.apply_feedback(&["low exercise"], true);
        weights.apply_feedback(&["low exercise"], false);
        weights.apply_feedback(&["low exercise"], false);

        // 0.9 + (1/3) * 0.4 = 1.0333...
        assert_eq!(weights.factor_weights["low exercise"], 1.033);
    }

    #[test]
    fn duplicate_labels_count_twice() {
        let weights = adjust_weights(
            PersonalizationWeights::default(),
            &["smoking", "smoking"],
            true,
        );
        assert_eq!(weights.feedback_counts["smoking"].helpful, 2);
    }

    #[test]
    fn weights_stay_within_bounds() {
        let mut weights = PersonalizationWeights::default();
        for round in 0..50 {
            weights.apply_feedback(&["smoking"], round % 3 == 0);
            let weight = weights.factor_weights["smoking"];
            assert!((MIN_WEIGHT..=MIN_WEIGHT + WEIGHT_SPAN).contains(&weight));
        }
    }

    #[test]
    fn repeated_feedback_moves_monotonically() {
        let mut weights = PersonalizationWeights::default();
        weights.apply_feedback(&["poor diet"], true);
        let mut previous = weights.factor_weights["poor diet"];
        for _ in 0..10 {
            weights.apply_feedback(&["poor diet"], false);
            let current = weights.factor_weights["poor diet"];
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn untouched_counts_use_neutral_ratio() {
        assert_eq!(FeedbackCounts::default().helpful_ratio(), 0.5);
        assert_eq!(FeedbackCounts::default().weight(), 1.1);
    }

    #[test]
    fn top_weighted_ranks_descending() {
        let mut weights = PersonalizationWeights::default();
        weights.apply_feedback(&["poor diet"], false);
        weights.apply_feedback(&["smoking"], true);
        weights.apply_feedback(&["low exercise"], true);

        let ranked = weights.top_weighted(2);
        assert_eq!(
            ranked,
            vec![
                ("low exercise".to_string(), 1.3),
                ("smoking".to_string(), 1.3)
            ]
        );
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let weights = adjust_weights(PersonalizationWeights::default(), &["smoking"], false);
        let value = serde_json::to_value(&weights).expect("serializes");
        assert_eq!(value["factorWeights"]["smoking"], serde_json::json!(0.9));
        assert_eq!(
            value["feedbackCounts"]["smoking"],
            serde_json::json!({ "helpful": 0, "notHelpful": 1 })
        );
    }
}
