use super::super::intake::Answers;

const LOW_ACTIVITY_KEYWORDS: [&str; 5] = ["never", "rarely", "seldom", "low", "sedentary"];
const POOR_DIET_KEYWORDS: [&str; 5] = ["high sugar", "high fat", "processed", "poor", "unhealthy"];

/// Lifestyle observations shared by factor extraction and risk scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LifestyleSignals {
    pub smoker: bool,
    pub low_activity: bool,
    pub poor_diet: bool,
    pub age: Option<f64>,
}

impl LifestyleSignals {
    pub(crate) fn from_answers(answers: &Answers) -> Self {
        Self {
            smoker: answers.smoker == Some(true),
            low_activity: mentions_any(answers.exercise.as_deref(), &LOW_ACTIVITY_KEYWORDS),
            poor_diet: mentions_any(answers.diet.as_deref(), &POOR_DIET_KEYWORDS),
            age: answers.age,
        }
    }
}

fn mentions_any(text: Option<&str>, keywords: &[&str]) -> bool {
    let text = text.unwrap_or_default().to_lowercase();
    keywords.iter().any(|keyword| text.contains(keyword))
}
