//! Post-onboarding summary: the eco and wellness rings plus three tips.

use serde::Serialize;

use crate::onboarding::FormData;
use crate::scoring::{calculate_eco_score, EcoScoreResult};

const WELLNESS_BASE: u8 = 65;
const WELLNESS_MIN: u8 = 40;
const WELLNESS_MAX: u8 = 95;

/// What the results screen shows for one set of answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    pub first_name: Option<String>,
    /// Eco ring, 0-100. Same value as `eco.percentage`.
    pub eco_score: u8,
    /// Wellness ring, 40-95.
    pub wellness_score: u8,
    pub eco: EcoScoreResult,
    pub tips: Vec<Tip>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tip {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

impl ResultsSummary {
    pub fn from_form(form: &FormData) -> Self {
        let eco = calculate_eco_score(form);
        let eco_score = eco.percentage;
        let wellness_score = wellness_score(form);
        let first_name = Some(form.first_name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Self {
            first_name,
            eco_score,
            wellness_score,
            tips: tips_for(eco_score, wellness_score),
            eco,
        }
    }
}

/// Heuristic over activity level and diet preference.
pub fn wellness_score(form: &FormData) -> u8 {
    let mut score = WELLNESS_BASE;
    if matches!(
        form.activity_level.as_str(),
        "moderately-active" | "very-active"
    ) {
        score += 15;
    }
    if matches!(form.diet_preference.as_str(), "vegan" | "vegetarian") {
        score += 10;
    }
    score.clamp(WELLNESS_MIN, WELLNESS_MAX)
}

fn tips_for(eco_score: u8, wellness_score: u8) -> Vec<Tip> {
    let commute = if eco_score < 50 {
        Tip {
            icon: "🚲",
            title: "Switch to Green Transport",
            description: "Try biking or walking for short trips to reduce carbon emissions.",
        }
    } else {
        Tip {
            icon: "🌱",
            title: "Keep Up the Green Commute",
            description: "Your eco-friendly transportation choices are making a difference!",
        }
    };

    let movement = if wellness_score < 70 {
        Tip {
            icon: "🧘",
            title: "Boost Your Daily Movement",
            description: "Add 15 minutes of stretching or yoga to your morning routine.",
        }
    } else {
        Tip {
            icon: "💪",
            title: "Maintain Your Active Lifestyle",
            description: "Your commitment to wellness is inspiring. Keep it up!",
        }
    };

    vec![
        commute,
        movement,
        Tip {
            icon: "💧",
            title: "Stay Hydrated",
            description: "Aim for 8 glasses of water daily to support your wellness journey.",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        let mut value = serde_json::Map::new();
        for (key, answer) in pairs {
            value.insert((*key).to_string(), serde_json::Value::from(*answer));
        }
        serde_json::from_value(serde_json::Value::Object(value)).expect("form data")
    }

    #[test]
    fn low_eco_and_sedentary_get_improvement_tips() {
        let summary = ResultsSummary::from_form(&form(&[
            ("transportation", "drive"),
            ("activityLevel", "sedentary"),
        ]));

        assert_eq!(summary.wellness_score, 65);
        assert!(summary.eco_score < 50);
        let titles: Vec<&str> = summary.tips.iter().map(|tip| tip.title).collect();
        assert_eq!(
            titles,
            vec![
                "Switch to Green Transport",
                "Boost Your Daily Movement",
                "Stay Hydrated"
            ]
        );
        assert_eq!(summary.first_name, None);
    }

    #[test]
    fn eco_ring_matches_calculator() {
        let answers = form(&[
            ("transportation", "walk"),
            ("meatDairy", "never"),
            ("shopping", "thrift"),
            ("reusables", "always"),
            ("homeEnergy", "renewable"),
            ("planeTravel", "never"),
            ("firstName", "Ava"),
            ("activityLevel", "very-active"),
            ("dietPreference", "vegan"),
        ]);
        let summary = ResultsSummary::from_form(&answers);

        assert_eq!(summary.eco_score, calculate_eco_score(&answers).percentage);
        assert_eq!(summary.eco_score, 75);
        assert_eq!(summary.wellness_score, 90);
        assert_eq!(summary.first_name.as_deref(), Some("Ava"));
        assert_eq!(summary.tips[0].title, "Keep Up the Green Commute");
        assert_eq!(summary.tips[1].title, "Maintain Your Active Lifestyle");
    }
}
