use serde::{Deserialize, Serialize};

use super::domain::FormData;
use crate::api::{ApiError, OnboardingGateway};

/// Lifestyle answers in the shape `POST /onboarding/lifestyle` expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestylePayload {
    pub transportation_mode: String,
    pub diet_type: String,
    pub shopping_pattern: String,
    pub recycling_habits: String,
    pub reusable_items: bool,
    pub energy_source: String,
    pub travel_frequency: String,
    pub paper_preference: String,
}

impl LifestylePayload {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            transportation_mode: form.transportation.clone(),
            diet_type: form.meat_dairy.clone(),
            shopping_pattern: form.shopping.clone(),
            recycling_habits: form.recycling.clone(),
            reusable_items: matches!(form.reusables.as_str(), "always" | "often"),
            energy_source: form.home_energy.clone(),
            travel_frequency: form.plane_travel.clone(),
            paper_preference: form.paper_digital.clone(),
        }
    }
}

/// Health and meal-planning answers in the shape `POST /onboarding/health` expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthPayload {
    pub gender: String,
    pub age: Option<u32>,
    pub height: Option<f32>,
    pub weight: Option<f32>,
    pub activity_level: String,
    pub wellness_goal: String,
    pub dietary_preference: String,
    pub allergies: Vec<String>,
    pub medical_conditions: Vec<String>,
    pub meal_frequency: String,
    pub cooking_skill: String,
    pub time_available: String,
    pub budget: String,
}

impl HealthPayload {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            gender: form.gender.clone(),
            age: form.age_years(),
            height: form.height_cm(),
            weight: form.weight_kg(),
            activity_level: form.activity_level.clone(),
            wellness_goal: form.wellness_goal.clone(),
            dietary_preference: form.diet_preference.clone(),
            allergies: single_or_empty(&form.allergies),
            medical_conditions: single_or_empty(&form.medical_conditions),
            meal_frequency: form.meal_frequency.clone(),
            cooking_skill: form.cooking_skill.clone(),
            time_available: form.time_available.clone(),
            budget: form.budget.clone(),
        }
    }
}

fn single_or_empty(value: &str) -> Vec<String> {
    if value.is_empty() {
        Vec::new()
    } else {
        vec![value.to_string()]
    }
}

/// Both submissions built from one snapshot; lifestyle is always sent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingSubmission {
    pub lifestyle: LifestylePayload,
    pub health: HealthPayload,
}

impl OnboardingSubmission {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            lifestyle: LifestylePayload::from_form(form),
            health: HealthPayload::from_form(form),
        }
    }

    /// Sends lifestyle, then health. Health is not attempted if lifestyle fails.
    pub async fn send<G>(&self, gateway: &G) -> Result<(), ApiError>
    where
        G: OnboardingGateway + ?Sized,
    {
        gateway.submit_lifestyle(&self.lifestyle).await?;
        gateway.submit_health(&self.health).await?;
        tracing::info!("onboarding answers submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reusables_collapse_to_a_flag() {
        let mut form = FormData {
            reusables: "often".to_string(),
            ..FormData::default()
        };
        assert!(LifestylePayload::from_form(&form).reusable_items);

        form.reusables = "sometimes".to_string();
        assert!(!LifestylePayload::from_form(&form).reusable_items);
    }

    #[test]
    fn health_payload_parses_numbers_and_wraps_lists() {
        let form = FormData {
            gender: "female".to_string(),
            age: "34".to_string(),
            height: "165".to_string(),
            weight: "58.2".to_string(),
            allergies: "nuts-soy".to_string(),
            diet_preference: "vegan".to_string(),
            ..FormData::default()
        };

        let payload = HealthPayload::from_form(&form);
        assert_eq!(payload.age, Some(34));
        assert_eq!(payload.height, Some(165.0));
        assert_eq!(payload.weight, Some(58.2));
        assert_eq!(payload.allergies, vec!["nuts-soy".to_string()]);
        assert!(payload.medical_conditions.is_empty());
        assert_eq!(payload.dietary_preference, "vegan");

        let json = serde_json::to_value(&payload).expect("serializes");
        assert_eq!(json["dietary_preference"], "vegan");
        assert_eq!(json["medical_conditions"], serde_json::json!([]));
    }

    #[test]
    fn lifestyle_payload_uses_backend_field_names() {
        let form = FormData {
            transportation: "walk".to_string(),
            meat_dairy: "never".to_string(),
            plane_travel: "once".to_string(),
            paper_digital: "both".to_string(),
            ..FormData::default()
        };
        let json = serde_json::to_value(LifestylePayload::from_form(&form)).expect("serializes");
        assert_eq!(json["transportation_mode"], "walk");
        assert_eq!(json["diet_type"], "never");
        assert_eq!(json["travel_frequency"], "once");
        assert_eq!(json["paper_preference"], "both");
    }
}
