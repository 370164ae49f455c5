//! Wire types exchanged with the Ekoliv backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::onboarding::{HealthPayload, LifestylePayload};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingSummary {
    pub user_id: i64,
    pub lifestyle: Option<LifestylePayload>,
    pub health: Option<HealthPayload>,
    pub eco_score: f64,
    pub wellness_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardData {
    pub eco_score: f64,
    pub wellness_score: f64,
    pub total_carbon_savings: f64,
    pub total_calories_burned: f64,
    pub streak_days: u32,
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreData {
    pub eco_score: f64,
    pub wellness_score: f64,
    pub co2_saved: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressDataPoint {
    pub date: String,
    pub eco_score: f64,
    pub wellness_score: f64,
    pub steps: u32,
    pub calories_burned: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsData {
    pub wellness_score: f64,
    pub eco_score: f64,
    pub co2_saved: f64,
    #[serde(default)]
    pub health_progress_over_time: Vec<ProgressDataPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealDetail {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    #[serde(default)]
    pub carbon_footprint: f64,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub cooking_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_url: Option<String>,
}

/// One day of a seven-day plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMeals {
    pub day: u32,
    pub date: NaiveDate,
    pub breakfast: MealDetail,
    pub lunch: MealDetail,
    pub dinner: MealDetail,
    #[serde(default)]
    pub total_calories: f64,
    #[serde(default)]
    pub total_carbon: f64,
}

impl DayMeals {
    pub fn meal(&self, meal_type: MealType) -> &MealDetail {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: i64,
    pub user_id: i64,
    pub status: String,
    #[serde(default)]
    pub meals: Vec<DayMeals>,
    #[serde(default)]
    pub dietary_preference: Option<String>,
    #[serde(default)]
    pub calorie_target: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl MealPlan {
    pub const STATUS_COMPLETED: &'static str = "completed";

    pub fn is_completed(&self) -> bool {
        self.status == Self::STATUS_COMPLETED
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealPlanList {
    #[serde(default)]
    pub meal_plans: Vec<MealPlan>,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateMealPlanRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_preference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_target: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_ingredients: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Breakfast, Self::Lunch, Self::Dinner]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkMealRequest {
    pub date: NaiveDate,
    pub meal_type: MealType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_plan_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealConsumptionStatus {
    pub date: NaiveDate,
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
    #[serde(default)]
    pub total_consumed: u32,
    #[serde(default)]
    pub total_meals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealConsumptionRecord {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub meal_plan_id: Option<i64>,
    pub date: NaiveDate,
    pub meal_type: String,
    pub consumed: bool,
    #[serde(default)]
    pub consumed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkMealResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub meal_consumption: MealConsumptionRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityData {
    pub id: i64,
    pub user_id: i64,
    pub steps: Option<u32>,
    pub duration_minutes: Option<u32>,
    pub activity_type: Option<String>,
    pub calories_burned: Option<f64>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStepsRequest {
    pub date: NaiveDate,
    pub steps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddStepsResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub activity: ActivityData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityInsight {
    pub steps: u32,
    pub steps_goal: u32,
    pub percentage: f64,
    pub calories_burned: f64,
    #[serde(default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    pub goal_achieved: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealInsight {
    pub meals_consumed: u32,
    pub total_meals: u32,
    pub percentage: f64,
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieInsight {
    pub consumed: f64,
    pub target: f64,
    pub difference: f64,
    pub percentage: f64,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyInsights {
    pub date: NaiveDate,
    pub activity: ActivityInsight,
    pub meals: MealInsight,
    pub calories: CalorieInsight,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub total_steps: u32,
    pub avg_steps: f64,
    pub total_calories: f64,
    pub days_active: u32,
    pub goal_days: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSummary {
    pub meals_logged: u32,
    pub total_possible: u32,
    pub percentage: f64,
    pub breakfast_count: u32,
    pub lunch_count: u32,
    pub dinner_count: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyInsights {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub activity_summary: ActivitySummary,
    pub meal_summary: MealSummary,
    pub streak: u32,
    pub consistency_score: f64,
}
