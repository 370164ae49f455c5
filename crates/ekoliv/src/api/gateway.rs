use async_trait::async_trait;

use super::error::ApiError;
use super::types::{
    AddStepsRequest, AddStepsResponse, ActivityData, AnalyticsData, AuthResponse, DailyInsights,
    DashboardData, GenerateMealPlanRequest, LoginRequest, MarkMealRequest, MarkMealResponse,
    MealConsumptionStatus, MealPlan, MealPlanList, OnboardingSummary, RegisterRequest, ScoreData,
    UserResponse, WeeklyInsights,
};
use crate::onboarding::{HealthPayload, LifestylePayload};

/// Identity endpoints. Successful `register`/`login` persist the bearer token.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;
    async fn current_user(&self) -> Result<UserResponse, ApiError>;
}

#[async_trait]
pub trait OnboardingGateway: Send + Sync {
    async fn submit_lifestyle(&self, payload: &LifestylePayload) -> Result<(), ApiError>;
    async fn submit_health(&self, payload: &HealthPayload) -> Result<(), ApiError>;
    async fn summary(&self) -> Result<OnboardingSummary, ApiError>;
}

/// Everything the dashboard reads or writes.
#[async_trait]
pub trait DashboardGateway: Send + Sync {
    async fn dashboard(&self) -> Result<DashboardData, ApiError>;
    async fn scores(&self) -> Result<ScoreData, ApiError>;
    async fn progress(&self, days: u32) -> Result<AnalyticsData, ApiError>;
    async fn my_meal_plans(&self, limit: u32, offset: u32) -> Result<MealPlanList, ApiError>;
    async fn regenerate_meal_plan(
        &self,
        request: &GenerateMealPlanRequest,
    ) -> Result<MealPlan, ApiError>;
    async fn today_meal_status(&self) -> Result<MealConsumptionStatus, ApiError>;
    /// `None` when the backend acknowledges without a body.
    async fn mark_meal(
        &self,
        request: &MarkMealRequest,
    ) -> Result<Option<MarkMealResponse>, ApiError>;
    async fn unmark_meal(
        &self,
        request: &MarkMealRequest,
    ) -> Result<Option<MarkMealResponse>, ApiError>;
    async fn today_activity(&self) -> Result<ActivityData, ApiError>;
    async fn add_steps(&self, request: &AddStepsRequest) -> Result<AddStepsResponse, ApiError>;
    async fn daily_insights(&self) -> Result<DailyInsights, ApiError>;
    async fn weekly_insights(&self) -> Result<WeeklyInsights, ApiError>;
}
