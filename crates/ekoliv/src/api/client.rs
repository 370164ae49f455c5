use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::ApiError;
use super::gateway::{AuthGateway, DashboardGateway, OnboardingGateway};
use super::types::{
    AddStepsRequest, AddStepsResponse, ActivityData, AnalyticsData, AuthResponse, DailyInsights,
    DashboardData, GenerateMealPlanRequest, LoginRequest, MarkMealRequest, MarkMealResponse,
    MealConsumptionStatus, MealPlan, MealPlanList, OnboardingSummary, RegisterRequest, ScoreData,
    UserResponse, WeeklyInsights,
};
use crate::config::ApiConfig;
use crate::onboarding::{HealthPayload, LifestylePayload};
use crate::session::SessionStore;

/// JSON client for the Ekoliv backend. Reads the bearer token from the
/// session store on every call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionStore) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.http.get(self.url(path))).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    async fn post_acknowledged<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.dispatch(self.http.post(self.url(path)).json(body)).await?;
        Ok(())
    }

    /// Like `post`, but an empty 2xx body is a success without a payload.
    async fn post_optional<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.dispatch(self.http.post(self.url(path)).json(body)).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.dispatch(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// Attaches the bearer token and turns non-2xx answers into `ApiError`.
    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                if let Err(err) = self.session.clear_token() {
                    tracing::warn!(error = %err, "failed to drop rejected token");
                }
            }
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status.as_u16(), &body);
            tracing::debug!(status = status.as_u16(), error = %err, "backend rejected request");
            return Err(err);
        }

        Ok(response)
    }

    fn remember_token(&self, auth: &AuthResponse) -> Result<(), ApiError> {
        self.session.set_token(&auth.access_token)?;
        Ok(())
    }
}

#[async_trait]
impl AuthGateway for ApiClient {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let auth: AuthResponse = self.post("/auth/register", request).await?;
        self.remember_token(&auth)?;
        tracing::info!(email = %request.email, "registered account");
        Ok(auth)
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let auth: AuthResponse = self.post("/auth/login", request).await?;
        self.remember_token(&auth)?;
        tracing::info!(email = %request.email, "signed in");
        Ok(auth)
    }

    async fn current_user(&self) -> Result<UserResponse, ApiError> {
        self.get("/auth/me").await
    }
}

#[async_trait]
impl OnboardingGateway for ApiClient {
    async fn submit_lifestyle(&self, payload: &LifestylePayload) -> Result<(), ApiError> {
        self.post_acknowledged("/onboarding/lifestyle", payload).await
    }

    async fn submit_health(&self, payload: &HealthPayload) -> Result<(), ApiError> {
        self.post_acknowledged("/onboarding/health", payload).await
    }

    async fn summary(&self) -> Result<OnboardingSummary, ApiError> {
        self.get("/onboarding/summary").await
    }
}

#[async_trait]
impl DashboardGateway for ApiClient {
    async fn dashboard(&self) -> Result<DashboardData, ApiError> {
        self.get("/dashboard").await
    }

    async fn scores(&self) -> Result<ScoreData, ApiError> {
        self.get("/analytics/score").await
    }

    async fn progress(&self, days: u32) -> Result<AnalyticsData, ApiError> {
        self.get(&format!("/analytics/progress?days={days}")).await
    }

    async fn my_meal_plans(&self, limit: u32, offset: u32) -> Result<MealPlanList, ApiError> {
        self.get(&format!(
            "/meal-plans/user/my-plans?limit={limit}&offset={offset}"
        ))
        .await
    }

    async fn regenerate_meal_plan(
        &self,
        request: &GenerateMealPlanRequest,
    ) -> Result<MealPlan, ApiError> {
        self.post("/meal-plans/regenerate", request).await
    }

    async fn today_meal_status(&self) -> Result<MealConsumptionStatus, ApiError> {
        self.get("/meal-consumptions/today").await
    }

    async fn mark_meal(
        &self,
        request: &MarkMealRequest,
    ) -> Result<Option<MarkMealResponse>, ApiError> {
        self.post_optional("/meal-consumptions/mark", request).await
    }

    async fn unmark_meal(
        &self,
        request: &MarkMealRequest,
    ) -> Result<Option<MarkMealResponse>, ApiError> {
        self.post_optional("/meal-consumptions/unmark", request).await
    }

    async fn today_activity(&self) -> Result<ActivityData, ApiError> {
        self.get("/activities/today").await
    }

    async fn add_steps(&self, request: &AddStepsRequest) -> Result<AddStepsResponse, ApiError> {
        self.post("/activities/steps", request).await
    }

    async fn daily_insights(&self) -> Result<DailyInsights, ApiError> {
        self.get("/health-insights/daily").await
    }

    async fn weekly_insights(&self) -> Result<WeeklyInsights, ApiError> {
        self.get("/health-insights/weekly").await
    }
}
