#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use ekoliv::api::types::{
    AuthResponse, LoginRequest, OnboardingSummary, RegisterRequest, UserResponse,
};
use ekoliv::api::{ApiError, AuthGateway, OnboardingGateway};
use ekoliv::onboarding::{FormField, HealthPayload, LifestylePayload, OnboardingMachine};
use ekoliv::session::SessionStore;
use tokio_util::sync::CancellationToken;

pub const ISSUED_TOKEN: &str = "token-123";

/// In-process stand-in for the backend's auth and onboarding endpoints.
pub struct FakeBackend {
    store: SessionStore,
    calls: Mutex<Vec<&'static str>>,
    lifestyle: Mutex<Vec<LifestylePayload>>,
    health: Mutex<Vec<HealthPayload>>,
    failing_submissions: AtomicUsize,
}

impl FakeBackend {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            calls: Mutex::new(Vec::new()),
            lifestyle: Mutex::new(Vec::new()),
            health: Mutex::new(Vec::new()),
            failing_submissions: AtomicUsize::new(0),
        }
    }

    /// The next `count` lifestyle submissions fail with a server error.
    pub fn fail_next_submissions(&self, count: usize) {
        self.failing_submissions.store(count, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    pub fn lifestyle_submissions(&self) -> Vec<LifestylePayload> {
        self.lifestyle.lock().expect("lifestyle mutex poisoned").clone()
    }

    pub fn health_submissions(&self) -> Vec<HealthPayload> {
        self.health.lock().expect("health mutex poisoned").clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }
}

#[async_trait]
impl AuthGateway for FakeBackend {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.record("register");
        if request.email == "taken@example.com" {
            return Err(ApiError::from_status(
                400,
                r#"{"detail":"Email already registered"}"#,
            ));
        }
        self.store.set_token(ISSUED_TOKEN)?;
        Ok(AuthResponse {
            access_token: ISSUED_TOKEN.to_string(),
            token_type: "bearer".to_string(),
        })
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.record("login");
        if request.password == "wrong" {
            return Err(ApiError::from_status(
                401,
                r#"{"detail":"Incorrect email or password"}"#,
            ));
        }
        self.store.set_token(ISSUED_TOKEN)?;
        Ok(AuthResponse {
            access_token: ISSUED_TOKEN.to_string(),
            token_type: "bearer".to_string(),
        })
    }

    async fn current_user(&self) -> Result<UserResponse, ApiError> {
        self.record("me");
        Ok(UserResponse {
            id: 1,
            name: "Morgan".to_string(),
            email: "morgan@example.com".to_string(),
            created_at: None,
            updated_at: None,
        })
    }
}

#[async_trait]
impl OnboardingGateway for FakeBackend {
    async fn submit_lifestyle(&self, payload: &LifestylePayload) -> Result<(), ApiError> {
        self.record("lifestyle");
        let remaining = self.failing_submissions.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failing_submissions.store(remaining - 1, Ordering::SeqCst);
            return Err(ApiError::from_status(
                500,
                r#"{"detail":"Database unavailable"}"#,
            ));
        }
        self.lifestyle
            .lock()
            .expect("lifestyle mutex poisoned")
            .push(payload.clone());
        Ok(())
    }

    async fn submit_health(&self, payload: &HealthPayload) -> Result<(), ApiError> {
        self.record("health");
        self.health
            .lock()
            .expect("health mutex poisoned")
            .push(payload.clone());
        Ok(())
    }

    async fn summary(&self) -> Result<OnboardingSummary, ApiError> {
        self.record("summary");
        Err(ApiError::from_status(404, "{}"))
    }
}

/// Onboarding gateway whose submissions never finish.
pub struct StalledBackend;

#[async_trait]
impl OnboardingGateway for StalledBackend {
    async fn submit_lifestyle(&self, _payload: &LifestylePayload) -> Result<(), ApiError> {
        std::future::pending::<()>().await;
        Ok(())
    }

    async fn submit_health(&self, _payload: &HealthPayload) -> Result<(), ApiError> {
        std::future::pending::<()>().await;
        Ok(())
    }

    async fn summary(&self) -> Result<OnboardingSummary, ApiError> {
        std::future::pending::<()>().await;
        Err(ApiError::NoResponse)
    }
}

/// One valid answer per question, keyed by the step that asks it.
pub fn scenario_answers() -> Vec<(u8, Vec<(FormField, &'static str)>)> {
    vec![
        (1, vec![(FormField::Transportation, "walk")]),
        (2, vec![(FormField::MeatDairy, "never")]),
        (3, vec![(FormField::Shopping, "thrift")]),
        (4, vec![(FormField::Recycling, "sometimes")]),
        (5, vec![(FormField::Reusables, "often")]),
        (6, vec![(FormField::HomeEnergy, "mixed")]),
        (7, vec![(FormField::PaperDigital, "both")]),
        (8, vec![(FormField::PlaneTravel, "once")]),
        (9, vec![(FormField::FirstName, "Ava")]),
        (10, vec![(FormField::Gender, "female")]),
        (11, vec![(FormField::Age, "29")]),
        (12, vec![(FormField::Height, "168"), (FormField::Weight, "61")]),
        (13, vec![(FormField::WellnessGoal, "get-fit")]),
        (14, vec![(FormField::ActivityLevel, "very-active")]),
        (15, vec![(FormField::DietPreference, "vegetarian")]),
        (16, vec![]),
        (17, vec![(FormField::MedicalConditions, "none")]),
        (18, vec![(FormField::MealFrequency, "3-meals")]),
        (19, vec![(FormField::CookingSkill, "intermediate")]),
        (20, vec![(FormField::TimeAvailable, "30-60")]),
        (21, vec![(FormField::Budget, "medium")]),
        (22, vec![(FormField::Email, "ava@example.com")]),
    ]
}

/// Answers and advances through steps 1..=21, leaving the machine on the
/// contact step.
pub async fn answer_through_meal_planning<G>(
    machine: &mut OnboardingMachine,
    store: &SessionStore,
    gateway: &G,
) where
    G: OnboardingGateway + ?Sized,
{
    let cancel = CancellationToken::new();
    for (step, answers) in scenario_answers() {
        if step == 22 {
            break;
        }
        assert_eq!(machine.current_step().get(), step);
        for (field, value) in answers {
            machine.set_answer(field, value).expect("valid scenario answer");
        }
        let outcome = machine.next(store, gateway, &cancel).await;
        assert!(
            matches!(outcome, ekoliv::onboarding::StepOutcome::Advanced(_)),
            "step {step} did not advance: {outcome:?}"
        );
    }
}
