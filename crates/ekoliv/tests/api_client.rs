use std::time::Duration;

use ekoliv::api::types::{LoginRequest, MealType};
use ekoliv::api::{ApiClient, ApiError, AuthGateway, DashboardGateway, OnboardingGateway};
use ekoliv::config::ApiConfig;
use ekoliv::onboarding::{FormData, HealthPayload, LifestylePayload};
use ekoliv::session::SessionStore;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(base_url: &str, store: &SessionStore) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
    };
    ApiClient::new(&config, store.clone()).expect("client builds")
}

#[tokio::test]
async fn login_stores_token_and_later_calls_send_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_partial_json(json!({ "email": "ava@example.com" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "jwt-abc", "token_type": "bearer" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Ava",
            "email": "ava@example.com",
            "created_at": "2025-01-01T00:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = SessionStore::in_memory();
    let client = client_for(&server.uri(), &store);

    client
        .login(&LoginRequest {
            email: "ava@example.com".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(store.token().as_deref(), Some("jwt-abc"));

    let user = client.current_user().await.unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.name, "Ava");
}

#[tokio::test]
async fn unauthorized_response_drops_the_stored_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Token expired" })),
        )
        .mount(&server)
        .await;

    let store = SessionStore::in_memory();
    store.set_token("stale").unwrap();
    let client = client_for(&server.uri(), &store);

    let err = client.dashboard().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Token expired");
    assert!(store.token().is_none());
}

#[tokio::test]
async fn error_bodies_prefer_detail_then_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/analytics/score"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Scores not ready" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/activities/today"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let store = SessionStore::in_memory();
    let client = client_for(&server.uri(), &store);

    let err = client.scores().await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.to_string(), "Scores not ready");

    let err = client.today_activity().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "An error occurred");
    assert_eq!(err.display_or("Failed to load dashboard data"), "Failed to load dashboard data");
}

#[tokio::test]
async fn unreachable_backend_reports_no_response() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let store = SessionStore::in_memory();
    let client = client_for(&format!("http://{address}"), &store);

    let err = client.today_meal_status().await.unwrap_err();
    assert!(matches!(err, ApiError::NoResponse));
    assert_eq!(
        err.to_string(),
        "No response from server. Please check your connection."
    );
}

#[tokio::test]
async fn lifestyle_submission_uses_backend_field_names() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/onboarding/lifestyle"))
        .and(body_partial_json(json!({
            "transportation_mode": "public",
            "diet_type": "occasionally",
            "reusable_items": false,
            "paper_preference": "mostly-digital"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let form = FormData {
        transportation: "public".to_string(),
        meat_dairy: "occasionally".to_string(),
        reusables: "sometimes".to_string(),
        paper_digital: "mostly-digital".to_string(),
        ..FormData::default()
    };

    let store = SessionStore::in_memory();
    store.set_token("jwt-abc").unwrap();
    let client = client_for(&server.uri(), &store);
    client
        .submit_lifestyle(&LifestylePayload::from_form(&form))
        .await
        .unwrap();
}

#[tokio::test]
async fn meal_plans_are_paged_through_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/meal-plans/user/my-plans"))
        .and(query_param("limit", "1"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meal_plans": [],
            "total": 0
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/meal-consumptions/mark"))
        .and(body_partial_json(json!({ "meal_type": "lunch", "date": "2025-03-04" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Meal marked as consumed",
            "meal_consumption": {
                "id": 3,
                "user_id": 7,
                "date": "2025-03-04",
                "meal_type": "lunch",
                "consumed": true
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = SessionStore::in_memory();
    let client = client_for(&server.uri(), &store);

    let plans = client.my_meal_plans(1, 0).await.unwrap();
    assert!(plans.meal_plans.is_empty());

    let response = client
        .mark_meal(&ekoliv::api::types::MarkMealRequest {
            date: chrono::NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            meal_type: MealType::Lunch,
            meal_plan_id: None,
        })
        .await
        .unwrap()
        .expect("mark response body");
    assert!(response.meal_consumption.consumed);
}

#[tokio::test]
async fn progress_insights_and_saved_answers_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/analytics/progress"))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "wellness_score": 72.0,
            "eco_score": 64.0,
            "co2_saved": 18.5,
            "health_progress_over_time": [
                { "date": "2026-03-04", "eco_score": 60.0, "wellness_score": 70.0, "steps": 8200, "calories_burned": 310.0 }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health-insights/weekly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "week_start": "2026-03-02",
            "week_end": "2026-03-08",
            "activity_summary": { "total_steps": 41000, "avg_steps": 5857.1, "total_calories": 1500.0, "days_active": 5, "goal_days": 7, "message": "Nice" },
            "meal_summary": { "meals_logged": 15, "total_possible": 21, "percentage": 71.4, "breakfast_count": 6, "lunch_count": 5, "dinner_count": 4, "message": "Keep going" },
            "streak": 4,
            "consistency_score": 71.0
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/onboarding/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": 7,
            "lifestyle": null,
            "health": null,
            "eco_score": 55.0,
            "wellness_score": 80.0
        })))
        .mount(&server)
        .await;

    let store = SessionStore::in_memory();
    let client = client_for(&server.uri(), &store);

    let progress = client.progress(7).await.unwrap();
    assert_eq!(progress.health_progress_over_time.len(), 1);
    assert_eq!(progress.health_progress_over_time[0].steps, 8200);

    let weekly = client.weekly_insights().await.unwrap();
    assert_eq!(weekly.streak, 4);
    assert_eq!(weekly.activity_summary.days_active, 5);
    assert_eq!(weekly.meal_summary.dinner_count, 4);

    let summary = client.summary().await.unwrap();
    assert_eq!(summary.user_id, 7);
    assert!(summary.lifestyle.is_none());
}

#[tokio::test]
async fn bodiless_acknowledgements_count_as_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/onboarding/lifestyle"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/onboarding/health"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/meal-consumptions/unmark"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = SessionStore::in_memory();
    let client = client_for(&server.uri(), &store);
    let form = FormData::default();

    client
        .submit_lifestyle(&LifestylePayload::from_form(&form))
        .await
        .expect("204 accepted");
    client
        .submit_health(&HealthPayload::from_form(&form))
        .await
        .expect("empty 201 accepted");

    let response = client
        .unmark_meal(&ekoliv::api::types::MarkMealRequest {
            date: chrono::NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            meal_type: MealType::Dinner,
            meal_plan_id: None,
        })
        .await
        .unwrap();
    assert!(response.is_none());
}
