mod common;

use chrono::{DateTime, Duration, Utc};
use common::{scenario_answers, FakeBackend, ISSUED_TOKEN};
use ekoliv::api::types::{LoginRequest, RegisterRequest};
use ekoliv::config::SessionConfig;
use ekoliv::onboarding::{StepIndex, StepOutcome};
use ekoliv::session::{AppShell, SessionStore, ShellError, Surface, UserData};

fn register(email: &str) -> RegisterRequest {
    RegisterRequest {
        name: "Ava Green".to_string(),
        email: email.to_string(),
        password: "hunter22".to_string(),
    }
}

fn login(password: &str) -> LoginRequest {
    LoginRequest {
        email: "morgan@example.com".to_string(),
        password: password.to_string(),
    }
}

/// Walks the shell through every question and onto the results screen.
async fn finish_questionnaire(shell: &mut AppShell, backend: &FakeBackend) {
    shell.start_journey().unwrap();
    for (_, answers) in scenario_answers() {
        for (field, value) in answers {
            shell.set_answer(field, value).unwrap();
        }
        let outcome = shell.next_step(backend).await.unwrap();
        assert!(matches!(outcome, StepOutcome::Advanced(_)), "{outcome:?}");
    }
    assert_eq!(
        shell.onboarding().map(|machine| machine.current_step()),
        Some(StepIndex::SUMMARY)
    );
    shell.complete_onboarding().unwrap();
}

#[tokio::test]
async fn guest_signs_up_after_results_and_answers_are_submitted() {
    let store = SessionStore::in_memory();
    let backend = FakeBackend::new(store.clone());
    let mut shell = AppShell::hydrate(store.clone(), SessionConfig::default());
    assert!(matches!(shell.surface(), Surface::Landing));

    finish_questionnaire(&mut shell, &backend).await;
    assert!(backend.calls().is_empty(), "guests save nothing mid-flow");
    let Surface::Results(summary) = shell.surface() else {
        panic!("expected results, got {}", shell.surface().name());
    };
    assert_eq!(summary.first_name.as_deref(), Some("Ava"));
    assert_eq!(
        store.user(),
        Some(UserData {
            name: "Ava".to_string(),
            email: "ava@example.com".to_string(),
        })
    );

    shell.results_continue().unwrap();
    assert!(matches!(shell.surface(), Surface::SignUp));
    assert!(shell.context().pending_dashboard_access);

    shell
        .sign_up(&register("ava@example.com"), &backend, &backend)
        .await
        .unwrap();
    assert!(matches!(shell.surface(), Surface::Welcome));
    assert_eq!(backend.calls(), vec!["register", "lifestyle", "health"]);
    assert!(!shell.context().pending_dashboard_access);
    assert!(shell.context().answers.is_none());
    assert_eq!(store.token().as_deref(), Some(ISSUED_TOKEN));

    shell.welcome_closed().unwrap();
    assert!(matches!(shell.surface(), Surface::Dashboard));
    assert!(store.seen_welcome());
}

#[tokio::test]
async fn direct_sign_up_starts_onboarding() {
    let store = SessionStore::in_memory();
    let backend = FakeBackend::new(store.clone());
    let mut shell = AppShell::hydrate(store.clone(), SessionConfig::default());

    shell.open_sign_up().unwrap();
    shell
        .sign_up(&register("new@example.com"), &backend, &backend)
        .await
        .unwrap();

    let machine = shell.onboarding().expect("onboarding surface");
    assert_eq!(machine.current_step(), StepIndex::FIRST);
    assert_eq!(backend.calls(), vec!["register"]);
    assert_eq!(store.user().map(|user| user.name), Some("Ava Green".to_string()));
    assert!(!store.seen_welcome());
}

#[tokio::test]
async fn returning_user_signs_in_straight_to_dashboard() {
    let store = SessionStore::in_memory();
    let backend = FakeBackend::new(store.clone());
    let mut shell = AppShell::hydrate(store.clone(), SessionConfig::default());

    shell.open_sign_in().unwrap();
    shell.sign_in(&login("hunter22"), &backend).await.unwrap();

    assert!(matches!(shell.surface(), Surface::Dashboard));
    assert_eq!(backend.calls(), vec!["login", "me"]);
    assert!(store.seen_welcome());
    assert_eq!(
        shell.context().user.as_ref().map(|user| user.email.as_str()),
        Some("morgan@example.com")
    );

    let reopened = AppShell::hydrate(store.clone(), SessionConfig::default());
    assert!(matches!(reopened.surface(), Surface::Dashboard));
}

#[tokio::test]
async fn signing_in_with_pending_access_shows_welcome() {
    let store = SessionStore::in_memory();
    let backend = FakeBackend::new(store.clone());
    let mut shell = AppShell::hydrate(store.clone(), SessionConfig::default());

    finish_questionnaire(&mut shell, &backend).await;
    shell.results_continue().unwrap();
    shell.open_sign_in().unwrap();
    shell.sign_in(&login("hunter22"), &backend).await.unwrap();

    assert!(matches!(shell.surface(), Surface::Welcome));
    assert!(!shell.context().pending_dashboard_access);
    assert!(!store.seen_welcome());
    assert_eq!(store.user().map(|user| user.name), Some("Morgan".to_string()));
}

#[tokio::test]
async fn rejected_credentials_keep_the_form_open() {
    let store = SessionStore::in_memory();
    let backend = FakeBackend::new(store.clone());
    let mut shell = AppShell::hydrate(store.clone(), SessionConfig::default());

    shell.open_sign_in().unwrap();
    let err = shell.sign_in(&login("wrong"), &backend).await.unwrap_err();
    assert!(matches!(&err, ShellError::Auth(message) if message == "Incorrect email or password"));
    assert!(matches!(shell.surface(), Surface::SignIn));
    assert!(store.user().is_none());

    shell.open_sign_up().unwrap();
    let err = shell
        .sign_up(&register("taken@example.com"), &backend, &backend)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Email already registered");
    assert!(matches!(shell.surface(), Surface::SignUp));
}

#[tokio::test]
async fn failed_deferred_submission_still_reaches_welcome() {
    let store = SessionStore::in_memory();
    let backend = FakeBackend::new(store.clone());
    let mut shell = AppShell::hydrate(store.clone(), SessionConfig::default());

    finish_questionnaire(&mut shell, &backend).await;
    shell.results_continue().unwrap();
    backend.fail_next_submissions(1);
    shell
        .sign_up(&register("ava@example.com"), &backend, &backend)
        .await
        .unwrap();

    assert!(matches!(shell.surface(), Surface::Welcome));
    assert_eq!(backend.calls(), vec!["register", "lifestyle"]);
}

fn two_hours_later() -> DateTime<Utc> {
    Utc::now() + Duration::hours(2)
}

#[tokio::test]
async fn expired_guest_answers_fall_back_to_onboarding() {
    let store = SessionStore::in_memory();
    let backend = FakeBackend::new(store.clone());
    let policy = SessionConfig {
        guest_answers_ttl: Some(Duration::minutes(30)),
    };
    let mut shell = AppShell::hydrate(store.clone(), policy);

    finish_questionnaire(&mut shell, &backend).await;
    shell.results_continue().unwrap();

    let mut shell = shell.with_clock(two_hours_later);
    shell
        .sign_up(&register("ava@example.com"), &backend, &backend)
        .await
        .unwrap();

    assert!(shell.onboarding().is_some());
    assert_eq!(backend.calls(), vec!["register"]);
    assert!(shell.context().answers.is_none());
}

#[tokio::test]
async fn closing_onboarding_forgets_provisional_identity() {
    let store = SessionStore::in_memory();
    let backend = FakeBackend::new(store.clone());
    let mut shell = AppShell::hydrate(store.clone(), SessionConfig::default());

    finish_questionnaire(&mut shell, &backend).await;
    shell.results_back().unwrap();
    let machine = shell.onboarding().expect("resumed onboarding");
    assert_eq!(machine.current_step(), StepIndex::CONTACT);
    assert_eq!(machine.form().first_name, "Ava");

    shell.close_onboarding().unwrap();
    assert!(matches!(shell.surface(), Surface::Landing));
    assert!(store.user().is_none());
    assert!(shell.context().user.is_none());
}

#[test]
fn welcome_flag_without_identity_is_ignored() {
    let store = SessionStore::in_memory();
    store.mark_seen_welcome().unwrap();
    let shell = AppShell::hydrate(store.clone(), SessionConfig::default());
    assert!(matches!(shell.surface(), Surface::Landing));
    assert!(!shell.context().has_seen_welcome);

    store
        .set_user(&UserData {
            name: "Ava".to_string(),
            email: "ava@example.com".to_string(),
        })
        .unwrap();
    let shell = AppShell::hydrate(store, SessionConfig::default());
    assert!(matches!(shell.surface(), Surface::Dashboard));
}

#[test]
fn logout_clears_everything_and_returns_to_landing() {
    let store = SessionStore::in_memory();
    store.set_token(ISSUED_TOKEN).unwrap();
    store
        .set_user(&UserData {
            name: "Ava".to_string(),
            email: "ava@example.com".to_string(),
        })
        .unwrap();
    store.mark_seen_welcome().unwrap();

    let mut shell = AppShell::hydrate(store.clone(), SessionConfig::default());
    let token = shell.cancellation();
    shell.logout().unwrap();

    assert!(matches!(shell.surface(), Surface::Landing));
    assert!(token.is_cancelled());
    assert!(store.token().is_none());
    assert!(store.user().is_none());
    assert!(!store.seen_welcome());

    let reloaded = AppShell::hydrate(store, SessionConfig::default());
    assert!(matches!(reloaded.surface(), Surface::Landing));
}

#[test]
fn fresh_session_begins_at_the_first_question() {
    let mut shell = AppShell::hydrate(SessionStore::in_memory(), SessionConfig::default());
    assert!(matches!(shell.surface(), Surface::Landing));

    shell.start_journey().unwrap();
    let machine = shell.onboarding().expect("onboarding surface");
    assert_eq!(machine.current_step(), StepIndex::FIRST);
    assert_eq!(machine.progress_percent(), 4);
}

#[test]
fn actions_outside_their_surface_are_rejected() {
    let mut shell = AppShell::hydrate(SessionStore::in_memory(), SessionConfig::default());
    let err = shell.results_continue().unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot continue from results while on the landing screen"
    );
    assert!(shell.welcome_closed().is_err());
}
