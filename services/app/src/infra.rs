use chrono::{Local, NaiveDate};
use ekoliv::config::StorageConfig;
use ekoliv::onboarding::{FormData, OnboardingQuestionnaire};
use ekoliv::session::{FileStore, SessionStore};
use ekoliv::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) questionnaire: Arc<OnboardingQuestionnaire>,
}

/// Session storage backed by the configured state file.
pub(crate) fn open_session_store(config: &StorageConfig) -> Result<SessionStore, AppError> {
    let store = FileStore::open(&config.state_file)?;
    tracing::debug!(path = %store.path().display(), "session storage opened");
    Ok(SessionStore::new(Arc::new(store)))
}

/// Reads onboarding answers from a JSON file keyed like the form
/// (`transportation`, `meatDairy`, ...). Missing keys stay unanswered.
pub(crate) fn load_answers(path: &Path) -> Result<FormData, AppError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|err| {
        AppError::BadRequest(format!(
            "failed to parse answers in {}: {err}",
            path.display()
        ))
    })
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
