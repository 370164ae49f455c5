//! Ekoliv core: eco scoring, the onboarding questionnaire, the session
//! shell, the dashboard and the backend client.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod onboarding;
pub mod results;
pub mod scoring;
pub mod session;
pub mod telemetry;

pub use error::AppError;
