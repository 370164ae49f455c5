//! REST client for the Ekoliv backend and the async seams the rest of the
//! crate depends on instead of the concrete client.

mod client;
mod error;
mod gateway;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use gateway::{AuthGateway, DashboardGateway, OnboardingGateway};
