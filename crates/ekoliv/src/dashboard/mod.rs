//! Dashboard data: today's meals, meal check-offs, activity logging and the
//! headline stats.

mod activity;
mod meals;
mod state;

pub use activity::{is_time_based, ActivityEntry, ActivityInputError, TIME_BASED_ACTIVITIES};
pub use meals::{select_todays_meals, MealChecklist, PendingToggle, ToggleOutcome};
pub use state::{DashboardState, DashboardStats, LOAD_FALLBACK_MESSAGE};
