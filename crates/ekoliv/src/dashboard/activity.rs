use chrono::NaiveDate;

use crate::api::types::AddStepsRequest;

/// Activities logged by duration rather than step count.
pub const TIME_BASED_ACTIVITIES: [&str; 5] =
    ["cycling", "gym", "swimming", "football", "other_sports"];

pub const DEFAULT_ACTIVITY: &str = "walking";

pub fn is_time_based(activity_type: &str) -> bool {
    TIME_BASED_ACTIVITIES.contains(&activity_type)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActivityInputError {
    #[error("Please enter a valid duration in minutes")]
    InvalidDuration,
    #[error("Please enter a valid number of steps")]
    InvalidSteps,
}

/// A validated activity log entry for today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub activity_type: String,
    pub steps: u32,
    pub duration_minutes: Option<u32>,
}

impl ActivityEntry {
    /// Reads the amount typed for `activity_type`: minutes for time-based
    /// activities, steps otherwise. An empty type means walking.
    pub fn parse(activity_type: &str, amount: &str) -> Result<Self, ActivityInputError> {
        let activity_type = match activity_type.trim() {
            "" => DEFAULT_ACTIVITY,
            other => other,
        };
        let amount = amount.trim().parse::<u32>().ok();

        if is_time_based(activity_type) {
            let minutes = amount.ok_or(ActivityInputError::InvalidDuration)?;
            Ok(Self {
                activity_type: activity_type.to_string(),
                steps: 0,
                duration_minutes: Some(minutes),
            })
        } else {
            let steps = amount.ok_or(ActivityInputError::InvalidSteps)?;
            Ok(Self {
                activity_type: activity_type.to_string(),
                steps,
                duration_minutes: None,
            })
        }
    }

    pub fn is_time_based(&self) -> bool {
        self.duration_minutes.is_some()
    }

    pub fn request(&self, date: NaiveDate) -> AddStepsRequest {
        AddStepsRequest {
            date,
            steps: self.steps,
            activity_type: Some(self.activity_type.clone()),
            duration_minutes: self.duration_minutes,
        }
    }

    /// Text shown when saving the entry fails.
    pub fn failure_message(&self) -> &'static str {
        if self.is_time_based() {
            "Failed to save activity. Please try again."
        } else {
            "Failed to save steps. Please try again."
        }
    }
}
