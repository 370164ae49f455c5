use chrono::NaiveDate;
use serde::Serialize;

use crate::api::types::{DayMeals, MarkMealRequest, MealConsumptionStatus, MealPlan, MealType};
use crate::api::{ApiError, DashboardGateway};

/// Picks today's meals from the newest plan. Only completed plans count;
/// outside the seven-day window the first day is shown.
pub fn select_todays_meals(plan: &MealPlan, today: NaiveDate) -> Option<&DayMeals> {
    if !plan.is_completed() {
        return None;
    }
    let first = plan.meals.first()?;
    let offset = (today - first.date).num_days();
    if (0..7).contains(&offset) {
        if let Some(day) = plan.meals.get(offset as usize) {
            return Some(day);
        }
    }
    Some(first)
}

/// Which of today's three meals are ticked off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MealChecklist {
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
}

impl MealChecklist {
    pub fn from_status(status: &MealConsumptionStatus) -> Self {
        Self {
            breakfast: status.breakfast,
            lunch: status.lunch,
            dinner: status.dinner,
        }
    }

    pub fn is_checked(&self, meal_type: MealType) -> bool {
        match meal_type {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
        }
    }

    fn set(&mut self, meal_type: MealType, checked: bool) {
        match meal_type {
            MealType::Breakfast => self.breakfast = checked,
            MealType::Lunch => self.lunch = checked,
            MealType::Dinner => self.dinner = checked,
        }
    }

    pub fn consumed(&self) -> usize {
        MealType::ordered()
            .into_iter()
            .filter(|meal| self.is_checked(*meal))
            .count()
    }

    /// Flips the meal locally and returns the change still to be confirmed.
    pub fn begin_toggle(&mut self, meal_type: MealType, date: NaiveDate) -> PendingToggle {
        let previous = self.is_checked(meal_type);
        self.set(meal_type, !previous);
        PendingToggle {
            meal_type,
            date,
            previous,
        }
    }
}

/// A locally applied toggle awaiting the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToggle {
    meal_type: MealType,
    date: NaiveDate,
    previous: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Confirmed { status: MealConsumptionStatus },
    RolledBack { reason: String },
}

impl PendingToggle {
    pub fn meal_type(&self) -> MealType {
        self.meal_type
    }

    pub fn checked(&self) -> bool {
        !self.previous
    }

    pub fn request(&self) -> MarkMealRequest {
        MarkMealRequest {
            date: self.date,
            meal_type: self.meal_type,
            meal_plan_id: None,
        }
    }

    /// Marks or unmarks the meal, then refetches today's status.
    pub async fn send<G>(&self, gateway: &G) -> Result<MealConsumptionStatus, ApiError>
    where
        G: DashboardGateway + ?Sized,
    {
        let request = self.request();
        if self.previous {
            gateway.unmark_meal(&request).await?;
        } else {
            gateway.mark_meal(&request).await?;
        }
        gateway.today_meal_status().await
    }

    /// Keeps the local flip on success, restores the previous value otherwise.
    pub fn settle(
        self,
        checklist: &mut MealChecklist,
        result: Result<MealConsumptionStatus, ApiError>,
    ) -> ToggleOutcome {
        match result {
            Ok(status) => ToggleOutcome::Confirmed { status },
            Err(err) => {
                tracing::warn!(
                    meal = self.meal_type.label(),
                    error = %err,
                    "meal toggle rolled back"
                );
                checklist.set(self.meal_type, self.previous);
                ToggleOutcome::RolledBack {
                    reason: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::MealDetail;

    fn meal(name: &str) -> MealDetail {
        MealDetail {
            name: name.to_string(),
            description: String::new(),
            calories: 400.0,
            protein: 0.0,
            carbs: 0.0,
            fats: 0.0,
            carbon_footprint: 0.5,
            ingredients: Vec::new(),
            cooking_time: 15,
            recipe_url: None,
        }
    }

    fn plan(status: &str, start: NaiveDate, days: u32) -> MealPlan {
        MealPlan {
            id: 7,
            user_id: 1,
            status: status.to_string(),
            meals: (0..days)
                .map(|offset| DayMeals {
                    day: offset + 1,
                    date: start + chrono::Duration::days(i64::from(offset)),
                    breakfast: meal("oats"),
                    lunch: meal("salad"),
                    dinner: meal("curry"),
                    total_calories: 1200.0,
                    total_carbon: 1.5,
                })
                .collect(),
            dietary_preference: None,
            calorie_target: None,
            created_at: None,
            completed_at: None,
            error_message: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn picks_day_matching_today_within_window() {
        let plan = plan("completed", date(2026, 3, 2), 7);
        let day = select_todays_meals(&plan, date(2026, 3, 5)).expect("meals");
        assert_eq!(day.day, 4);
    }

    #[test]
    fn falls_back_to_first_day_outside_window() {
        let plan = plan("completed", date(2026, 3, 2), 7);
        assert_eq!(select_todays_meals(&plan, date(2026, 3, 9)).map(|d| d.day), Some(1));
        assert_eq!(select_todays_meals(&plan, date(2026, 3, 1)).map(|d| d.day), Some(1));
    }

    #[test]
    fn pending_plans_have_no_meals_for_today() {
        let plan = plan("processing", date(2026, 3, 2), 7);
        assert!(select_todays_meals(&plan, date(2026, 3, 2)).is_none());

        let empty = MealPlan {
            status: "completed".to_string(),
            meals: Vec::new(),
            ..plan
        };
        assert!(select_todays_meals(&empty, date(2026, 3, 2)).is_none());
    }

    #[test]
    fn failed_toggle_restores_previous_state() {
        let mut checklist = MealChecklist::default();
        let pending = checklist.begin_toggle(MealType::Lunch, date(2026, 3, 2));
        assert!(checklist.lunch);
        assert!(pending.checked());

        let outcome = pending.settle(&mut checklist, Err(ApiError::NoResponse));
        assert!(!checklist.lunch);
        assert_eq!(
            outcome,
            ToggleOutcome::RolledBack {
                reason: "No response from server. Please check your connection.".to_string()
            }
        );
    }

    #[test]
    fn unchecking_builds_unmark_request() {
        let mut checklist = MealChecklist {
            dinner: true,
            ..MealChecklist::default()
        };
        let pending = checklist.begin_toggle(MealType::Dinner, date(2026, 3, 2));
        assert!(!checklist.dinner);
        assert!(!pending.checked());
        assert_eq!(pending.request().meal_type, MealType::Dinner);
        assert_eq!(checklist.consumed(), 0);
    }
}
