use chrono::NaiveDate;
use serde::Serialize;

use super::activity::ActivityEntry;
use super::meals::{select_todays_meals, MealChecklist, ToggleOutcome};
use crate::api::types::{
    ActivityData, DashboardData, DayMeals, GenerateMealPlanRequest, MealConsumptionStatus,
    MealPlan, MealType, ScoreData,
};
use crate::api::{ApiError, DashboardGateway};

pub const LOAD_FALLBACK_MESSAGE: &str = "Failed to load dashboard data";

/// Kilograms of CO2 a tree absorbs per year, as the dashboard counts it.
pub const DASHBOARD_TREE_KG: f64 = 20.0;

/// Headline numbers on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub carbon_credits: f64,
    pub trees_equivalent: u32,
    pub streak_days: u32,
    pub total_impact: f64,
}

/// Everything the dashboard shows for today.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardState {
    pub summary: Option<DashboardData>,
    pub scores: Option<ScoreData>,
    /// Set when the summary or scores could not be loaded.
    pub error: Option<String>,
    pub meal_plan_id: Option<i64>,
    pub todays_meals: Option<DayMeals>,
    pub checklist: MealChecklist,
    pub consumption: Option<MealConsumptionStatus>,
    pub activity: Option<ActivityData>,
}

impl DashboardState {
    /// Fetches all dashboard data concurrently. Summary and scores fail
    /// together; the other requests degrade on their own.
    pub async fn load<G>(gateway: &G, today: NaiveDate) -> Self
    where
        G: DashboardGateway + ?Sized,
    {
        let headline = async { tokio::try_join!(gateway.dashboard(), gateway.scores()) };
        let (headline, plans, consumption, activity) = tokio::join!(
            headline,
            gateway.my_meal_plans(1, 0),
            gateway.today_meal_status(),
            gateway.today_activity(),
        );

        let mut state = Self::default();
        match headline {
            Ok((summary, scores)) => {
                state.summary = Some(summary);
                state.scores = Some(scores);
            }
            Err(err) => {
                tracing::warn!(error = %err, "dashboard summary unavailable");
                state.error = Some(err.display_or(LOAD_FALLBACK_MESSAGE));
            }
        }

        match plans {
            Ok(list) => {
                if let Some(plan) = list.meal_plans.first() {
                    state.apply_plan(plan, today);
                }
            }
            Err(err) => tracing::warn!(error = %err, "meal plan unavailable"),
        }

        match consumption {
            Ok(status) => {
                state.checklist = MealChecklist::from_status(&status);
                state.consumption = Some(status);
            }
            Err(err) => tracing::warn!(error = %err, "meal consumption status unavailable"),
        }

        match activity {
            Ok(activity) => state.activity = Some(activity),
            Err(err) => tracing::warn!(error = %err, "today's activity unavailable"),
        }

        state
    }

    fn apply_plan(&mut self, plan: &MealPlan, today: NaiveDate) {
        self.todays_meals = select_todays_meals(plan, today).cloned();
        self.meal_plan_id = self.todays_meals.as_ref().map(|_| plan.id);
    }

    pub fn stats(&self) -> DashboardStats {
        let carbon_credits = self
            .summary
            .as_ref()
            .map_or(0.0, |summary| summary.total_carbon_savings);
        let streak_days = self.summary.as_ref().map_or(0, |summary| summary.streak_days);
        let combined = self
            .scores
            .as_ref()
            .map_or(0.0, |scores| scores.eco_score + scores.wellness_score);

        DashboardStats {
            carbon_credits,
            trees_equivalent: (carbon_credits / DASHBOARD_TREE_KG).round().max(0.0) as u32,
            streak_days,
            total_impact: combined.round() / 2.0,
        }
    }

    /// Optimistically flips a meal, confirms it with the backend and rolls
    /// the flip back if that fails.
    pub async fn toggle_meal<G>(
        &mut self,
        meal_type: MealType,
        today: NaiveDate,
        gateway: &G,
    ) -> ToggleOutcome
    where
        G: DashboardGateway + ?Sized,
    {
        let pending = self.checklist.begin_toggle(meal_type, today);
        let result = pending.send(gateway).await;
        let outcome = pending.settle(&mut self.checklist, result);
        if let ToggleOutcome::Confirmed { status } = &outcome {
            self.consumption = Some(status.clone());
        }
        outcome
    }

    pub async fn log_activity<G>(
        &mut self,
        entry: &ActivityEntry,
        today: NaiveDate,
        gateway: &G,
    ) -> Result<(), String>
    where
        G: DashboardGateway + ?Sized,
    {
        match gateway.add_steps(&entry.request(today)).await {
            Ok(response) => {
                tracing::info!(activity = %entry.activity_type, "activity saved");
                self.activity = Some(response.activity);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to save activity");
                Err(entry.failure_message().to_string())
            }
        }
    }

    /// Replaces the plan with a freshly generated one.
    pub async fn regenerate_meal_plan<G>(
        &mut self,
        today: NaiveDate,
        gateway: &G,
    ) -> Result<(), ApiError>
    where
        G: DashboardGateway + ?Sized,
    {
        let plan = gateway
            .regenerate_meal_plan(&GenerateMealPlanRequest::default())
            .await?;
        self.apply_plan(&plan, today);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_default_to_zero_without_data() {
        let stats = DashboardState::default().stats();
        assert_eq!(stats.carbon_credits, 0.0);
        assert_eq!(stats.trees_equivalent, 0);
        assert_eq!(stats.streak_days, 0);
        assert_eq!(stats.total_impact, 0.0);
    }

    #[test]
    fn trees_use_twenty_kilograms_per_tree() {
        let state = DashboardState {
            summary: Some(DashboardData {
                total_carbon_savings: 130.0,
                streak_days: 4,
                ..DashboardData::default()
            }),
            scores: Some(ScoreData {
                eco_score: 71.4,
                wellness_score: 80.3,
                co2_saved: 0.0,
            }),
            ..DashboardState::default()
        };

        let stats = state.stats();
        assert_eq!(stats.trees_equivalent, 7);
        assert_eq!(stats.streak_days, 4);
        assert_eq!(stats.total_impact, 76.0);
    }
}
