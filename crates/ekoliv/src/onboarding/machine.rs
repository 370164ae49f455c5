use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::domain::{FormData, FormField, Section, StepIndex};
use super::payload::OnboardingSubmission;
use super::questionnaire::{OnboardingQuestionnaire, StepTemplate};
use crate::api::OnboardingGateway;
use crate::session::SessionStore;

pub const SUBMIT_FALLBACK_MESSAGE: &str = "Failed to save your data. Please try again.";

/// Result of asking the machine to move forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced(StepIndex),
    /// The current step's answer is missing or invalid.
    Blocked,
    /// Already on the summary screen.
    AtEnd,
    /// The contact-step submission failed; the step is unchanged.
    Failed(String),
    /// The surface was closed while the submission was in flight.
    Cancelled,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OnboardingError {
    #[error("`{value}` is not an option for {field}")]
    InvalidOption { field: &'static str, value: String },
    #[error("an answer for {0} cannot be empty")]
    EmptyAnswer(&'static str),
    #[error("onboarding is still on step {step}")]
    NotFinished { step: u8 },
}

/// The 23-step questionnaire state: current position, answers so far and
/// the contact-step submission error. `next` borrows the machine mutably for
/// the whole contact-step save, so answers and `back` are locked out until it
/// settles.
#[derive(Debug, Clone)]
pub struct OnboardingMachine {
    questionnaire: Arc<OnboardingQuestionnaire>,
    current_step: StepIndex,
    form: FormData,
    error: Option<String>,
}

impl Default for OnboardingMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingMachine {
    pub fn new() -> Self {
        Self::with_questionnaire(Arc::new(OnboardingQuestionnaire::standard()))
    }

    pub fn with_questionnaire(questionnaire: Arc<OnboardingQuestionnaire>) -> Self {
        Self {
            questionnaire,
            current_step: StepIndex::FIRST,
            form: FormData::default(),
            error: None,
        }
    }

    /// Reopens a finished form on the contact step, answers intact.
    pub fn resume(form: FormData) -> Self {
        Self {
            current_step: StepIndex::CONTACT,
            form,
            ..Self::new()
        }
    }

    pub fn current_step(&self) -> StepIndex {
        self.current_step
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn questionnaire(&self) -> &OnboardingQuestionnaire {
        &self.questionnaire
    }

    pub fn current_template(&self) -> Option<&StepTemplate> {
        self.questionnaire.step(self.current_step)
    }

    pub fn section(&self) -> Section {
        Section::for_step(self.current_step)
    }

    pub fn progress_percent(&self) -> u8 {
        let ratio = f32::from(self.current_step.get()) / f32::from(StepIndex::TOTAL);
        (ratio * 100.0).round() as u8
    }

    /// Records an answer. Choice fields only take tokens from their option set.
    pub fn set_answer(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<(), OnboardingError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(OnboardingError::EmptyAnswer(field.key()));
        }

        let accepted = self
            .questionnaire
            .step_for_field(field)
            .is_some_and(|template| template.accepts(field, &value));
        if !accepted {
            return Err(OnboardingError::InvalidOption {
                field: field.key(),
                value,
            });
        }

        *self.form.slot_mut(field) = value;
        Ok(())
    }

    pub fn can_proceed(&self) -> bool {
        self.current_template()
            .is_some_and(|template| template.is_satisfied(&self.form))
    }

    pub fn can_go_back(&self) -> bool {
        self.current_step > StepIndex::FIRST && self.current_step < StepIndex::SUMMARY
    }

    /// Moves forward one step. Leaving the contact step first saves the
    /// answers when a bearer token is stored; the save races `cancel`.
    pub async fn next<G>(
        &mut self,
        session: &SessionStore,
        gateway: &G,
        cancel: &CancellationToken,
    ) -> StepOutcome
    where
        G: OnboardingGateway + ?Sized,
    {
        if self.current_step == StepIndex::SUMMARY {
            return StepOutcome::AtEnd;
        }
        if !self.can_proceed() {
            return StepOutcome::Blocked;
        }

        if self.current_step == StepIndex::CONTACT && session.token().is_some() {
            self.error = None;
            let submission = OnboardingSubmission::from_form(&self.form);

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = submission.send(gateway) => Some(result),
            };

            match result {
                None => {
                    tracing::debug!("onboarding submission cancelled");
                    return StepOutcome::Cancelled;
                }
                Some(Err(err)) => {
                    let message = err.to_string();
                    let message = if message.is_empty() {
                        SUBMIT_FALLBACK_MESSAGE.to_string()
                    } else {
                        message
                    };
                    tracing::warn!(error = %err, "onboarding submission failed");
                    self.error = Some(message.clone());
                    return StepOutcome::Failed(message);
                }
                Some(Ok(())) => {}
            }
        }

        self.current_step = self.current_step.next();
        tracing::debug!(step = self.current_step.get(), "onboarding advanced");
        StepOutcome::Advanced(self.current_step)
    }

    /// Steps back one question. Returns false where going back is disabled.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.current_step = self.current_step.previous();
        tracing::debug!(step = self.current_step.get(), "onboarding went back");
        true
    }

    /// Hands over the answers once the summary screen is reached.
    pub fn complete(self) -> Result<FormData, OnboardingError> {
        if self.current_step != StepIndex::SUMMARY {
            return Err(OnboardingError::NotFinished {
                step: self.current_step.get(),
            });
        }
        Ok(self.form)
    }
}
