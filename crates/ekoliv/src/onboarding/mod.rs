//! The onboarding questionnaire: step definitions, collected answers, the
//! step machine and the payloads it submits.

pub mod domain;
mod machine;
mod payload;
pub mod questionnaire;

pub use domain::{FormData, FormField, Section, StepIndex};
pub use machine::{OnboardingError, OnboardingMachine, StepOutcome, SUBMIT_FALLBACK_MESSAGE};
pub use payload::{HealthPayload, LifestylePayload, OnboardingSubmission};
pub use questionnaire::{AnswerOption, OnboardingQuestionnaire, StepInput, StepTemplate};
