use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use super::storage::{SessionStore, StorageError, UserData};
use crate::api::types::{LoginRequest, RegisterRequest};
use crate::api::{ApiError, AuthGateway, OnboardingGateway};
use crate::config::SessionConfig;
use crate::onboarding::{
    FormData, FormField, OnboardingError, OnboardingMachine, OnboardingSubmission, StepOutcome,
};
use crate::results::ResultsSummary;

pub const SIGN_IN_FALLBACK_MESSAGE: &str = "Login failed. Please check your credentials.";
pub const SIGN_UP_FALLBACK_MESSAGE: &str = "Sign up failed. Please try again.";

/// The full-screen surface currently shown. Exactly one is active.
#[derive(Debug, Clone)]
pub enum Surface {
    Landing,
    SignUp,
    SignIn,
    Onboarding(OnboardingMachine),
    Results(ResultsSummary),
    Welcome,
    Dashboard,
}

impl Surface {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::SignUp => "sign_up",
            Self::SignIn => "sign_in",
            Self::Onboarding(_) => "onboarding",
            Self::Results(_) => "results",
            Self::Welcome => "welcome",
            Self::Dashboard => "dashboard",
        }
    }
}

/// Answers kept after onboarding so they can be submitted once an account exists.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferedAnswers {
    pub form: FormData,
    pub captured_at: DateTime<Utc>,
}

impl BufferedAnswers {
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Option<chrono::Duration>) -> bool {
        ttl.is_some_and(|ttl| now - self.captured_at > ttl)
    }
}

/// Session flags owned by the shell.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub user: Option<UserData>,
    pub has_seen_welcome: bool,
    pub pending_dashboard_access: bool,
    pub answers: Option<BufferedAnswers>,
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("cannot {action} while on the {surface} screen")]
    InvalidTransition {
        action: &'static str,
        surface: &'static str,
    },
    /// Sign-in or sign-up was rejected; the form stays open.
    #[error("{0}")]
    Auth(String),
    #[error(transparent)]
    Onboarding(#[from] OnboardingError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Decides which surface is shown and owns the session flags.
#[derive(Debug)]
pub struct AppShell {
    store: SessionStore,
    policy: SessionConfig,
    context: SessionContext,
    surface: Surface,
    surface_token: CancellationToken,
    clock: fn() -> DateTime<Utc>,
}

impl AppShell {
    /// Restores identity and the welcome flag from storage. The flag only
    /// counts when an identity is stored too.
    pub fn hydrate(store: SessionStore, policy: SessionConfig) -> Self {
        let user = store.user();
        let has_seen_welcome = user.is_some() && store.seen_welcome();
        let context = SessionContext {
            user,
            has_seen_welcome,
            ..SessionContext::default()
        };

        let mut shell = Self {
            store,
            policy,
            context,
            surface: Surface::Landing,
            surface_token: CancellationToken::new(),
            clock: Utc::now,
        };
        shell.surface = shell.resting_surface();
        tracing::debug!(surface = shell.surface.name(), "session hydrated");
        shell
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Token tied to the current surface; cancelled when the surface changes.
    pub fn cancellation(&self) -> CancellationToken {
        self.surface_token.clone()
    }

    pub fn onboarding(&self) -> Option<&OnboardingMachine> {
        match &self.surface {
            Surface::Onboarding(machine) => Some(machine),
            _ => None,
        }
    }

    pub fn onboarding_mut(&mut self) -> Option<&mut OnboardingMachine> {
        match &mut self.surface {
            Surface::Onboarding(machine) => Some(machine),
            _ => None,
        }
    }

    fn resting_surface(&self) -> Surface {
        if self.context.user.is_some() && self.context.has_seen_welcome {
            Surface::Dashboard
        } else {
            Surface::Landing
        }
    }

    fn enter(&mut self, surface: Surface) {
        self.surface_token.cancel();
        self.surface_token = CancellationToken::new();
        tracing::debug!(from = self.surface.name(), to = surface.name(), "surface changed");
        self.surface = surface;
    }

    fn invalid(&self, action: &'static str) -> ShellError {
        ShellError::InvalidTransition {
            action,
            surface: self.surface.name(),
        }
    }

    fn remember_user(&mut self, user: UserData) -> Result<(), StorageError> {
        self.store.set_user(&user)?;
        self.context.user = Some(user);
        Ok(())
    }

    fn mark_seen_welcome(&mut self) -> Result<(), StorageError> {
        self.store.mark_seen_welcome()?;
        self.context.has_seen_welcome = true;
        Ok(())
    }

    /// "Begin Your Green Journey" on the landing page.
    pub fn start_journey(&mut self) -> Result<(), ShellError> {
        match self.surface {
            Surface::Landing => {
                self.enter(Surface::Onboarding(OnboardingMachine::new()));
                Ok(())
            }
            _ => Err(self.invalid("start the journey")),
        }
    }

    pub fn open_sign_in(&mut self) -> Result<(), ShellError> {
        match self.surface {
            Surface::Landing | Surface::SignUp => {
                self.enter(Surface::SignIn);
                Ok(())
            }
            _ => Err(self.invalid("open sign-in")),
        }
    }

    pub fn open_sign_up(&mut self) -> Result<(), ShellError> {
        match self.surface {
            Surface::Landing | Surface::SignIn => {
                self.enter(Surface::SignUp);
                Ok(())
            }
            _ => Err(self.invalid("open sign-up")),
        }
    }

    /// Closes the sign-in or sign-up form.
    pub fn dismiss(&mut self) -> Result<(), ShellError> {
        match self.surface {
            Surface::SignIn | Surface::SignUp => {
                let resting = self.resting_surface();
                self.enter(resting);
                Ok(())
            }
            _ => Err(self.invalid("dismiss")),
        }
    }

    /// Abandons onboarding. The in-progress answers are dropped, and so is a
    /// provisional identity that never reached the welcome screen.
    pub fn close_onboarding(&mut self) -> Result<(), ShellError> {
        if !matches!(self.surface, Surface::Onboarding(_)) {
            return Err(self.invalid("close onboarding"));
        }
        if !self.context.has_seen_welcome {
            self.store.clear_user()?;
            self.context.user = None;
        }
        let resting = self.resting_surface();
        self.enter(resting);
        tracing::info!("onboarding abandoned");
        Ok(())
    }

    pub fn set_answer(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<(), ShellError> {
        let surface = self.surface.name();
        let Some(machine) = self.onboarding_mut() else {
            return Err(ShellError::InvalidTransition {
                action: "answer a question",
                surface,
            });
        };
        machine.set_answer(field, value)?;
        Ok(())
    }

    /// Advances the questionnaire. The contact-step submission is tied to
    /// this surface's cancellation token.
    pub async fn next_step<G>(&mut self, gateway: &G) -> Result<StepOutcome, ShellError>
    where
        G: OnboardingGateway + ?Sized,
    {
        let token = self.surface_token.clone();
        let store = self.store.clone();
        let Surface::Onboarding(machine) = &mut self.surface else {
            return Err(self.invalid("advance onboarding"));
        };

        let outcome = machine.next(&store, gateway, &token).await;
        if outcome == StepOutcome::Cancelled {
            self.surface_token = CancellationToken::new();
        }
        Ok(outcome)
    }

    pub fn previous_step(&mut self) -> Result<bool, ShellError> {
        match &mut self.surface {
            Surface::Onboarding(machine) => Ok(machine.back()),
            _ => Err(self.invalid("go back")),
        }
    }

    /// "Continue to Dashboard" on the final onboarding screen: keeps the
    /// answers, stores a provisional identity and shows the results.
    pub fn complete_onboarding(&mut self) -> Result<(), ShellError> {
        let Surface::Onboarding(machine) = &self.surface else {
            return Err(self.invalid("complete onboarding"));
        };
        let form = machine.clone().complete()?;

        let existing = self.context.user.as_ref();
        let name = non_empty(&form.first_name)
            .or_else(|| existing.and_then(|user| non_empty(&user.name)))
            .unwrap_or("User")
            .to_string();
        let email = non_empty(&form.email)
            .or_else(|| existing.and_then(|user| non_empty(&user.email)))
            .unwrap_or("")
            .to_string();
        self.remember_user(UserData { name, email })?;

        let summary = ResultsSummary::from_form(&form);
        self.context.answers = Some(BufferedAnswers {
            form,
            captured_at: (self.clock)(),
        });
        self.enter(Surface::Results(summary));
        Ok(())
    }

    /// Back from the results to the last onboarding step.
    pub fn results_back(&mut self) -> Result<(), ShellError> {
        if !matches!(self.surface, Surface::Results(_)) {
            return Err(self.invalid("return to onboarding"));
        }
        let form = self
            .context
            .answers
            .as_ref()
            .map(|answers| answers.form.clone())
            .unwrap_or_default();
        self.enter(Surface::Onboarding(OnboardingMachine::resume(form)));
        Ok(())
    }

    /// Continue from the results: guests are sent to sign up first.
    pub fn results_continue(&mut self) -> Result<(), ShellError> {
        if !matches!(self.surface, Surface::Results(_)) {
            return Err(self.invalid("continue from results"));
        }
        if self.store.token().is_none() || self.context.user.is_none() {
            self.context.pending_dashboard_access = true;
            self.enter(Surface::SignUp);
        } else {
            self.enter(Surface::Welcome);
        }
        Ok(())
    }

    /// Registers through `auth` and applies [`AppShell::sign_up_success`].
    pub async fn sign_up<A, O>(
        &mut self,
        request: &RegisterRequest,
        auth: &A,
        onboarding: &O,
    ) -> Result<(), ShellError>
    where
        A: AuthGateway + ?Sized,
        O: OnboardingGateway + ?Sized,
    {
        if !matches!(self.surface, Surface::SignUp) {
            return Err(self.invalid("sign up"));
        }
        auth.register(request)
            .await
            .map_err(|err| auth_failure(&err, SIGN_UP_FALLBACK_MESSAGE))?;

        let user = UserData {
            name: request.name.clone(),
            email: request.email.clone(),
        };
        self.sign_up_success(user, onboarding).await
    }

    /// With pending dashboard access and buffered answers, submits them and
    /// opens the welcome screen; otherwise starts onboarding. Submission
    /// failures are logged and do not block the user.
    pub async fn sign_up_success<O>(
        &mut self,
        user: UserData,
        onboarding: &O,
    ) -> Result<(), ShellError>
    where
        O: OnboardingGateway + ?Sized,
    {
        if !matches!(self.surface, Surface::SignUp) {
            return Err(self.invalid("finish sign-up"));
        }
        self.remember_user(user)?;

        let now = (self.clock)();
        let ttl = self.policy.guest_answers_ttl;
        if self
            .context
            .answers
            .as_ref()
            .is_some_and(|answers| answers.is_expired(now, ttl))
        {
            tracing::info!("discarding expired guest answers");
            self.context.answers = None;
        }

        let buffered = if self.context.pending_dashboard_access {
            self.context.answers.take()
        } else {
            None
        };
        let Some(buffered) = buffered else {
            self.enter(Surface::Onboarding(OnboardingMachine::new()));
            return Ok(());
        };

        self.context.pending_dashboard_access = false;
        let submission = OnboardingSubmission::from_form(&buffered.form);
        let token = self.surface_token.clone();
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = submission.send(onboarding) => Some(result),
        };
        match result {
            Some(Ok(())) => {}
            Some(Err(err)) => {
                tracing::warn!(error = %err, "failed to submit onboarding answers after sign-up");
            }
            None => tracing::debug!("deferred onboarding submission cancelled"),
        }

        self.enter(Surface::Welcome);
        Ok(())
    }

    /// Logs in through `auth`, loads the profile and applies
    /// [`AppShell::sign_in_success`].
    pub async fn sign_in<A>(&mut self, request: &LoginRequest, auth: &A) -> Result<(), ShellError>
    where
        A: AuthGateway + ?Sized,
    {
        if !matches!(self.surface, Surface::SignIn) {
            return Err(self.invalid("sign in"));
        }
        auth.login(request)
            .await
            .map_err(|err| auth_failure(&err, SIGN_IN_FALLBACK_MESSAGE))?;
        let profile = auth
            .current_user()
            .await
            .map_err(|err| auth_failure(&err, SIGN_IN_FALLBACK_MESSAGE))?;

        self.sign_in_success(UserData {
            name: profile.name,
            email: profile.email,
        })
    }

    pub fn sign_in_success(&mut self, user: UserData) -> Result<(), ShellError> {
        if !matches!(self.surface, Surface::SignIn) {
            return Err(self.invalid("finish sign-in"));
        }
        self.remember_user(user)?;

        if self.context.pending_dashboard_access {
            self.context.pending_dashboard_access = false;
            self.enter(Surface::Welcome);
        } else {
            self.mark_seen_welcome()?;
            self.enter(Surface::Dashboard);
        }
        Ok(())
    }

    pub fn welcome_closed(&mut self) -> Result<(), ShellError> {
        if !matches!(self.surface, Surface::Welcome) {
            return Err(self.invalid("close the welcome screen"));
        }
        self.mark_seen_welcome()?;
        let resting = self.resting_surface();
        self.enter(resting);
        Ok(())
    }

    /// Clears identity, welcome flag and token, then shows the landing page.
    pub fn logout(&mut self) -> Result<(), ShellError> {
        self.store.clear_all()?;
        self.context = SessionContext::default();
        self.enter(Surface::Landing);
        tracing::info!("logged out");
        Ok(())
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|value| !value.is_empty())
}

fn auth_failure(err: &ApiError, fallback: &str) -> ShellError {
    tracing::warn!(error = %err, "authentication failed");
    ShellError::Auth(err.display_or(fallback))
}
