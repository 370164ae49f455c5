use crate::infra::{open_session_store, today};
use crate::report::{render_step, render_summary};
use clap::Args;
use ekoliv::api::types::{LoginRequest, MealType, RegisterRequest};
use ekoliv::api::{ApiClient, DashboardGateway, OnboardingGateway};
use ekoliv::config::AppConfig;
use ekoliv::dashboard::{ActivityEntry, DashboardState, ToggleOutcome};
use ekoliv::onboarding::{FormField, StepIndex, StepInput, StepOutcome, StepTemplate};
use ekoliv::session::{AppShell, ShellError, Surface};
use ekoliv::telemetry;
use ekoliv::AppError;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[derive(Args, Debug, Default)]
pub(crate) struct JourneyArgs {
    /// Forget the stored session before starting
    #[arg(long)]
    pub(crate) fresh: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Reads one trimmed line. `None` once input is closed.
    async fn ask(&mut self, label: &str) -> Result<Option<String>, AppError> {
        print!("{label} ");
        std::io::stdout().flush()?;
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }
}

pub(crate) async fn run_journey(args: JourneyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let store = open_session_store(&config.storage)?;
    if args.fresh {
        store.clear_all()?;
    }
    let client = ApiClient::new(&config.api, store.clone())?;
    let mut shell = AppShell::hydrate(store, config.session.clone());
    let mut prompt = Prompt::stdin();

    loop {
        let flow = match shell.surface() {
            Surface::Landing => landing(&mut shell, &mut prompt).await?,
            Surface::Onboarding(_) => onboarding(&mut shell, &mut prompt, &client).await?,
            Surface::Results(_) => results(&mut shell, &mut prompt).await?,
            Surface::SignUp => sign_up(&mut shell, &mut prompt, &client).await?,
            Surface::SignIn => sign_in(&mut shell, &mut prompt, &client).await?,
            Surface::Welcome => welcome(&mut shell, &mut prompt).await?,
            Surface::Dashboard => dashboard(&mut shell, &mut prompt, &client).await?,
        };
        if flow == Flow::Quit {
            break;
        }
    }

    println!("\nSee you soon!");
    Ok(())
}

async fn landing(shell: &mut AppShell, prompt: &mut Prompt) -> Result<Flow, AppError> {
    println!("\nEkoliv: live green, feel great.");
    println!("  1. Begin Your Green Journey");
    println!("  2. Sign in");
    println!("  3. Create an account");
    let Some(choice) = prompt.ask("Choose (q to quit):").await? else {
        return Ok(Flow::Quit);
    };

    match choice.as_str() {
        "1" => shell.start_journey()?,
        "2" => shell.open_sign_in()?,
        "3" => shell.open_sign_up()?,
        "q" => return Ok(Flow::Quit),
        _ => println!("Please pick 1, 2 or 3."),
    }
    Ok(Flow::Continue)
}

async fn onboarding(
    shell: &mut AppShell,
    prompt: &mut Prompt,
    client: &ApiClient,
) -> Result<Flow, AppError> {
    let Some(machine) = shell.onboarding() else {
        return Ok(Flow::Continue);
    };
    let step = machine.current_step();
    let Some(template) = machine.current_template().cloned() else {
        return Ok(Flow::Continue);
    };

    if step == StepIndex::SUMMARY {
        println!("\n{}", template.prompt);
        println!("{}", template.helper);
        let Some(input) = prompt.ask("Press Enter to see your results (x to close):").await?
        else {
            return Ok(Flow::Quit);
        };
        if input == "x" {
            shell.close_onboarding()?;
        } else {
            shell.complete_onboarding()?;
        }
        return Ok(Flow::Continue);
    }

    let section = machine.section();
    let header = match section.ordinal() {
        Some(ordinal) => format!("Section {ordinal} of 3: {}", section.label()),
        None => section.label().to_string(),
    };
    println!(
        "\nStep {} of {} ({}%) | {header}",
        step.get(),
        StepIndex::TOTAL,
        machine.progress_percent()
    );
    render_step(&template);
    if let Some(error) = machine.error() {
        println!("  ! {error}");
    }

    let Some(input) = prompt
        .ask("Answer (Enter to continue, b to go back, x to close):")
        .await?
    else {
        return Ok(Flow::Quit);
    };

    match input.as_str() {
        "x" => {
            shell.close_onboarding()?;
            return Ok(Flow::Continue);
        }
        "b" => {
            shell.previous_step()?;
            return Ok(Flow::Continue);
        }
        "" => {}
        answer => {
            if let Err(err) = record_answer(shell, &template, answer) {
                println!("  ! {err}");
                return Ok(Flow::Continue);
            }
        }
    }

    advance(shell, client).await?;
    Ok(Flow::Continue)
}

fn record_answer(
    shell: &mut AppShell,
    template: &StepTemplate,
    answer: &str,
) -> Result<(), ShellError> {
    match &template.input {
        StepInput::Choice { field, options } => {
            let value = answer
                .parse::<usize>()
                .ok()
                .and_then(|position| position.checked_sub(1))
                .and_then(|index| options.get(index))
                .map_or(answer, |option| option.value);
            shell.set_answer(*field, value)
        }
        StepInput::Text { field, .. }
        | StepInput::Age { field, .. }
        | StepInput::Email { field, .. } => shell.set_answer(*field, answer),
        StepInput::Measurements { .. } => {
            let mut parts = answer.split_whitespace();
            if let Some(height) = parts.next() {
                shell.set_answer(FormField::Height, height)?;
            }
            if let Some(weight) = parts.next() {
                shell.set_answer(FormField::Weight, weight)?;
            }
            Ok(())
        }
        StepInput::Summary => Ok(()),
    }
}

/// Moves to the next step. A contact-step save can be abandoned with Ctrl-C.
async fn advance(shell: &mut AppShell, client: &ApiClient) -> Result<(), AppError> {
    let saving = shell
        .onboarding()
        .is_some_and(|machine| machine.current_step() == StepIndex::CONTACT)
        && shell.store().token().is_some();

    let watcher = saving.then(|| {
        println!("  Saving your answers... (Ctrl-C to cancel)");
        let token = shell.cancellation();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        })
    });

    let outcome = shell.next_step(client).await;
    if let Some(watcher) = watcher {
        watcher.abort();
    }

    match outcome? {
        StepOutcome::Advanced(_) | StepOutcome::AtEnd => {}
        StepOutcome::Blocked => println!("  Please answer this question to continue."),
        StepOutcome::Failed(message) => println!("  ! {message}"),
        StepOutcome::Cancelled => println!("  Saving cancelled. Your answers are still here."),
    }
    Ok(())
}

async fn results(shell: &mut AppShell, prompt: &mut Prompt) -> Result<Flow, AppError> {
    if let Surface::Results(summary) = shell.surface() {
        println!();
        render_summary(summary);
    }

    let Some(input) = prompt
        .ask("\nPress Enter to continue to your dashboard (b to go back):")
        .await?
    else {
        return Ok(Flow::Quit);
    };
    if input == "b" {
        shell.results_back()?;
    } else {
        shell.results_continue()?;
    }
    Ok(Flow::Continue)
}

async fn sign_up(
    shell: &mut AppShell,
    prompt: &mut Prompt,
    client: &ApiClient,
) -> Result<Flow, AppError> {
    println!("\nCreate your Ekoliv account (x to close, i to sign in instead)");
    let Some(name) = prompt.ask("Name:").await? else {
        return Ok(Flow::Quit);
    };
    match name.as_str() {
        "x" => {
            shell.dismiss()?;
            return Ok(Flow::Continue);
        }
        "i" => {
            shell.open_sign_in()?;
            return Ok(Flow::Continue);
        }
        _ => {}
    }
    let Some(email) = prompt.ask("Email:").await? else {
        return Ok(Flow::Quit);
    };
    let Some(password) = prompt.ask("Password:").await? else {
        return Ok(Flow::Quit);
    };

    let request = RegisterRequest {
        name,
        email,
        password,
    };
    match shell.sign_up(&request, client, client).await {
        Ok(()) => {}
        Err(ShellError::Auth(message)) => println!("  ! {message}"),
        Err(err) => return Err(err.into()),
    }
    Ok(Flow::Continue)
}

async fn sign_in(
    shell: &mut AppShell,
    prompt: &mut Prompt,
    client: &ApiClient,
) -> Result<Flow, AppError> {
    println!("\nWelcome back! (x to close, u to create an account)");
    let Some(email) = prompt.ask("Email:").await? else {
        return Ok(Flow::Quit);
    };
    match email.as_str() {
        "x" => {
            shell.dismiss()?;
            return Ok(Flow::Continue);
        }
        "u" => {
            shell.open_sign_up()?;
            return Ok(Flow::Continue);
        }
        _ => {}
    }
    let Some(password) = prompt.ask("Password:").await? else {
        return Ok(Flow::Quit);
    };

    match shell.sign_in(&LoginRequest { email, password }, client).await {
        Ok(()) => {}
        Err(ShellError::Auth(message)) => println!("  ! {message}"),
        Err(err) => return Err(err.into()),
    }
    Ok(Flow::Continue)
}

async fn welcome(shell: &mut AppShell, prompt: &mut Prompt) -> Result<Flow, AppError> {
    let name = shell
        .context()
        .user
        .as_ref()
        .map_or("friend".to_string(), |user| user.name.clone());
    println!("\nWelcome to Ekoliv, {name}!");
    println!("Your 7-day eco meal plan is being prepared. Check off meals and log activity from your dashboard.");
    if prompt.ask("Press Enter to open your dashboard:").await?.is_none() {
        return Ok(Flow::Quit);
    }
    shell.welcome_closed()?;
    Ok(Flow::Continue)
}

async fn dashboard(
    shell: &mut AppShell,
    prompt: &mut Prompt,
    client: &ApiClient,
) -> Result<Flow, AppError> {
    let today = today();
    let mut state = DashboardState::load(client, today).await;
    render_dashboard(shell, &state, today);

    let Some(input) = prompt
        .ask("\n[m b|l|d] toggle meal  [a <type> <amount>] log activity  [r] new plan  [p] progress  [h] insights  [s] answers  [o] log out  [q] quit  [Enter] refresh:")
        .await?
    else {
        return Ok(Flow::Quit);
    };

    let mut parts = input.split_whitespace();
    match parts.next() {
        None => {}
        Some("q") => return Ok(Flow::Quit),
        Some("o") => shell.logout()?,
        Some("r") => match state.regenerate_meal_plan(today, client).await {
            Ok(()) => println!("  A fresh meal plan is on its way."),
            Err(err) => println!("  ! {}", err.display_or("Failed to regenerate meal plan")),
        },
        Some("p") => show_progress(client).await,
        Some("h") => show_insights(client).await,
        Some("s") => show_onboarding_summary(client).await,
        Some("m") => {
            let meal = match parts.next() {
                Some("b") => Some(MealType::Breakfast),
                Some("l") => Some(MealType::Lunch),
                Some("d") => Some(MealType::Dinner),
                _ => None,
            };
            match meal {
                Some(meal) => {
                    if let ToggleOutcome::RolledBack { reason } =
                        state.toggle_meal(meal, today, client).await
                    {
                        println!("  ! Could not update {}: {reason}", meal.label());
                    }
                }
                None => println!("  Use m b, m l or m d."),
            }
        }
        Some("a") => {
            let (activity_type, amount) = match (parts.next(), parts.next()) {
                (Some(amount), None) => ("", amount),
                (Some(activity_type), Some(amount)) => (activity_type, amount),
                _ => ("", ""),
            };
            match ActivityEntry::parse(activity_type, amount) {
                Ok(entry) => {
                    if let Err(message) = state.log_activity(&entry, today, client).await {
                        println!("  ! {message}");
                    }
                }
                Err(err) => println!("  ! {err}"),
            }
        }
        Some(other) => println!("  Unknown command `{other}`."),
    }
    Ok(Flow::Continue)
}

fn render_dashboard(shell: &AppShell, state: &DashboardState, today: chrono::NaiveDate) {
    let name = shell
        .context()
        .user
        .as_ref()
        .map_or("there", |user| user.name.as_str());
    println!("\nHello, {name}! Today is {}", today.format("%A, %B %-d"));

    if let Some(error) = &state.error {
        println!("  ! {error}");
    }
    let stats = state.stats();
    println!(
        "Carbon credits {:.1} kg | {} trees | {} day streak | total impact {:.1}",
        stats.carbon_credits, stats.trees_equivalent, stats.streak_days, stats.total_impact
    );
    if let Some(scores) = &state.scores {
        println!(
            "Eco score {:.0} | Wellness score {:.0}",
            scores.eco_score, scores.wellness_score
        );
    }

    match &state.todays_meals {
        Some(day) => {
            println!("Today's meals (day {}):", day.day);
            for meal_type in MealType::ordered() {
                let mark = if state.checklist.is_checked(meal_type) { "x" } else { " " };
                let meal = day.meal(meal_type);
                println!(
                    "  [{mark}] {:<9} {} ({:.0} kcal)",
                    meal_type.label(),
                    meal.name,
                    meal.calories
                );
            }
        }
        None => println!("No meal plan yet. Use `r` to generate one."),
    }

    match &state.activity {
        Some(activity) => {
            let kind = activity.activity_type.as_deref().unwrap_or("walking");
            match activity.duration_minutes {
                Some(minutes) if minutes > 0 => println!("Activity: {kind} for {minutes} min"),
                _ => println!("Activity: {} steps", activity.steps.unwrap_or_default()),
            }
        }
        None => println!("No activity logged today."),
    }
}

async fn show_progress(client: &ApiClient) {
    match client.progress(7).await {
        Ok(progress) => {
            println!(
                "Last 7 days: eco {:.0} | wellness {:.0} | {:.1} kg CO2 saved",
                progress.eco_score, progress.wellness_score, progress.co2_saved
            );
            for point in &progress.health_progress_over_time {
                println!(
                    "  {}  {:>6} steps  {:>5.0} kcal",
                    point.date, point.steps, point.calories_burned
                );
            }
        }
        Err(err) => println!("  ! {}", err.display_or("Failed to load progress")),
    }
}

async fn show_insights(client: &ApiClient) {
    let (daily, weekly) = tokio::join!(client.daily_insights(), client.weekly_insights());
    match daily {
        Ok(daily) => {
            println!("Today: {}", daily.activity.message);
            println!("  {}", daily.meals.message);
            println!("  {}", daily.calories.message);
            for recommendation in &daily.recommendations {
                println!("  - {recommendation}");
            }
        }
        Err(err) => println!("  ! {}", err.display_or("Failed to load daily insights")),
    }
    match weekly {
        Ok(weekly) => println!(
            "Week of {}: {} day streak, consistency {:.0}%, {} steps",
            weekly.week_start.format("%b %-d"),
            weekly.streak,
            weekly.consistency_score,
            weekly.activity_summary.total_steps
        ),
        Err(err) => println!("  ! {}", err.display_or("Failed to load weekly insights")),
    }
}

async fn show_onboarding_summary(client: &ApiClient) {
    match client.summary().await {
        Ok(summary) => {
            println!(
                "Saved answers: eco {:.0} | wellness {:.0}",
                summary.eco_score, summary.wellness_score
            );
            if let Some(lifestyle) = &summary.lifestyle {
                println!(
                    "  gets around by {}, diet {}",
                    lifestyle.transportation_mode, lifestyle.diet_type
                );
            }
            if let Some(health) = &summary.health {
                println!(
                    "  goal {}, activity {}",
                    health.wellness_goal, health.activity_level
                );
            }
        }
        Err(err) => println!("  ! {}", err.display_or("Failed to load onboarding answers")),
    }
}
