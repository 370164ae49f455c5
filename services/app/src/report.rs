use crate::infra::{load_answers, open_session_store};
use clap::Args;
use ekoliv::config::AppConfig;
use ekoliv::onboarding::{OnboardingQuestionnaire, StepInput, StepTemplate};
use ekoliv::results::ResultsSummary;
use ekoliv::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file with onboarding answers keyed like the form (camelCase)
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Print the summary as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct QuestionsArgs {
    /// Print the questionnaire as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let form = load_answers(&args.answers)?;
    let summary = ResultsSummary::from_form(&form);

    if args.json {
        println!("{}", to_json(&summary)?);
        return Ok(());
    }

    render_summary(&summary);
    Ok(())
}

pub(crate) fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let questionnaire = OnboardingQuestionnaire::standard();

    if args.json {
        println!("{}", to_json(&questionnaire)?);
        return Ok(());
    }

    let mut current_section = None;
    for template in questionnaire.steps() {
        if current_section != Some(template.section) {
            current_section = Some(template.section);
            match template.section.ordinal() {
                Some(ordinal) => println!("\nSection {ordinal} of 3: {}", template.section.label()),
                None => println!("\n{}", template.section.label()),
            }
        }
        render_step(template);
    }
    Ok(())
}

pub(crate) fn run_logout() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let store = open_session_store(&config.storage)?;
    store.clear_all()?;
    println!(
        "Signed out. Cleared stored session in {}",
        config.storage.state_file.display()
    );
    Ok(())
}

pub(crate) fn render_summary(summary: &ResultsSummary) {
    let eco = &summary.eco;
    match &summary.first_name {
        Some(name) => println!("Amazing work, {name}!"),
        None => println!("Amazing work!"),
    }
    println!(
        "Eco score: {}% {} {} ({} / {} points)",
        summary.eco_score, eco.category_icon, eco.category, eco.total_score, eco.max_score
    );
    println!("Wellness score: {}%", summary.wellness_score);
    println!(
        "Estimated savings: {} kg CO2 per year, about {} trees",
        eco.co2_saved_annually, eco.trees_equivalent
    );

    println!("\nBreakdown:");
    for (category, entry) in eco.breakdown.iter() {
        println!("  - {:<14} {:>3}/{}", category.key(), entry.score, entry.max);
        if !entry.feedback.is_empty() {
            println!("      {}", entry.feedback);
        }
    }

    if !eco.strengths.is_empty() {
        println!("\nStrengths:");
        for strength in &eco.strengths {
            println!("  - {strength}");
        }
    }
    if !eco.improvements.is_empty() {
        println!("\nTry next:");
        for improvement in &eco.improvements {
            println!("  - {improvement}");
        }
    }

    println!("\nTips:");
    for tip in &summary.tips {
        println!("  {} {}: {}", tip.icon, tip.title, tip.description);
    }
}

pub(crate) fn render_step(template: &StepTemplate) {
    let marker = if template.optional { " (optional)" } else { "" };
    println!("[{:>2}] {}{marker}", template.step, template.prompt);
    println!("     {}", template.helper);
    match &template.input {
        StepInput::Choice { options, .. } => {
            for (position, option) in options.iter().enumerate() {
                println!("     {}. {} ({})", position + 1, option.label, option.value);
            }
        }
        StepInput::Text { placeholder, .. }
        | StepInput::Age { placeholder, .. }
        | StepInput::Email { placeholder, .. } => println!("     > {placeholder}"),
        StepInput::Measurements {
            height_placeholder,
            weight_placeholder,
        } => println!("     > height (cm) {height_placeholder}, weight (kg) {weight_placeholder}"),
        StepInput::Summary => {}
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value).map_err(std::io::Error::from)?)
}
