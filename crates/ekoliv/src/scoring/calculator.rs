use super::domain::{EcoBreakdown, EcoCategory, EcoScoreResult, ScoreTier};
use super::tables::score_answer;

/// Kilograms of CO2 one tree absorbs per year.
pub const TREE_ABSORPTION_KG: u32 = 21;

/// Source of the raw answer token for each eco category.
pub trait EcoAnswers {
    fn eco_answer(&self, category: EcoCategory) -> &str;
}

/// Scores a snapshot of answers. Total for every input: unknown tokens score zero.
pub fn calculate_eco_score<A: EcoAnswers + ?Sized>(answers: &A) -> EcoScoreResult {
    let score = |category| score_answer(category, answers.eco_answer(category));
    let breakdown = EcoBreakdown {
        transportation: score(EcoCategory::Transportation),
        diet: score(EcoCategory::Diet),
        shopping: score(EcoCategory::Shopping),
        recycling: score(EcoCategory::Recycling),
        reusables: score(EcoCategory::Reusables),
        energy: score(EcoCategory::Energy),
        paper_digital: score(EcoCategory::PaperDigital),
        travel: score(EcoCategory::Travel),
    };

    let total_score: u32 = breakdown.iter().map(|(_, entry)| u32::from(entry.score)).sum();
    let max_score: u32 = breakdown.iter().map(|(_, entry)| u32::from(entry.max)).sum();
    let percentage = percentage_of(total_score, max_score);
    let tier = ScoreTier::from_percentage(percentage);

    let strengths = breakdown
        .iter()
        .filter(|(_, entry)| entry.score >= 80)
        .map(|(category, _)| category.strength_label().to_string())
        .collect();
    let improvements = breakdown
        .iter()
        .filter(|(_, entry)| entry.score < 60)
        .map(|(category, _)| category.improvement_action().to_string())
        .collect();

    let co2_saved_annually = co2_saved_kg(&breakdown);

    EcoScoreResult {
        total_score,
        max_score,
        percentage,
        tier,
        category: tier.label().to_string(),
        category_icon: tier.icon().to_string(),
        breakdown,
        strengths,
        improvements,
        co2_saved_annually,
        trees_equivalent: trees_equivalent(co2_saved_annually),
    }
}

/// Rounded equivalent number of trees for an annual CO2 saving.
pub fn trees_equivalent(co2_saved_kg: u32) -> u32 {
    (f64::from(co2_saved_kg) / f64::from(TREE_ABSORPTION_KG)).round() as u32
}

fn percentage_of(total: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    ((f64::from(total) / f64::from(max)) * 100.0)
        .round()
        .clamp(0.0, 100.0) as u8
}

fn co2_saved_kg(breakdown: &EcoBreakdown) -> u32 {
    let saved: f64 = breakdown
        .iter()
        .map(|(category, entry)| {
            f64::from(entry.score) / 100.0 * f64::from(category.annual_potential_kg())
        })
        .sum();
    saved.round() as u32
}
