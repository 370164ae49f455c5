use super::domain::{CategoryScore, EcoCategory};

/// Looks up the points for an answer token. Tokens without an entry score zero
/// with empty feedback.
pub(crate) fn score_answer(category: EcoCategory, token: &str) -> CategoryScore {
    let entry = match category {
        EcoCategory::Transportation => transportation(token),
        EcoCategory::Diet => diet(token),
        EcoCategory::Shopping => shopping(token),
        EcoCategory::Recycling => recycling(token),
        EcoCategory::Reusables => reusables(token),
        EcoCategory::Energy => energy(token),
        EcoCategory::PaperDigital => paper_digital(token),
        EcoCategory::Travel => travel(token),
    };

    match entry {
        Some((score, feedback)) => CategoryScore::new(score, feedback),
        None => CategoryScore::unrecognized(),
    }
}

type Entry = Option<(u8, &'static str)>;

fn transportation(token: &str) -> Entry {
    match token {
        "walk" => Some((100, "Perfect! Walking has zero emissions and keeps you healthy.")),
        "bike" => Some((100, "Perfect! Biking has zero emissions and keeps you healthy.")),
        "public" => Some((
            70,
            "Great! Public transport reduces emissions by 45% vs driving alone.",
        )),
        "drive" => Some((
            20,
            "Consider alternatives: each gallon of gas produces ~20 lbs of CO2.",
        )),
        "fly" => Some((
            10,
            "Flying frequently has the highest carbon impact. Try other transport options.",
        )),
        _ => None,
    }
}

fn diet(token: &str) -> Entry {
    match token {
        "never" => Some((
            100,
            "Amazing! Plant-based diets can reduce food carbon footprint by 73%.",
        )),
        "occasionally" => Some((
            60,
            "Good! Reducing meat intake significantly lowers your carbon footprint.",
        )),
        "few-times" => Some((
            30,
            "Try 'Meatless Mondays' - even one day/week saves ~200kg CO2/year.",
        )),
        "daily" => Some((
            10,
            "Meat production accounts for 60% of food greenhouse gases. Try reducing intake.",
        )),
        _ => None,
    }
}

fn shopping(token: &str) -> Entry {
    match token {
        "thrift" => Some((
            100,
            "Excellent! Secondhand shopping prevents 500kg CO2 per year on average.",
        )),
        "few-items" => Some((70, "Smart! Quality over quantity reduces waste and resources.")),
        "regular" => Some((
            20,
            "Fashion industry produces 10% of global CO2. Try reducing purchases.",
        )),
        _ => None,
    }
}

fn recycling(token: &str) -> Entry {
    match token {
        "yes" => Some((100, "Perfect! Recycling saves 30% of waste from landfills.")),
        "sometimes" => Some((
            50,
            "Good start! Try to recycle consistently - it becomes a habit.",
        )),
        "no" => Some((10, "Start small: recycling paper alone saves 17 trees per ton.")),
        _ => None,
    }
}

fn reusables(token: &str) -> Entry {
    match token {
        "always" => Some((
            100,
            "Fantastic! You prevent ~500 single-use items from landfills yearly.",
        )),
        "often" => Some((70, "Great! Keep it up - reusables save money and the planet.")),
        "sometimes" => Some((40, "Try carrying a reusable bag and water bottle everywhere.")),
        "rarely" => Some((
            10,
            "1 million plastic bottles are sold per minute. Switch to reusables!",
        )),
        _ => None,
    }
}

fn energy(token: &str) -> Entry {
    match token {
        "renewable" => Some((
            100,
            "Outstanding! Renewable energy cuts your carbon footprint by 70%.",
        )),
        "mixed" => Some((60, "Good progress! Consider switching more to renewables.")),
        "grid" => Some((20, "Explore solar panels or green energy plans from your utility.")),
        _ => None,
    }
}

fn paper_digital(token: &str) -> Entry {
    match token {
        "digital" => Some((
            100,
            "Perfect! Going digital saves ~24 trees per person annually.",
        )),
        "both" => Some((50, "Try digital bills and e-books to reduce paper use.")),
        "paper" => Some((10, "Paper production uses huge amounts of water and energy.")),
        _ => None,
    }
}

fn travel(token: &str) -> Entry {
    match token {
        "never" => Some((
            100,
            "Excellent! Air travel is the biggest individual carbon source.",
        )),
        "once" => Some((60, "Moderate! Consider carbon offsets for necessary flights.")),
        "few-times" => Some((
            30,
            "One round-trip flight emits ~1 ton CO2. Explore alternatives.",
        )),
        "frequently" => Some((
            10,
            "Frequent flying significantly impacts your carbon footprint.",
        )),
        _ => None,
    }
}
