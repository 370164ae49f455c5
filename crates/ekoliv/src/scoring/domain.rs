use serde::{Deserialize, Serialize};

/// The eight lifestyle areas the eco score is broken down into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EcoCategory {
    Transportation,
    Diet,
    Shopping,
    Recycling,
    Reusables,
    Energy,
    PaperDigital,
    Travel,
}

impl EcoCategory {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Transportation,
            Self::Diet,
            Self::Shopping,
            Self::Recycling,
            Self::Reusables,
            Self::Energy,
            Self::PaperDigital,
            Self::Travel,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Transportation => "transportation",
            Self::Diet => "diet",
            Self::Shopping => "shopping",
            Self::Recycling => "recycling",
            Self::Reusables => "reusables",
            Self::Energy => "energy",
            Self::PaperDigital => "paperDigital",
            Self::Travel => "travel",
        }
    }

    pub const fn strength_label(self) -> &'static str {
        match self {
            Self::Transportation => "Sustainable Transportation",
            Self::Diet => "Plant-Based Diet",
            Self::Shopping => "Conscious Shopping",
            Self::Recycling => "Recycling Habits",
            Self::Reusables => "Reusable Products",
            Self::Energy => "Clean Energy",
            Self::PaperDigital => "Digital Lifestyle",
            Self::Travel => "Low-Carbon Travel",
        }
    }

    pub const fn improvement_action(self) -> &'static str {
        match self {
            Self::Transportation => "Try walking, biking, or public transport more often",
            Self::Diet => "Reduce meat consumption - start with Meatless Mondays",
            Self::Shopping => "Choose quality over quantity and consider secondhand",
            Self::Recycling => "Make recycling a consistent habit",
            Self::Reusables => "Carry reusable bags, bottles, and containers",
            Self::Energy => "Explore renewable energy options",
            Self::PaperDigital => "Switch to digital bills and documents",
            Self::Travel => "Reduce air travel or purchase carbon offsets",
        }
    }

    /// Annual kg of CO2 a perfect score in this area avoids.
    pub const fn annual_potential_kg(self) -> u32 {
        match self {
            Self::Transportation => 2000,
            Self::Diet => 1500,
            Self::Shopping => 500,
            Self::Recycling => 300,
            Self::Reusables => 200,
            Self::Energy => 1000,
            Self::PaperDigital => 100,
            Self::Travel => 1000,
        }
    }
}

/// Reward tier derived from the overall percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    EcoChampion,
    GreenLeader,
    EcoWarrior,
    GreenLearner,
    EcoExplorer,
    GreenBeginner,
}

impl ScoreTier {
    /// First threshold the percentage reaches wins, scanning from the top.
    pub const fn from_percentage(percentage: u8) -> Self {
        if percentage >= 90 {
            Self::EcoChampion
        } else if percentage >= 75 {
            Self::GreenLeader
        } else if percentage >= 60 {
            Self::EcoWarrior
        } else if percentage >= 45 {
            Self::GreenLearner
        } else if percentage >= 30 {
            Self::EcoExplorer
        } else {
            Self::GreenBeginner
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::EcoChampion => "Eco Champion",
            Self::GreenLeader => "Green Leader",
            Self::EcoWarrior => "Eco Warrior",
            Self::GreenLearner => "Green Learner",
            Self::EcoExplorer => "Eco Explorer",
            Self::GreenBeginner => "Green Beginner",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::EcoChampion => "🏆",
            Self::GreenLeader => "🌟",
            Self::EcoWarrior => "💚",
            Self::GreenLearner => "🌱",
            Self::EcoExplorer => "🌿",
            Self::GreenBeginner => "🌍",
        }
    }
}

/// Points and feedback for a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: u8,
    pub max: u8,
    pub feedback: String,
}

impl CategoryScore {
    pub const MAX: u8 = 100;

    pub(crate) fn new(score: u8, feedback: &str) -> Self {
        Self {
            score,
            max: Self::MAX,
            feedback: feedback.to_string(),
        }
    }

    pub(crate) fn unrecognized() -> Self {
        Self::new(0, "")
    }
}

/// Per-category scores, serialized with the category keys the app uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoBreakdown {
    pub transportation: CategoryScore,
    pub diet: CategoryScore,
    pub shopping: CategoryScore,
    pub recycling: CategoryScore,
    pub reusables: CategoryScore,
    pub energy: CategoryScore,
    pub paper_digital: CategoryScore,
    pub travel: CategoryScore,
}

impl EcoBreakdown {
    pub fn get(&self, category: EcoCategory) -> &CategoryScore {
        match category {
            EcoCategory::Transportation => &self.transportation,
            EcoCategory::Diet => &self.diet,
            EcoCategory::Shopping => &self.shopping,
            EcoCategory::Recycling => &self.recycling,
            EcoCategory::Reusables => &self.reusables,
            EcoCategory::Energy => &self.energy,
            EcoCategory::PaperDigital => &self.paper_digital,
            EcoCategory::Travel => &self.travel,
        }
    }

    /// Entries in the fixed category order.
    pub fn iter(&self) -> impl Iterator<Item = (EcoCategory, &CategoryScore)> + '_ {
        EcoCategory::ordered()
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

/// Full eco assessment derived from one snapshot of onboarding answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoScoreResult {
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: u8,
    pub tier: ScoreTier,
    pub category: String,
    pub category_icon: String,
    pub breakdown: EcoBreakdown,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub co2_saved_annually: u32,
    pub trees_equivalent: u32,
}
