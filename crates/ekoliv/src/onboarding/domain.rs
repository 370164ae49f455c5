use serde::{Deserialize, Serialize};

use crate::scoring::{EcoAnswers, EcoCategory};

/// Answers collected by the onboarding questionnaire. Unset fields hold an
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    pub transportation: String,
    pub meat_dairy: String,
    pub shopping: String,
    pub recycling: String,
    pub reusables: String,
    pub home_energy: String,
    pub paper_digital: String,
    pub plane_travel: String,

    pub first_name: String,
    pub gender: String,
    pub age: String,
    pub height: String,
    pub weight: String,
    pub wellness_goal: String,
    pub activity_level: String,
    pub diet_preference: String,

    pub allergies: String,
    pub medical_conditions: String,
    pub meal_frequency: String,
    pub cooking_skill: String,
    pub time_available: String,
    pub budget: String,

    pub email: String,
}

impl FormData {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Transportation => &self.transportation,
            FormField::MeatDairy => &self.meat_dairy,
            FormField::Shopping => &self.shopping,
            FormField::Recycling => &self.recycling,
            FormField::Reusables => &self.reusables,
            FormField::HomeEnergy => &self.home_energy,
            FormField::PaperDigital => &self.paper_digital,
            FormField::PlaneTravel => &self.plane_travel,
            FormField::FirstName => &self.first_name,
            FormField::Gender => &self.gender,
            FormField::Age => &self.age,
            FormField::Height => &self.height,
            FormField::Weight => &self.weight,
            FormField::WellnessGoal => &self.wellness_goal,
            FormField::ActivityLevel => &self.activity_level,
            FormField::DietPreference => &self.diet_preference,
            FormField::Allergies => &self.allergies,
            FormField::MedicalConditions => &self.medical_conditions,
            FormField::MealFrequency => &self.meal_frequency,
            FormField::CookingSkill => &self.cooking_skill,
            FormField::TimeAvailable => &self.time_available,
            FormField::Budget => &self.budget,
            FormField::Email => &self.email,
        }
    }

    pub(crate) fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Transportation => &mut self.transportation,
            FormField::MeatDairy => &mut self.meat_dairy,
            FormField::Shopping => &mut self.shopping,
            FormField::Recycling => &mut self.recycling,
            FormField::Reusables => &mut self.reusables,
            FormField::HomeEnergy => &mut self.home_energy,
            FormField::PaperDigital => &mut self.paper_digital,
            FormField::PlaneTravel => &mut self.plane_travel,
            FormField::FirstName => &mut self.first_name,
            FormField::Gender => &mut self.gender,
            FormField::Age => &mut self.age,
            FormField::Height => &mut self.height,
            FormField::Weight => &mut self.weight,
            FormField::WellnessGoal => &mut self.wellness_goal,
            FormField::ActivityLevel => &mut self.activity_level,
            FormField::DietPreference => &mut self.diet_preference,
            FormField::Allergies => &mut self.allergies,
            FormField::MedicalConditions => &mut self.medical_conditions,
            FormField::MealFrequency => &mut self.meal_frequency,
            FormField::CookingSkill => &mut self.cooking_skill,
            FormField::TimeAvailable => &mut self.time_available,
            FormField::Budget => &mut self.budget,
            FormField::Email => &mut self.email,
        }
    }

    pub fn is_set(&self, field: FormField) -> bool {
        !self.get(field).is_empty()
    }

    /// Whole years from the leading digits, so `"25.5"` reads as 25.
    /// Negative or digitless input yields `None`.
    pub fn age_years(&self) -> Option<u32> {
        let trimmed = self.age.trim_start();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let digits = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .map_or(unsigned, |end| &unsigned[..end]);
        digits.parse::<u32>().ok()
    }

    pub fn height_cm(&self) -> Option<f32> {
        parse_positive(&self.height)
    }

    pub fn weight_kg(&self) -> Option<f32> {
        parse_positive(&self.weight)
    }
}

fn parse_positive(raw: &str) -> Option<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

impl EcoAnswers for FormData {
    fn eco_answer(&self, category: EcoCategory) -> &str {
        let field = match category {
            EcoCategory::Transportation => FormField::Transportation,
            EcoCategory::Diet => FormField::MeatDairy,
            EcoCategory::Shopping => FormField::Shopping,
            EcoCategory::Recycling => FormField::Recycling,
            EcoCategory::Reusables => FormField::Reusables,
            EcoCategory::Energy => FormField::HomeEnergy,
            EcoCategory::PaperDigital => FormField::PaperDigital,
            EcoCategory::Travel => FormField::PlaneTravel,
        };
        self.get(field)
    }
}

/// Addressable field of [`FormData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Transportation,
    MeatDairy,
    Shopping,
    Recycling,
    Reusables,
    HomeEnergy,
    PaperDigital,
    PlaneTravel,
    FirstName,
    Gender,
    Age,
    Height,
    Weight,
    WellnessGoal,
    ActivityLevel,
    DietPreference,
    Allergies,
    MedicalConditions,
    MealFrequency,
    CookingSkill,
    TimeAvailable,
    Budget,
    Email,
}

impl FormField {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Transportation => "transportation",
            Self::MeatDairy => "meatDairy",
            Self::Shopping => "shopping",
            Self::Recycling => "recycling",
            Self::Reusables => "reusables",
            Self::HomeEnergy => "homeEnergy",
            Self::PaperDigital => "paperDigital",
            Self::PlaneTravel => "planeTravel",
            Self::FirstName => "firstName",
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Height => "height",
            Self::Weight => "weight",
            Self::WellnessGoal => "wellnessGoal",
            Self::ActivityLevel => "activityLevel",
            Self::DietPreference => "dietPreference",
            Self::Allergies => "allergies",
            Self::MedicalConditions => "medicalConditions",
            Self::MealFrequency => "mealFrequency",
            Self::CookingSkill => "cookingSkill",
            Self::TimeAvailable => "timeAvailable",
            Self::Budget => "budget",
            Self::Email => "email",
        }
    }
}

/// Progress grouping shown above each question. Has no effect on transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Lifestyle,
    Health,
    MealPlanning,
    Contact,
    Summary,
}

impl Section {
    pub const fn for_step(step: StepIndex) -> Self {
        match step.get() {
            1..=8 => Self::Lifestyle,
            9..=15 => Self::Health,
            16..=21 => Self::MealPlanning,
            22 => Self::Contact,
            _ => Self::Summary,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Lifestyle => "Lifestyle & Eco Habits",
            Self::Health => "Health & Wellness",
            Self::MealPlanning => "Meal Planning Preferences",
            Self::Contact => "Stay in Touch",
            Self::Summary => "All Set",
        }
    }

    /// "Section k of 3" position for the three question sections.
    pub const fn ordinal(self) -> Option<u8> {
        match self {
            Self::Lifestyle => Some(1),
            Self::Health => Some(2),
            Self::MealPlanning => Some(3),
            Self::Contact | Self::Summary => None,
        }
    }
}

/// One-based position in the questionnaire, always within `1..=23`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StepIndex(u8);

impl StepIndex {
    pub const FIRST: Self = Self(1);
    pub const CONTACT: Self = Self(22);
    pub const SUMMARY: Self = Self(23);
    pub const TOTAL: u8 = 23;

    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= Self::TOTAL {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub(crate) const fn next(self) -> Self {
        if self.0 < Self::TOTAL {
            Self(self.0 + 1)
        } else {
            self
        }
    }

    pub(crate) const fn previous(self) -> Self {
        if self.0 > 1 {
            Self(self.0 - 1)
        } else {
            self
        }
    }
}

impl TryFrom<u8> for StepIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("step {value} outside 1..={}", Self::TOTAL))
    }
}

impl From<StepIndex> for u8 {
    fn from(value: StepIndex) -> Self {
        value.0
    }
}
