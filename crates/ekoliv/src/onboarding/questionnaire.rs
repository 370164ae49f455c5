use serde::Serialize;

use super::domain::{FormData, FormField, Section, StepIndex};

/// The ordered step definitions of the onboarding flow.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingQuestionnaire {
    steps: Vec<StepTemplate>,
}

impl OnboardingQuestionnaire {
    pub fn standard() -> Self {
        Self {
            steps: standard_step_templates(),
        }
    }

    pub fn steps(&self) -> &[StepTemplate] {
        &self.steps
    }

    pub fn step(&self, index: StepIndex) -> Option<&StepTemplate> {
        self.steps.iter().find(|template| template.step == index.get())
    }

    pub fn steps_in_section(&self, section: Section) -> Vec<&StepTemplate> {
        self.steps
            .iter()
            .filter(|template| template.section == section)
            .collect()
    }

    /// The step that collects `field`.
    pub fn step_for_field(&self, field: FormField) -> Option<&StepTemplate> {
        self.steps
            .iter()
            .find(|template| template.input.fields().contains(&field))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepTemplate {
    pub step: u8,
    pub section: Section,
    pub prompt: &'static str,
    pub helper: &'static str,
    /// Optional steps always allow moving forward.
    pub optional: bool,
    pub input: StepInput,
}

impl StepTemplate {
    pub fn index(&self) -> StepIndex {
        StepIndex::new(self.step).unwrap_or(StepIndex::SUMMARY)
    }

    /// Whether the answers collected so far allow leaving this step forward.
    pub fn is_satisfied(&self, form: &FormData) -> bool {
        if self.optional {
            return true;
        }
        match &self.input {
            StepInput::Choice { field, .. } => form.is_set(*field),
            StepInput::Text { field, .. } => !form.get(*field).trim().is_empty(),
            StepInput::Age { .. } => form.age_years().is_some_and(|age| age > 0),
            StepInput::Measurements { .. } => {
                form.height_cm().is_some() && form.weight_kg().is_some()
            }
            StepInput::Email { .. } | StepInput::Summary => true,
        }
    }

    /// Checks a raw value for `field` against this step's input kind.
    pub fn accepts(&self, field: FormField, value: &str) -> bool {
        match &self.input {
            StepInput::Choice {
                field: own,
                options,
            } => *own == field && options.iter().any(|option| option.value == value),
            StepInput::Text { field: own, .. }
            | StepInput::Age { field: own, .. }
            | StepInput::Email { field: own, .. } => *own == field,
            StepInput::Measurements { .. } => {
                matches!(field, FormField::Height | FormField::Weight)
            }
            StepInput::Summary => false,
        }
    }
}

/// How a step collects its answer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepInput {
    Choice {
        field: FormField,
        options: Vec<AnswerOption>,
    },
    Text {
        field: FormField,
        placeholder: &'static str,
    },
    Age {
        field: FormField,
        placeholder: &'static str,
    },
    Measurements {
        height_placeholder: &'static str,
        weight_placeholder: &'static str,
    },
    Email {
        field: FormField,
        placeholder: &'static str,
    },
    Summary,
}

impl StepInput {
    pub fn fields(&self) -> Vec<FormField> {
        match self {
            Self::Choice { field, .. }
            | Self::Text { field, .. }
            | Self::Age { field, .. }
            | Self::Email { field, .. } => vec![*field],
            Self::Measurements { .. } => vec![FormField::Height, FormField::Weight],
            Self::Summary => Vec::new(),
        }
    }

    pub fn options(&self) -> &[AnswerOption] {
        match self {
            Self::Choice { options, .. } => options,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn option(value: &'static str, label: &'static str) -> AnswerOption {
    AnswerOption { value, label }
}

fn choice(
    step: u8,
    section: Section,
    field: FormField,
    prompt: &'static str,
    helper: &'static str,
    options: &[AnswerOption],
) -> StepTemplate {
    StepTemplate {
        step,
        section,
        prompt,
        helper,
        optional: false,
        input: StepInput::Choice {
            field,
            options: options.to_vec(),
        },
    }
}

fn standard_step_templates() -> Vec<StepTemplate> {
    use FormField as F;
    use Section::{Contact, Health, Lifestyle, MealPlanning, Summary};

    let mut allergies = choice(
        16,
        MealPlanning,
        F::Allergies,
        "Do you have any food allergies?",
        "We'll make sure your meal plan avoids these!",
        &[
            option("none", "None"),
            option("dairy-eggs", "Dairy / Eggs"),
            option("nuts-soy", "Nuts / Soy"),
            option("gluten-shellfish", "Gluten / Shellfish"),
        ],
    );
    allergies.optional = true;

    let mut medical = choice(
        17,
        MealPlanning,
        F::MedicalConditions,
        "Any medical conditions we should know about?",
        "Helps us provide safer, more personalized recommendations.",
        &[
            option("none", "None"),
            option("diabetes-bp", "Diabetes / High BP"),
            option("heart-kidney", "Heart / Kidney issues"),
            option("digestive-celiac", "Digestive / Celiac issues"),
        ],
    );
    medical.optional = true;

    vec![
        choice(
            1,
            Lifestyle,
            F::Transportation,
            "How do you usually get around?",
            "Every step counts, even small choices add up!",
            &[
                option("walk", "Walk or cycle"),
                option("public", "Public transport"),
                option("drive", "Drive a car"),
                option("fly", "Fly often for travel"),
            ],
        ),
        choice(
            2,
            Lifestyle,
            F::MeatDairy,
            "How often do you eat meat or dairy?",
            "Your plate tells your planet story.",
            &[
                option("never", "Never"),
                option("occasionally", "Occasionally"),
                option("few-times", "A few times a week"),
                option("daily", "Daily"),
            ],
        ),
        choice(
            3,
            Lifestyle,
            F::Shopping,
            "How do you usually shop for clothes?",
            "Sustainable fashion makes a big difference.",
            &[
                option("thrift", "Thrift or reuse items"),
                option("occasional", "Occasionally buy new"),
                option("regular", "Shop regularly"),
                option("premium", "Buy premium/fashion items often"),
            ],
        ),
        choice(
            4,
            Lifestyle,
            F::Recycling,
            "Do you recycle or compost at home?",
            "Even tiny habits create cleaner communities.",
            &[
                option("always", "Always"),
                option("sometimes", "Sometimes"),
                option("rarely", "Rarely"),
                option("never", "Never"),
            ],
        ),
        choice(
            5,
            Lifestyle,
            F::Reusables,
            "How often do you use reusable bottles or bags?",
            "Simple swaps, lasting impact.",
            &[
                option("always", "Always"),
                option("often", "Often"),
                option("sometimes", "Sometimes"),
                option("rarely", "Rarely"),
            ],
        ),
        choice(
            6,
            Lifestyle,
            F::HomeEnergy,
            "How do you power your home?",
            "Energy awareness starts right at home.",
            &[
                option("renewable", "Mostly renewable (solar/wind)"),
                option("mixed", "Mix of renewable and grid"),
                option("grid", "Mainly grid electricity"),
                option("unknown", "Don't know / not sure"),
            ],
        ),
        choice(
            7,
            Lifestyle,
            F::PaperDigital,
            "Do you prefer digital or paper for notes & bills?",
            "Small steps toward less waste.",
            &[
                option("fully-digital", "Fully digital"),
                option("mostly-digital", "Mostly digital"),
                option("both", "Use both equally"),
                option("mostly-paper", "Mostly paper"),
            ],
        ),
        choice(
            8,
            Lifestyle,
            F::PlaneTravel,
            "How often do you travel by plane?",
            "Travel consciously, tread lightly.",
            &[
                option("never", "Never"),
                option("once", "Once a year"),
                option("few-times", "A few times a year"),
                option("frequently", "Frequently"),
            ],
        ),
        StepTemplate {
            step: 9,
            section: Health,
            prompt: "What's your first name?",
            helper: "We'll personalize your journey with it!",
            optional: false,
            input: StepInput::Text {
                field: F::FirstName,
                placeholder: "Enter your first name",
            },
        },
        choice(
            10,
            Health,
            F::Gender,
            "What is your biological sex?",
            "This helps us calculate your personalized calorie needs accurately.",
            &[
                option("male", "Male"),
                option("female", "Female"),
                option("non-binary", "Non-binary / Other"),
                option("prefer-not-to-say", "Prefer not to say"),
            ],
        ),
        StepTemplate {
            step: 11,
            section: Health,
            prompt: "How old are you?",
            helper: "Age helps us tailor your wellness plan.",
            optional: false,
            input: StepInput::Age {
                field: F::Age,
                placeholder: "Enter your age",
            },
        },
        StepTemplate {
            step: 12,
            section: Health,
            prompt: "What's your height & weight?",
            helper: "We use this to calculate healthy goals. No one sees it but you.",
            optional: false,
            input: StepInput::Measurements {
                height_placeholder: "e.g., 170",
                weight_placeholder: "e.g., 70",
            },
        },
        choice(
            13,
            Health,
            F::WellnessGoal,
            "What's your main wellness goal?",
            "Your goal, your pace. We'll walk with you.",
            &[
                option("lose-weight", "Lose weight"),
                option("get-fit", "Get fit"),
                option("destress", "De-stress"),
                option("balance", "Maintain balance"),
            ],
        ),
        choice(
            14,
            Health,
            F::ActivityLevel,
            "How active are you in a normal day?",
            "Every movement matters!",
            &[
                option("sedentary", "Mostly sitting"),
                option("lightly-active", "Lightly active"),
                option("moderately-active", "Moderately active"),
                option("very-active", "Very active"),
            ],
        ),
        choice(
            15,
            Health,
            F::DietPreference,
            "Any dietary preferences?",
            "We'll use this to suggest your 7-day eco-meal plan.",
            &[
                option("vegan", "Vegan"),
                option("vegetarian", "Vegetarian"),
                option("non-vegetarian", "Non-vegetarian"),
                option("other", "Other / custom diet"),
            ],
        ),
        allergies,
        medical,
        choice(
            18,
            MealPlanning,
            F::MealFrequency,
            "How many meals do you prefer per day?",
            "We'll plan accordingly!",
            &[
                option("2-meals", "2 meals"),
                option("3-meals", "3 meals"),
                option("4-5-meals", "4-5 small meals"),
                option("flexible", "Flexible / varies daily"),
            ],
        ),
        choice(
            19,
            MealPlanning,
            F::CookingSkill,
            "What's your cooking skill level?",
            "No judgment. We'll match your comfort zone!",
            &[
                option("beginner", "Beginner"),
                option("intermediate", "Intermediate"),
                option("advanced", "Advanced"),
                option("prefer-takeout", "Prefer takeout"),
            ],
        ),
        choice(
            20,
            MealPlanning,
            F::TimeAvailable,
            "How much time can you spend cooking?",
            "We'll suggest quick or elaborate recipes accordingly.",
            &[
                option("under-30", "Under 30 mins"),
                option("30-60", "30-60 mins"),
                option("over-60", "Over 1 hour"),
                option("quick-prep", "Prefer quick prep meals"),
            ],
        ),
        choice(
            21,
            MealPlanning,
            F::Budget,
            "What's your meal budget range?",
            "Affordable & eco-friendly can go hand in hand!",
            &[
                option("low", "Budget-friendly"),
                option("medium", "Moderate"),
                option("high", "Premium"),
                option("flexible", "Flexible / no fixed budget"),
            ],
        ),
        StepTemplate {
            step: 22,
            section: Contact,
            prompt: "Want to save your plan & progress?",
            helper: "So you can get your plan and access your dashboard later!",
            optional: true,
            input: StepInput::Email {
                field: F::Email,
                placeholder: "Enter your email (optional)",
            },
        },
        StepTemplate {
            step: 23,
            section: Summary,
            prompt: "You're all set!",
            helper: "Your carbon footprint is analyzed and your wellness and meal plans are ready.",
            optional: true,
            input: StepInput::Summary,
        },
    ]
}
