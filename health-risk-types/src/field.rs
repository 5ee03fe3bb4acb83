use std::fmt;

/// The input fields of the health risk form, in display order.
///
/// `name()` is the exact key used in the request body and in
/// [`ValidationErrors`](crate::ValidationErrors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Age,
    Gender,
    HeightCm,
    WeightKg,
    Bmi,
    SmokingStatus,
    AlcoholUse,
    ActivityLevel,
    SleepHours,
    FruitVegIntake,
    FamilyHistoryHeartDisease,
    FamilyHistoryDiabetes,
    ExistingConditions,
    BpSystolic,
    BpDiastolic,
    FastingGlucose,
    Cholesterol,
}

/// How a field is edited and how its input string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Whole number typed as text.
    Int,
    /// Decimal number typed as text.
    Float,
    /// Yes/No choice.
    Bool,
    /// One of a fixed list of options.
    Choice,
}

/// The visual grouping of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    BasicInformation,
    Lifestyle,
    MedicalHistory,
    VitalSigns,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Self::BasicInformation => "Basic Information",
            Self::Lifestyle => "Lifestyle Information",
            Self::MedicalHistory => "Medical History",
            Self::VitalSigns => "Vital Signs & Lab Results",
        }
    }
}

/// One selectable option of a choice field.
///
/// `value` is the input string understood by
/// [`HealthProfile::set_input`](crate::HealthProfile::set_input); the empty
/// string stands for "nothing selected".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn option(value: &'static str, label: &'static str) -> ChoiceOption {
    ChoiceOption { value, label }
}

const GENDER_OPTIONS: &[ChoiceOption] = &[
    option("", "Select gender"),
    option("male", "Male"),
    option("female", "Female"),
];

const SMOKING_OPTIONS: &[ChoiceOption] = &[
    option("", "Select smoking status"),
    option("never", "Never smoked"),
    option("former", "Former smoker"),
    option("current", "Current smoker"),
];

const ALCOHOL_OPTIONS: &[ChoiceOption] = &[
    option("", "Select alcohol consumption"),
    option("none", "None"),
    option("occasional", "Occasional"),
    option("regular", "Regular"),
];

const ACTIVITY_OPTIONS: &[ChoiceOption] = &[
    option("", "Select activity level"),
    option("low", "Low (sedentary)"),
    option("moderate", "Moderate (some exercise)"),
    option("high", "High (very active)"),
];

const YES_NO_OPTIONS: &[ChoiceOption] = &[option("false", "No"), option("true", "Yes")];

const CONDITION_OPTIONS: &[ChoiceOption] = &[
    option("", "None"),
    option("asthma", "Asthma"),
    option("copd", "COPD"),
    option("hypertension", "Hypertension"),
    option("diabetes", "Diabetes"),
];

impl Field {
    /// All fields, in display order.
    pub const ALL: [Field; 17] = [
        Field::Age,
        Field::Gender,
        Field::HeightCm,
        Field::WeightKg,
        Field::Bmi,
        Field::SmokingStatus,
        Field::AlcoholUse,
        Field::ActivityLevel,
        Field::SleepHours,
        Field::FruitVegIntake,
        Field::FamilyHistoryHeartDisease,
        Field::FamilyHistoryDiabetes,
        Field::ExistingConditions,
        Field::BpSystolic,
        Field::BpDiastolic,
        Field::FastingGlucose,
        Field::Cholesterol,
    ];

    /// The wire name of the field (case-sensitive).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::HeightCm => "Height_cm",
            Self::WeightKg => "Weight_kg",
            Self::Bmi => "BMI",
            Self::SmokingStatus => "SmokingStatus",
            Self::AlcoholUse => "AlcoholUse",
            Self::ActivityLevel => "ActivityLevel",
            Self::SleepHours => "SleepHours",
            Self::FruitVegIntake => "FruitVegIntake",
            Self::FamilyHistoryHeartDisease => "FamilyHistory_HeartDisease",
            Self::FamilyHistoryDiabetes => "FamilyHistory_Diabetes",
            Self::ExistingConditions => "ExistingConditions",
            Self::BpSystolic => "BP_Systolic",
            Self::BpDiastolic => "BP_Diastolic",
            Self::FastingGlucose => "FastingGlucose",
            Self::Cholesterol => "Cholesterol",
        }
    }

    /// Look a field up by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// The label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Age => "Age (years)",
            Self::Gender => "Gender",
            Self::HeightCm => "Height (cm)",
            Self::WeightKg => "Weight (kg)",
            Self::Bmi => "BMI (Body Mass Index)",
            Self::SmokingStatus => "Smoking Status",
            Self::AlcoholUse => "Alcohol Consumption",
            Self::ActivityLevel => "Physical Activity Level",
            Self::SleepHours => "Sleep Hours (per night)",
            Self::FruitVegIntake => "Fruit & Vegetable Servings (per day)",
            Self::FamilyHistoryHeartDisease => "Family History of Heart Disease",
            Self::FamilyHistoryDiabetes => "Family History of Diabetes",
            Self::ExistingConditions => "Existing Medical Conditions (if any)",
            Self::BpSystolic => "Blood Pressure - Systolic (mmHg)",
            Self::BpDiastolic => "Blood Pressure - Diastolic (mmHg)",
            Self::FastingGlucose => "Fasting Glucose (mg/dL)",
            Self::Cholesterol => "Cholesterol (mg/dL)",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Age
            | Self::SleepHours
            | Self::FruitVegIntake
            | Self::BpSystolic
            | Self::BpDiastolic
            | Self::FastingGlucose
            | Self::Cholesterol => FieldKind::Int,
            Self::HeightCm | Self::WeightKg | Self::Bmi => FieldKind::Float,
            Self::FamilyHistoryHeartDisease | Self::FamilyHistoryDiabetes => FieldKind::Bool,
            Self::Gender
            | Self::SmokingStatus
            | Self::AlcoholUse
            | Self::ActivityLevel
            | Self::ExistingConditions => FieldKind::Choice,
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Self::Age | Self::Gender | Self::HeightCm | Self::WeightKg | Self::Bmi => {
                Section::BasicInformation
            }
            Self::SmokingStatus
            | Self::AlcoholUse
            | Self::ActivityLevel
            | Self::SleepHours
            | Self::FruitVegIntake => Section::Lifestyle,
            Self::FamilyHistoryHeartDisease
            | Self::FamilyHistoryDiabetes
            | Self::ExistingConditions => Section::MedicalHistory,
            Self::BpSystolic | Self::BpDiastolic | Self::FastingGlucose | Self::Cholesterol => {
                Section::VitalSigns
            }
        }
    }

    /// Options for `Bool` and `Choice` fields; empty for numeric fields.
    pub fn options(&self) -> &'static [ChoiceOption] {
        match self {
            Self::Gender => GENDER_OPTIONS,
            Self::SmokingStatus => SMOKING_OPTIONS,
            Self::AlcoholUse => ALCOHOL_OPTIONS,
            Self::ActivityLevel => ACTIVITY_OPTIONS,
            Self::ExistingConditions => CONDITION_OPTIONS,
            Self::FamilyHistoryHeartDisease | Self::FamilyHistoryDiabetes => YES_NO_OPTIONS,
            _ => &[],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
