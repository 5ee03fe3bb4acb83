use serde::{Deserialize, Serialize};

use crate::{
    ActivityLevel, AlcoholUse, ExistingCondition, Field, FieldKind, FieldValueError, Gender,
    SmokingStatus,
};

/// The full set of user-entered health attributes submitted for risk prediction.
///
/// Serializes to the exact request body the prediction service expects:
/// keys are the wire names from [`Field::name`], unanswered choices are `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    #[serde(rename = "Age")]
    pub age: i64,

    #[serde(rename = "Gender")]
    pub gender: Option<Gender>,

    #[serde(rename = "Height_cm")]
    pub height_cm: f64,

    #[serde(rename = "Weight_kg")]
    pub weight_kg: f64,

    #[serde(rename = "BMI")]
    pub bmi: f64,

    #[serde(rename = "SmokingStatus")]
    pub smoking_status: Option<SmokingStatus>,

    #[serde(rename = "AlcoholUse")]
    pub alcohol_use: Option<AlcoholUse>,

    #[serde(rename = "ActivityLevel")]
    pub activity_level: Option<ActivityLevel>,

    #[serde(rename = "SleepHours")]
    pub sleep_hours: i64,

    #[serde(rename = "FruitVegIntake")]
    pub fruit_veg_intake: i64,

    #[serde(rename = "FamilyHistory_HeartDisease")]
    pub family_history_heart_disease: bool,

    #[serde(rename = "FamilyHistory_Diabetes")]
    pub family_history_diabetes: bool,

    /// `None` is sent as an explicit `null`.
    #[serde(rename = "ExistingConditions")]
    pub existing_conditions: Option<ExistingCondition>,

    #[serde(rename = "BP_Systolic")]
    pub bp_systolic: i64,

    #[serde(rename = "BP_Diastolic")]
    pub bp_diastolic: i64,

    #[serde(rename = "FastingGlucose")]
    pub fasting_glucose: i64,

    #[serde(rename = "Cholesterol")]
    pub cholesterol: i64,
}

impl Default for HealthProfile {
    fn default() -> Self {
        Self {
            age: 30,
            gender: Some(Gender::Male),
            height_cm: 175.0,
            weight_kg: 75.0,
            bmi: 24.5,
            smoking_status: Some(SmokingStatus::Never),
            alcohol_use: Some(AlcoholUse::None),
            activity_level: Some(ActivityLevel::Moderate),
            sleep_hours: 7,
            fruit_veg_intake: 3,
            family_history_heart_disease: false,
            family_history_diabetes: false,
            existing_conditions: None,
            bp_systolic: 120,
            bp_diastolic: 80,
            fasting_glucose: 90,
            cholesterol: 100,
        }
    }
}

impl HealthProfile {
    /// Set a field from the text a user entered or the option they picked.
    ///
    /// Numeric input is read leniently: the leading number is taken and
    /// anything unparsable becomes `0`, which the validator then rejects where
    /// `0` is out of range. Choice fields take an option value from
    /// [`Field::options`]; the empty string clears the selection.
    pub fn set_input(&mut self, field: Field, input: &str) -> Result<(), FieldValueError> {
        match field.kind() {
            FieldKind::Int => *self.int_mut(field) = parse_int_prefix(input).unwrap_or(0),
            FieldKind::Float => *self.float_mut(field) = parse_float_prefix(input).unwrap_or(0.0),
            FieldKind::Bool => {
                let value = match input {
                    "true" => true,
                    "false" => false,
                    _ => {
                        return Err(FieldValueError::InvalidBool {
                            field,
                            input: input.to_string(),
                        });
                    }
                };
                match field {
                    Field::FamilyHistoryHeartDisease => self.family_history_heart_disease = value,
                    _ => self.family_history_diabetes = value,
                }
            }
            FieldKind::Choice => self.set_choice(field, input)?,
        }
        Ok(())
    }

    /// The current value of a field in the form accepted by [`Self::set_input`].
    pub fn input(&self, field: Field) -> String {
        match field {
            Field::Age => self.age.to_string(),
            Field::Gender => choice_str(self.gender.map(|g| g.as_str())),
            Field::HeightCm => self.height_cm.to_string(),
            Field::WeightKg => self.weight_kg.to_string(),
            Field::Bmi => self.bmi.to_string(),
            Field::SmokingStatus => choice_str(self.smoking_status.map(|s| s.as_str())),
            Field::AlcoholUse => choice_str(self.alcohol_use.map(|a| a.as_str())),
            Field::ActivityLevel => choice_str(self.activity_level.map(|a| a.as_str())),
            Field::SleepHours => self.sleep_hours.to_string(),
            Field::FruitVegIntake => self.fruit_veg_intake.to_string(),
            Field::FamilyHistoryHeartDisease => self.family_history_heart_disease.to_string(),
            Field::FamilyHistoryDiabetes => self.family_history_diabetes.to_string(),
            Field::ExistingConditions => choice_str(self.existing_conditions.map(|c| c.as_str())),
            Field::BpSystolic => self.bp_systolic.to_string(),
            Field::BpDiastolic => self.bp_diastolic.to_string(),
            Field::FastingGlucose => self.fasting_glucose.to_string(),
            Field::Cholesterol => self.cholesterol.to_string(),
        }
    }

    fn int_mut(&mut self, field: Field) -> &mut i64 {
        match field {
            Field::Age => &mut self.age,
            Field::SleepHours => &mut self.sleep_hours,
            Field::FruitVegIntake => &mut self.fruit_veg_intake,
            Field::BpSystolic => &mut self.bp_systolic,
            Field::BpDiastolic => &mut self.bp_diastolic,
            Field::FastingGlucose => &mut self.fasting_glucose,
            _ => &mut self.cholesterol,
        }
    }

    fn float_mut(&mut self, field: Field) -> &mut f64 {
        match field {
            Field::HeightCm => &mut self.height_cm,
            Field::WeightKg => &mut self.weight_kg,
            _ => &mut self.bmi,
        }
    }

    fn set_choice(&mut self, field: Field, input: &str) -> Result<(), FieldValueError> {
        let unknown = || FieldValueError::UnknownOption {
            field,
            input: input.to_string(),
        };
        match field {
            Field::Gender => self.gender = parse_choice(input).map_err(|_| unknown())?,
            Field::SmokingStatus => self.smoking_status = parse_choice(input).map_err(|_| unknown())?,
            Field::AlcoholUse => self.alcohol_use = parse_choice(input).map_err(|_| unknown())?,
            Field::ActivityLevel => self.activity_level = parse_choice(input).map_err(|_| unknown())?,
            _ => self.existing_conditions = parse_choice(input).map_err(|_| unknown())?,
        }
        Ok(())
    }
}

fn choice_str(value: Option<&'static str>) -> String {
    value.unwrap_or_default().to_string()
}

fn parse_choice<T: std::str::FromStr>(input: &str) -> Result<Option<T>, T::Err> {
    if input.is_empty() {
        Ok(None)
    } else {
        input.parse().map(Some)
    }
}

/// Reads an optionally signed run of digits at the start of `input`.
fn parse_int_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let end = trimmed
        .char_indices()
        .find(|&(idx, c)| !(c.is_ascii_digit() || (idx == 0 && (c == '-' || c == '+'))))
        .map_or(trimmed.len(), |(idx, _)| idx);
    trimmed[..end].parse().ok()
}

/// Reads the longest decimal literal at the start of `input`.
fn parse_float_prefix(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let end = trimmed
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')))
        .map_or(trimmed.len(), |(idx, _)| idx);
    (1..=end)
        .rev()
        .find_map(|len| trimmed[..len].parse::<f64>().ok())
}
