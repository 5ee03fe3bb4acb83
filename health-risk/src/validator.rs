//! Range and presence checks for a [`HealthProfile`].
//!
//! Every rule looks at a single field; there are no cross-field checks
//! (BMI is not compared against height and weight).

use std::ops::RangeInclusive;

use health_risk_types::{Field, HealthProfile, ValidationErrors};

pub const SLEEP_HOURS_RANGE: RangeInclusive<i64> = 1..=24;
pub const BP_SYSTOLIC_RANGE: RangeInclusive<i64> = 70..=250;
pub const BP_DIASTOLIC_RANGE: RangeInclusive<i64> = 40..=150;
pub const FASTING_GLUCOSE_RANGE: RangeInclusive<i64> = 50..=400;
pub const CHOLESTEROL_RANGE: RangeInclusive<i64> = 100..=500;

/// Validate every field of `profile`.
///
/// Returns an entry for each failing field; an empty set means the profile
/// may be submitted. Choice fields are only checked for presence.
pub fn validate(profile: &HealthProfile) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if profile.age < 1 {
        errors.insert(Field::Age, "Age must be at least 1");
    }
    if profile.gender.is_none() {
        errors.insert(Field::Gender, "Please select a gender");
    }
    // Negated so NaN is rejected too.
    if !(profile.height_cm >= 1.0) {
        errors.insert(Field::HeightCm, "Height must be at least 1 cm");
    }
    if !(profile.weight_kg >= 1.0) {
        errors.insert(Field::WeightKg, "Weight must be at least 1 kg");
    }
    if !(profile.bmi >= 1.0) {
        errors.insert(Field::Bmi, "BMI must be at least 1");
    }
    if profile.smoking_status.is_none() {
        errors.insert(Field::SmokingStatus, "Please select smoking status");
    }
    if profile.alcohol_use.is_none() {
        errors.insert(Field::AlcoholUse, "Please select alcohol use");
    }
    if profile.activity_level.is_none() {
        errors.insert(Field::ActivityLevel, "Please select activity level");
    }
    if !SLEEP_HOURS_RANGE.contains(&profile.sleep_hours) {
        errors.insert(Field::SleepHours, "Sleep hours must be between 1 and 24");
    }
    if profile.fruit_veg_intake < 0 {
        errors.insert(
            Field::FruitVegIntake,
            "Fruit/vegetable intake cannot be negative",
        );
    }
    if !BP_SYSTOLIC_RANGE.contains(&profile.bp_systolic) {
        errors.insert(Field::BpSystolic, "Systolic BP must be between 70 and 250");
    }
    if !BP_DIASTOLIC_RANGE.contains(&profile.bp_diastolic) {
        errors.insert(Field::BpDiastolic, "Diastolic BP must be between 40 and 150");
    }
    if !FASTING_GLUCOSE_RANGE.contains(&profile.fasting_glucose) {
        errors.insert(
            Field::FastingGlucose,
            "Fasting glucose must be between 50 and 400",
        );
    }
    if !CHOLESTEROL_RANGE.contains(&profile.cholesterol) {
        errors.insert(Field::Cholesterol, "Cholesterol must be between 100 and 500");
    }

    errors
}

/// `true` when [`validate`] finds nothing to report.
pub fn is_valid(profile: &HealthProfile) -> bool {
    validate(profile).is_empty()
}
