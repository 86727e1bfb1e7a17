//! Data models for the Wellness Companion application
//!
//! Every persisted record keeps the mobile app's JSON field naming
//! (camelCase, lowercase enum strings) so blobs written by the app
//! deserialize unchanged and vice versa.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Account
// ============================================================================

/// Signed-in user record, persisted as a single blob under the auth key.
///
/// Ids are provider-issued opaque strings (the mock provider issues
/// `mock_user_123`), not UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Partial profile edit; `None` fields are left untouched by the merge.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.picture.is_none()
    }
}

// ============================================================================
// Mood check-ins
// ============================================================================

/// Mood selected during a check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodType {
    Amazing,
    Good,
    Okay,
    Low,
    Struggling,
}

impl MoodType {
    /// The wire/prompt spelling ("amazing", "good", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodType::Amazing => "amazing",
            MoodType::Good => "good",
            MoodType::Okay => "okay",
            MoodType::Low => "low",
            MoodType::Struggling => "struggling",
        }
    }
}

impl fmt::Display for MoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "amazing" => Ok(MoodType::Amazing),
            "good" => Ok(MoodType::Good),
            "okay" => Ok(MoodType::Okay),
            "low" => Ok(MoodType::Low),
            "struggling" => Ok(MoodType::Struggling),
            other => Err(format!("unknown mood '{other}'")),
        }
    }
}

/// One mood check-in. Append-only; entries are never edited or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    pub mood: MoodType,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ============================================================================
// Motivation messages
// ============================================================================

/// Flavor of a generated motivation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotivationKind {
    Affirmation,
    Quote,
    Tip,
}

/// AI-generated (or fallback) motivational message; one is "current" per
/// local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationMessage {
    pub id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: MotivationKind,
    pub date: DateTime<Utc>,
}

// ============================================================================
// Daily metrics
// ============================================================================

/// Per-calendar-day aggregate of wellness measurements.
///
/// Counters saturate at zero; ratings live in `[1,5]`; the remaining
/// vitals are filled by the smartwatch sync simulation. The record is
/// persisted wholesale under a day-suffixed key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyMetrics {
    pub water: u32,
    pub sleep: u32,
    pub exercise: u32,
    pub meals: u32,
    pub mood: u8,
    pub stress: u8,
    pub energy: u8,
    pub toilet_breaks: u32,
    pub steps: u32,
    pub heart_rate: u32,
    pub blood_pressure_systolic: u32,
    pub blood_pressure_diastolic: u32,
    pub blood_glucose: u32,
    pub blood_oxygen: u32,
    pub body_fat_percentage: f64,
    pub muscle_mass: f64,
    pub bone_density: f64,
    pub metabolic_age: u32,
}

impl Default for DailyMetrics {
    fn default() -> Self {
        Self {
            water: 0,
            sleep: 0,
            exercise: 0,
            meals: 0,
            mood: 3,
            stress: 3,
            energy: 3,
            toilet_breaks: 0,
            steps: 0,
            heart_rate: 70,
            blood_pressure_systolic: 120,
            blood_pressure_diastolic: 80,
            blood_glucose: 90,
            blood_oxygen: 98,
            body_fat_percentage: 20.0,
            muscle_mass: 30.0,
            bone_density: 1.2,
            metabolic_age: 25,
        }
    }
}

/// Counter-style fields of [`DailyMetrics`], adjustable by signed deltas
/// and clamped at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMetric {
    Water,
    SleepHours,
    Exercise,
    Meals,
    ToiletBreaks,
    Steps,
}

impl CounterMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterMetric::Water => "water",
            CounterMetric::SleepHours => "sleep",
            CounterMetric::Exercise => "exercise",
            CounterMetric::Meals => "meals",
            CounterMetric::ToiletBreaks => "toiletBreaks",
            CounterMetric::Steps => "steps",
        }
    }
}

impl fmt::Display for CounterMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CounterMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "water" => Ok(CounterMetric::Water),
            "sleep" => Ok(CounterMetric::SleepHours),
            "exercise" => Ok(CounterMetric::Exercise),
            "meals" => Ok(CounterMetric::Meals),
            "toiletBreaks" | "toilet_breaks" => Ok(CounterMetric::ToiletBreaks),
            "steps" => Ok(CounterMetric::Steps),
            other => Err(format!("unknown counter metric '{other}'")),
        }
    }
}

/// Rating-style fields of [`DailyMetrics`], set to absolute values in `[1,5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingMetric {
    Mood,
    Stress,
    Energy,
}

impl RatingMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingMetric::Mood => "mood",
            RatingMetric::Stress => "stress",
            RatingMetric::Energy => "energy",
        }
    }
}

impl fmt::Display for RatingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RatingMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mood" => Ok(RatingMetric::Mood),
            "stress" => Ok(RatingMetric::Stress),
            "energy" => Ok(RatingMetric::Energy),
            other => Err(format!("unknown rating metric '{other}'")),
        }
    }
}

impl DailyMetrics {
    /// Current value of a counter field
    pub fn counter(&self, metric: CounterMetric) -> u32 {
        match metric {
            CounterMetric::Water => self.water,
            CounterMetric::SleepHours => self.sleep,
            CounterMetric::Exercise => self.exercise,
            CounterMetric::Meals => self.meals,
            CounterMetric::ToiletBreaks => self.toilet_breaks,
            CounterMetric::Steps => self.steps,
        }
    }

    /// Overwrite a counter field
    pub fn set_counter(&mut self, metric: CounterMetric, value: u32) {
        match metric {
            CounterMetric::Water => self.water = value,
            CounterMetric::SleepHours => self.sleep = value,
            CounterMetric::Exercise => self.exercise = value,
            CounterMetric::Meals => self.meals = value,
            CounterMetric::ToiletBreaks => self.toilet_breaks = value,
            CounterMetric::Steps => self.steps = value,
        }
    }

    /// Current value of a rating field
    pub fn rating(&self, metric: RatingMetric) -> u8 {
        match metric {
            RatingMetric::Mood => self.mood,
            RatingMetric::Stress => self.stress,
            RatingMetric::Energy => self.energy,
        }
    }

    /// Overwrite a rating field
    pub fn set_rating(&mut self, metric: RatingMetric, value: u8) {
        match metric {
            RatingMetric::Mood => self.mood = value,
            RatingMetric::Stress => self.stress = value,
            RatingMetric::Energy => self.energy = value,
        }
    }
}

// ============================================================================
// Sleep
// ============================================================================

/// Logged night of sleep. `bed_time`/`wake_time` are `HH:MM` clock strings
/// as entered in the app; `duration` is derived at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepEntry {
    pub id: String,
    pub bed_time: String,
    pub wake_time: String,
    pub duration: f64,
    pub quality: u8,
    pub date: NaiveDate,
}

/// Input for logging a night of sleep; the id and derived duration are
/// filled in by the store.
#[derive(Debug, Clone)]
pub struct SleepInput {
    pub bed_time: String,
    pub wake_time: String,
    pub quality: u8,
    /// Defaults to today when omitted
    pub date: Option<NaiveDate>,
}

// ============================================================================
// Toilet breaks
// ============================================================================

/// Reason a toilet break was logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakKind {
    Bathroom,
    Hydration,
}

impl BreakKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakKind::Bathroom => "bathroom",
            BreakKind::Hydration => "hydration",
        }
    }
}

impl FromStr for BreakKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bathroom" => Ok(BreakKind::Bathroom),
            "hydration" => Ok(BreakKind::Hydration),
            other => Err(format!("unknown break kind '{other}'")),
        }
    }
}

/// One logged toilet break. Appending one also increments the day's
/// `toilet_breaks` counter (a separate, non-atomic write).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToiletEntry {
    pub id: String,
    pub time: DateTime<Utc>,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: BreakKind,
}

// ============================================================================
// Smartwatch
// ============================================================================

/// Simulated smartwatch pairing state. Singleton; removed on disconnect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartWatchData {
    pub device_name: String,
    pub last_sync: DateTime<Utc>,
    pub battery_level: u8,
    pub is_connected: bool,
}

// ============================================================================
// Health readings
// ============================================================================

/// Measurement category of a [`HealthReading`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadingKind {
    HeartRate,
    BloodPressure,
    BloodGlucose,
    BloodOxygen,
    Steps,
}

/// Where a [`HealthReading`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingSource {
    Manual,
    Smartwatch,
}

/// Individual timestamped measurement. The app declared and loaded these
/// but no mutation ever records one; the contract is kept so app-written
/// blobs still round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReading {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ReadingKind,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub source: ReadingSource,
}
