//! Wellness Companion Shared Library
//!
//! This crate contains the data models, wellness score calculations, and
//! input validation shared by the state-store core and any future
//! front-end bindings.

pub mod models;
pub mod scoring;
pub mod validation;

// Re-export commonly used items
pub use models::{
    BreakKind, CounterMetric, DailyMetrics, HealthReading, MoodEntry, MoodType,
    MotivationKind, MotivationMessage, ProfileUpdate, RatingMetric, ReadingKind,
    ReadingSource, SleepEntry, SleepInput, SmartWatchData, ToiletEntry, User,
};
pub use scoring::{score_breakdown, sleep_duration_hours, wellness_score, ScoreBreakdown};
