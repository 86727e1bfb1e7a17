//! Storage key namespace
//!
//! Every key the app persists, in one place. Keys match the blobs
//! written by the mobile app byte for byte.

use chrono::NaiveDate;

/// Signed-in [`User`](wellness_companion_shared::User) blob
pub const AUTH_USER: &str = "wellness_auth_user";
/// Most recent mood check-in
pub const CURRENT_MOOD: &str = "wellness_current_mood";
/// Append-only list of all mood check-ins
pub const MOOD_HISTORY: &str = "wellness_mood_history";
/// Generated motivation messages, newest last
pub const MOTIVATION_MESSAGES: &str = "wellness_motivation_messages";
/// Lifetime check-in counter, stored as a plain integer string
pub const CHECK_IN_COUNT: &str = "wellness_check_in_count";
/// Consecutive-day check-in streak, stored as a plain integer string
pub const STREAK_DAYS: &str = "wellness_streak_days";
/// Logged sleep entries, newest last
pub const SLEEP_HISTORY: &str = "wellness_sleep_history";
/// Logged toilet breaks, newest last
pub const TOILET_HISTORY: &str = "wellness_toilet_history";
/// Paired smartwatch state (absent when disconnected)
pub const SMARTWATCH_DATA: &str = "wellness_smartwatch_data";
/// Individual health readings (loaded for app compatibility)
pub const HEALTH_READINGS: &str = "wellness_health_readings";

/// Key holding the metrics blob for one calendar day
pub fn daily_metrics(date: NaiveDate) -> String {
    format!("wellness_daily_metrics_{}", date.format("%Y-%m-%d"))
}
