//! Wellness score calculations module
//!
//! Produces the 0-100 daily wellness score from a day's metrics, plus the
//! sleep-duration and check-in streak helpers shared by the state stores.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: No I/O and no clock reads; callers pass dates in
//! 2. **Bounded Output**: Component weights sum to exactly 100
//! 3. **Forgiving Input**: Out-of-range metrics clamp instead of failing

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::DailyMetrics;

// ============================================================================
// Weights and Targets
// ============================================================================

/// Water weight; full credit at [`WATER_TARGET_GLASSES`]
pub const WATER_WEIGHT: f64 = 12.0;
/// Sleep weight; full credit at [`SLEEP_TARGET_HOURS`]
pub const SLEEP_WEIGHT: f64 = 15.0;
/// Exercise weight; full credit at [`EXERCISE_TARGET_MINUTES`]
pub const EXERCISE_WEIGHT: f64 = 12.0;
/// Meals weight; full credit at [`MEALS_TARGET`]
pub const MEALS_WEIGHT: f64 = 8.0;
/// Mood rating weight
pub const MOOD_WEIGHT: f64 = 12.0;
/// Stress rating weight (inverted: low stress scores high)
pub const STRESS_WEIGHT: f64 = 8.0;
/// Energy rating weight
pub const ENERGY_WEIGHT: f64 = 8.0;
/// Toilet break weight; full credit at [`TOILET_TARGET_BREAKS`]
pub const TOILET_WEIGHT: f64 = 3.0;
/// Steps weight; full credit at [`STEPS_TARGET`]
pub const STEPS_WEIGHT: f64 = 10.0;
/// Heart rate credit when resting rate sits inside [`HEART_RATE_RANGE`]
pub const HEART_RATE_WEIGHT: f64 = 7.0;
/// Heart rate credit when resting rate falls outside the healthy band
pub const HEART_RATE_OFF_BAND: f64 = 3.0;
/// Blood oxygen weight; full credit at [`OXYGEN_TARGET_PERCENT`]
pub const OXYGEN_WEIGHT: f64 = 5.0;

pub const WATER_TARGET_GLASSES: f64 = 8.0;
pub const SLEEP_TARGET_HOURS: f64 = 8.0;
pub const EXERCISE_TARGET_MINUTES: f64 = 60.0;
pub const MEALS_TARGET: f64 = 3.0;
pub const TOILET_TARGET_BREAKS: f64 = 6.0;
pub const STEPS_TARGET: f64 = 10_000.0;
pub const OXYGEN_TARGET_PERCENT: f64 = 98.0;
/// Healthy resting heart rate band in bpm (inclusive)
pub const HEART_RATE_RANGE: std::ops::RangeInclusive<u32> = 60..=100;

/// Rating scale maximum (mood, stress, energy are 1-5)
const RATING_MAX: f64 = 5.0;

// ============================================================================
// Wellness Score
// ============================================================================

/// Per-component contribution to the wellness score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub water: f64,
    pub sleep: f64,
    pub exercise: f64,
    pub meals: f64,
    pub mood: f64,
    pub stress: f64,
    pub energy: f64,
    pub toilet_breaks: f64,
    pub steps: f64,
    pub heart_rate: f64,
    pub blood_oxygen: f64,
    /// Rounded sum of all components
    pub total: u8,
}

/// Fraction of `target` achieved, clamped to `[0, 1]`
fn attainment(value: f64, target: f64) -> f64 {
    (value / target).clamp(0.0, 1.0)
}

/// Calculate the per-component breakdown of the wellness score
///
/// Progress components (water, sleep, exercise, meals, toilet breaks,
/// steps, oxygen) award `weight * min(value/target, 1)`. Mood and energy
/// scale over the 1-5 rating; stress is inverted so a rating of 1 earns
/// the full weight and 5 earns nothing. Heart rate is a two-level band
/// check rather than a linear ramp.
pub fn score_breakdown(metrics: &DailyMetrics) -> ScoreBreakdown {
    let water = attainment(metrics.water as f64, WATER_TARGET_GLASSES) * WATER_WEIGHT;
    let sleep = attainment(metrics.sleep as f64, SLEEP_TARGET_HOURS) * SLEEP_WEIGHT;
    let exercise = attainment(metrics.exercise as f64, EXERCISE_TARGET_MINUTES) * EXERCISE_WEIGHT;
    let meals = attainment(metrics.meals as f64, MEALS_TARGET) * MEALS_WEIGHT;
    let mood = attainment(metrics.mood as f64, RATING_MAX) * MOOD_WEIGHT;
    let stress = ((RATING_MAX - metrics.stress as f64) / (RATING_MAX - 1.0)).clamp(0.0, 1.0)
        * STRESS_WEIGHT;
    let energy = attainment(metrics.energy as f64, RATING_MAX) * ENERGY_WEIGHT;
    let toilet_breaks =
        attainment(metrics.toilet_breaks as f64, TOILET_TARGET_BREAKS) * TOILET_WEIGHT;
    let steps = attainment(metrics.steps as f64, STEPS_TARGET) * STEPS_WEIGHT;
    let heart_rate = if HEART_RATE_RANGE.contains(&metrics.heart_rate) {
        HEART_RATE_WEIGHT
    } else {
        HEART_RATE_OFF_BAND
    };
    let blood_oxygen =
        attainment(metrics.blood_oxygen as f64, OXYGEN_TARGET_PERCENT) * OXYGEN_WEIGHT;

    let total = (water
        + sleep
        + exercise
        + meals
        + mood
        + stress
        + energy
        + toilet_breaks
        + steps
        + heart_rate
        + blood_oxygen)
        .round() as u8;

    ScoreBreakdown {
        water,
        sleep,
        exercise,
        meals,
        mood,
        stress,
        energy,
        toilet_breaks,
        steps,
        heart_rate,
        blood_oxygen,
        total,
    }
}

/// Calculate the 0-100 wellness score for a day's metrics
pub fn wellness_score(metrics: &DailyMetrics) -> u8 {
    score_breakdown(metrics).total
}

// ============================================================================
// Sleep Duration
// ============================================================================

/// Parse an `HH:MM` clock string into (hour, minute)
///
/// Returns `None` when the string is malformed or out of range.
pub fn parse_clock(value: &str) -> Option<(u32, u32)> {
    let (hour, minute) = value.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if hour < 24 && minute < 60 {
        Some((hour, minute))
    } else {
        None
    }
}

/// Hours slept between a bed time and wake time, rounded to one decimal
///
/// Wake times before the bed time are treated as the next day, so
/// `23:00` to `06:00` is 7.0 hours. Equal times yield 0.0.
pub fn sleep_duration_hours(bed_time: &str, wake_time: &str) -> Option<f64> {
    let (bed_hour, bed_min) = parse_clock(bed_time)?;
    let (wake_hour, wake_min) = parse_clock(wake_time)?;
    let mut duration = (wake_hour as f64 + wake_min as f64 / 60.0)
        - (bed_hour as f64 + bed_min as f64 / 60.0);
    if duration < 0.0 {
        duration += 24.0;
    }
    Some((duration * 10.0).round() / 10.0)
}

// ============================================================================
// Check-in Streaks
// ============================================================================

/// Streak value after a check-in on `today`
///
/// A check-in the day after the previous one extends the streak; a second
/// check-in on the same day leaves it unchanged; any gap (or a first-ever
/// check-in) resets it to 1.
pub fn next_streak(current: u32, last_check_in: Option<NaiveDate>, today: NaiveDate) -> u32 {
    match last_check_in {
        Some(last) if last == today => current.max(1),
        Some(last) if (today - last).num_days() == 1 => current + 1,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn metrics(
        water: u32,
        sleep: u32,
        exercise: u32,
        meals: u32,
        mood: u8,
        stress: u8,
        energy: u8,
        toilet_breaks: u32,
        steps: u32,
        heart_rate: u32,
        blood_oxygen: u32,
    ) -> DailyMetrics {
        DailyMetrics {
            water,
            sleep,
            exercise,
            meals,
            mood,
            stress,
            energy,
            toilet_breaks,
            steps,
            heart_rate,
            blood_oxygen,
            ..DailyMetrics::default()
        }
    }

    // =========================================================================
    // Wellness Score Tests
    // =========================================================================

    #[test]
    fn test_perfect_day_scores_100() {
        let m = metrics(8, 8, 60, 3, 5, 1, 5, 6, 10_000, 70, 98);
        assert_eq!(wellness_score(&m), 100);
    }

    #[test]
    fn test_worst_day_scores_floor() {
        // Ratings at their 1-5 floor still earn partial mood/energy credit,
        // and heart rate never drops below its off-band level:
        // 2.4 + 1.6 + 3.0 = 7
        let m = metrics(0, 0, 0, 0, 1, 5, 1, 0, 0, 40, 0);
        assert_eq!(wellness_score(&m), 7);
    }

    #[test]
    fn test_untouched_day_scores_28() {
        // Defaults: mood 7.2 + stress 4.0 + energy 4.8 + heart 7.0 + oxygen 5.0
        assert_eq!(wellness_score(&DailyMetrics::default()), 28);
    }

    #[test]
    fn test_components_cap_at_target() {
        let at_target = metrics(8, 8, 60, 3, 3, 3, 3, 6, 10_000, 70, 98);
        let overshoot = metrics(30, 20, 300, 9, 3, 3, 3, 20, 60_000, 70, 100);
        assert_eq!(wellness_score(&at_target), wellness_score(&overshoot));
    }

    #[test]
    fn test_heart_rate_band_edges() {
        for (hr, expected) in [(59, 3.0), (60, 7.0), (100, 7.0), (101, 3.0)] {
            let b = score_breakdown(&metrics(0, 0, 0, 0, 3, 3, 3, 0, 0, hr, 98));
            assert_eq!(b.heart_rate, expected, "heart rate {hr}");
        }
    }

    #[test]
    fn test_stress_component_spans_full_weight() {
        let calm = score_breakdown(&metrics(0, 0, 0, 0, 3, 1, 3, 0, 0, 70, 98));
        let frazzled = score_breakdown(&metrics(0, 0, 0, 0, 3, 5, 3, 0, 0, 70, 98));
        assert_eq!(calm.stress, STRESS_WEIGHT);
        assert_eq!(frazzled.stress, 0.0);
    }

    #[test]
    fn test_breakdown_total_matches_score() {
        let m = metrics(3, 6, 25, 2, 4, 2, 4, 3, 7_421, 88, 97);
        let b = score_breakdown(&m);
        assert_eq!(b.total, wellness_score(&m));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: score stays within the heart-rate floor and 100
        #[test]
        fn prop_score_bounded(
            water in 0u32..60,
            sleep in 0u32..30,
            exercise in 0u32..600,
            meals in 0u32..20,
            mood in 0u8..10,
            stress in 0u8..10,
            energy in 0u8..10,
            toilet in 0u32..40,
            steps in 0u32..120_000,
            heart_rate in 0u32..250,
            oxygen in 0u32..101
        ) {
            let score = wellness_score(&metrics(
                water, sleep, exercise, meals, mood, stress, energy,
                toilet, steps, heart_rate, oxygen,
            ));
            prop_assert!((3..=100).contains(&score), "score {score} out of bounds");
        }

        /// Property: drinking more never lowers the score
        #[test]
        fn prop_water_monotone(
            low in 0u32..10,
            extra in 1u32..10,
            sleep in 0u32..12,
            steps in 0u32..20_000
        ) {
            let a = wellness_score(&metrics(low, sleep, 0, 0, 3, 3, 3, 0, steps, 70, 98));
            let b = wellness_score(&metrics(low + extra, sleep, 0, 0, 3, 3, 3, 0, steps, 70, 98));
            prop_assert!(b >= a);
        }

        /// Property: higher stress never raises the score
        #[test]
        fn prop_stress_antitone(low in 1u8..5, extra in 1u8..4) {
            let relaxed = wellness_score(&metrics(4, 7, 30, 2, 3, low, 3, 2, 5_000, 70, 98));
            let stressed = wellness_score(&metrics(4, 7, 30, 2, 3, low + extra, 3, 2, 5_000, 70, 98));
            prop_assert!(stressed <= relaxed);
        }
    }

    // =========================================================================
    // Sleep Duration Tests
    // =========================================================================

    #[test]
    fn test_sleep_duration_across_midnight() {
        assert_eq!(sleep_duration_hours("22:00", "07:00"), Some(9.0));
        assert_eq!(sleep_duration_hours("23:00", "06:00"), Some(7.0));
    }

    #[test]
    fn test_sleep_duration_same_day() {
        assert_eq!(sleep_duration_hours("01:00", "09:30"), Some(8.5));
        assert_eq!(sleep_duration_hours("00:30", "06:15"), Some(5.8));
    }

    #[test]
    fn test_sleep_duration_equal_times_is_zero() {
        assert_eq!(sleep_duration_hours("08:00", "08:00"), Some(0.0));
    }

    #[test]
    fn test_sleep_duration_rejects_malformed_clocks() {
        assert_eq!(sleep_duration_hours("25:00", "07:00"), None);
        assert_eq!(sleep_duration_hours("22:61", "07:00"), None);
        assert_eq!(sleep_duration_hours("bedtime", "07:00"), None);
        assert_eq!(sleep_duration_hours("22:00", "7"), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: valid clocks always produce a duration in [0, 24]
        /// (23:59 spans round up to a full day)
        #[test]
        fn prop_duration_in_day_range(
            bh in 0u32..24, bm in 0u32..60,
            wh in 0u32..24, wm in 0u32..60
        ) {
            let bed = format!("{bh:02}:{bm:02}");
            let wake = format!("{wh:02}:{wm:02}");
            let duration = sleep_duration_hours(&bed, &wake);
            prop_assert!(duration.is_some());
            let d = duration.unwrap();
            prop_assert!((0.0..=24.0).contains(&d), "duration {d} for {bed}-{wake}");
        }
    }

    // =========================================================================
    // Streak Tests
    // =========================================================================

    #[test]
    fn test_streak_transitions() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2026, 8, 22).unwrap();
        let last_week = NaiveDate::from_ymd_opt(2026, 8, 16).unwrap();

        assert_eq!(next_streak(0, None, today), 1);
        assert_eq!(next_streak(4, Some(yesterday), today), 5);
        assert_eq!(next_streak(4, Some(today), today), 4);
        assert_eq!(next_streak(4, Some(last_week), today), 1);
    }

    #[test]
    fn test_streak_same_day_never_reports_zero() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        assert_eq!(next_streak(0, Some(today), today), 1);
    }
}
