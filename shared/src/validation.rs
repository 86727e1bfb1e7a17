//! Input validation functions
//!
//! This module provides validation utilities for user input.
//! Mutation entry points run these before touching storage, so malformed
//! input is rejected without any partial write.

/// Longest accepted mood check-in note
pub const MAX_NOTE_LENGTH: usize = 500;
/// Longest accepted smartwatch device name
pub const MAX_DEVICE_NAME_LENGTH: usize = 100;
/// Longest accepted display name
pub const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Validate a 24-hour `HH:MM` clock string
pub fn validate_clock_time(value: &str) -> Result<(), String> {
    let clock_regex = regex_lite::Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap();
    if !clock_regex.is_match(value) {
        return Err(format!("Invalid time '{value}', expected HH:MM"));
    }
    Ok(())
}

/// Validate a sleep quality rating (1-5)
pub fn validate_sleep_quality(quality: u8) -> Result<(), String> {
    if !(1..=5).contains(&quality) {
        return Err("Sleep quality must be between 1 and 5".to_string());
    }
    Ok(())
}

/// Validate an optional mood check-in note
pub fn validate_note(note: &str) -> Result<(), String> {
    if note.len() > MAX_NOTE_LENGTH {
        return Err(format!(
            "Note too long (max {MAX_NOTE_LENGTH} characters)"
        ));
    }
    Ok(())
}

/// Validate a smartwatch device name
pub fn validate_device_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Device name cannot be empty".to_string());
    }
    if name.len() > MAX_DEVICE_NAME_LENGTH {
        return Err(format!(
            "Device name too long (max {MAX_DEVICE_NAME_LENGTH} characters)"
        ));
    }
    Ok(())
}

/// Validate a profile display name
pub fn validate_display_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.len() > MAX_DISPLAY_NAME_LENGTH {
        return Err("Name too long".to_string());
    }
    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("00:00", true)]
    #[case("07:30", true)]
    #[case("19:05", true)]
    #[case("23:59", true)]
    #[case("24:00", false)]
    #[case("12:60", false)]
    #[case("7:30", false)]
    #[case("07:3", false)]
    #[case("0730", false)]
    #[case("", false)]
    #[case("bedtime", false)]
    fn test_validate_clock_time(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(validate_clock_time(value).is_ok(), valid, "time '{value}'");
    }

    #[test]
    fn test_validate_sleep_quality() {
        assert!(validate_sleep_quality(1).is_ok());
        assert!(validate_sleep_quality(5).is_ok());
        assert!(validate_sleep_quality(0).is_err());
        assert!(validate_sleep_quality(6).is_err());
    }

    #[test]
    fn test_validate_note() {
        assert!(validate_note("").is_ok());
        assert!(validate_note("slept well").is_ok());
        assert!(validate_note(&"a".repeat(MAX_NOTE_LENGTH)).is_ok());
        assert!(validate_note(&"a".repeat(MAX_NOTE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_device_name() {
        assert!(validate_device_name("Apple Watch Series 9").is_ok());
        assert!(validate_device_name("").is_err());
        assert!(validate_device_name("   ").is_err());
        assert!(validate_device_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_display_name() {
        assert!(validate_display_name("John Wellness").is_ok());
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name("  ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("john@wellness.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@dot").is_err());
        assert!(validate_email("spaces in@email.com").is_err());
    }

    #[test]
    fn test_generated_emails_validate() {
        for _ in 0..20 {
            let email: String = SafeEmail().fake();
            assert!(
                validate_email(&email).is_ok(),
                "generated email {email} rejected"
            );
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_all_real_clock_times_valid(hour in 0u32..24, minute in 0u32..60) {
            let value = format!("{hour:02}:{minute:02}");
            prop_assert!(validate_clock_time(&value).is_ok(), "rejected '{value}'");
        }

        #[test]
        fn prop_out_of_range_hours_invalid(hour in 24u32..100, minute in 0u32..60) {
            let value = format!("{hour:02}:{minute:02}");
            prop_assert!(validate_clock_time(&value).is_err(), "accepted '{value}'");
        }

        #[test]
        fn prop_quality_range(quality in 1u8..=5) {
            prop_assert!(validate_sleep_quality(quality).is_ok());
        }

        #[test]
        fn prop_note_within_limit_valid(len in 0usize..=MAX_NOTE_LENGTH) {
            let note: String = (0..len).map(|_| 'a').collect();
            prop_assert!(validate_note(&note).is_ok());
        }
    }
}
