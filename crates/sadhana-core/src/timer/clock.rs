/// Duration choices offered as one-tap presets, in minutes.
pub const PRESET_MINUTES: [u64; 7] = [5, 10, 15, 20, 30, 45, 60];

pub const DEFAULT_DURATION_MIN: u64 = 15;

/// Upper bound of the custom duration slider, in minutes.
pub const MAX_DURATION_MIN: u64 = 120;

/// Convert minutes to seconds.
///
/// Uses saturating arithmetic to prevent overflow with large values.
pub fn minutes_to_secs(minutes: u64) -> u64 {
    minutes.saturating_mul(60)
}

/// Render seconds as zero-padded `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_padding() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(9), "00:09");
        assert_eq!(format_clock(15 * 60), "15:00");
        assert_eq!(format_clock(61), "01:01");
    }

    #[test]
    fn long_sittings_keep_counting_minutes() {
        assert_eq!(format_clock(120 * 60), "120:00");
    }

    #[test]
    fn presets_are_within_slider_range() {
        assert!(PRESET_MINUTES.iter().all(|&m| (1..=MAX_DURATION_MIN).contains(&m)));
        assert!(PRESET_MINUTES.contains(&DEFAULT_DURATION_MIN));
    }

    #[test]
    fn minute_conversion_saturates() {
        assert_eq!(minutes_to_secs(15), 900);
        assert_eq!(minutes_to_secs(u64::MAX), u64::MAX);
    }
}
