use chrono::{DateTime, Utc};

/// `HH:MM` in UTC, as shown next to chat lines.
#[must_use]
pub fn format_clock_time(value: DateTime<Utc>) -> String {
    value.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::time::fixed_now;

    #[test]
    fn formats_hours_and_minutes() {
        assert_eq!(format_clock_time(fixed_now()), "09:00");
    }
}
