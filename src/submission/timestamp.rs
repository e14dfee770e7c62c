use chrono::{DateTime, FixedOffset, Utc};

/// Render `at` as `DD/MM/YYYY, hh:mm am` in the given offset.
pub fn format_display(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset)
        .format("%d/%m/%Y, %I:%M %P")
        .to_string()
}
