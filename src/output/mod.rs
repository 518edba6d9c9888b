// Output formatting: terminal dashboard and JSON snapshots.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Human-readable distance from `then` to `now`, e.g. "12s ago", "3 min ago".
pub fn format_age(then: chrono::DateTime<chrono::Utc>, now: chrono::DateTime<chrono::Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);
    if secs < 60 {
        format!("{secs}s ago")
    } else if secs < 60 * 60 {
        format!("{} min ago", secs / 60)
    } else if secs < 24 * 60 * 60 {
        format!("{} h ago", secs / 3600)
    } else {
        format!("{} days ago", secs / 86_400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("promoção", 5), "promo...");
        assert_eq!(truncate_chars("oi", 5), "oi");
    }

    #[test]
    fn test_format_age() {
        let now = Utc::now();
        assert_eq!(format_age(now - Duration::seconds(12), now), "12s ago");
        assert_eq!(format_age(now - Duration::minutes(3), now), "3 min ago");
        assert_eq!(format_age(now - Duration::hours(5), now), "5 h ago");
        assert_eq!(format_age(now - Duration::days(2), now), "2 days ago");
        assert_eq!(format_age(now + Duration::seconds(5), now), "0s ago");
    }
}
