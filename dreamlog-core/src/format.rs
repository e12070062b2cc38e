//! Formatting helpers shared by the report renderers and the CLI.

use chrono::{DateTime, Utc};

/// Bulleted `• key: count` lines, or `  None` when there is nothing to show.
pub fn format_counter<K, I>(entries: I, indent: usize) -> String
where
    K: std::fmt::Display,
    I: IntoIterator<Item = (K, u64)>,
{
    let pad = "  ".repeat(indent);
    let lines: Vec<String> = entries
        .into_iter()
        .map(|(key, count)| format!("{}• {}: {}", pad, key, count))
        .collect();
    if lines.is_empty() {
        format!("{}None", pad)
    } else {
        lines.join("\n")
    }
}

/// Day-granularity age of a timestamp relative to `now` ("today", "3 days ago").
pub fn format_days_ago(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = now.date_naive().signed_duration_since(ts.date_naive()).num_days();
    match days {
        d if d < 0 => "upcoming".to_string(),
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        d if d < 7 => format!("{} days ago", d),
        _ => ts.format("%b %d, %Y").to_string(),
    }
}

/// Signed delta with one decimal (e.g. "+1.5", "-0.3").
pub fn format_delta(delta: f64) -> String {
    if delta >= 0.0 {
        format!("+{:.1}", delta)
    } else {
        format!("{:.1}", delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_format_counter() {
        let out = format_counter(vec![("Happy", 2), ("Sad", 1)], 1);
        assert_eq!(out, "  • Happy: 2\n  • Sad: 1");
        assert_eq!(format_counter(Vec::<(&str, u64)>::new(), 1), "  None");
    }

    #[test]
    fn test_format_days_ago() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        assert_eq!(format_days_ago(now - Duration::hours(2), now), "today");
        assert_eq!(format_days_ago(now - Duration::days(1), now), "yesterday");
        assert_eq!(format_days_ago(now - Duration::days(4), now), "4 days ago");
        assert_eq!(format_days_ago(now - Duration::days(30), now), "May 11, 2024");
        assert_eq!(format_days_ago(now + Duration::days(2), now), "upcoming");
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(1.26), "+1.3");
        assert_eq!(format_delta(0.0), "+0.0");
        assert_eq!(format_delta(-0.34), "-0.3");
    }
}
