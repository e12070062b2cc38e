//! Time-ordered projections of single record fields.
//!
//! These are chart inputs: records sorted by timestamp (stable, so equal
//! timestamps keep their input order) and projected to `(timestamp, value)`.
//! No smoothing, resampling or gap filling happens here.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::DreamRecord;

/// One point of a trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint<T> {
    pub timestamp: DateTime<Utc>,
    pub value: T,
}

/// Records sorted by ascending timestamp; stable for equal timestamps.
fn chronological(records: &[DreamRecord]) -> Vec<&DreamRecord> {
    let mut ordered: Vec<&DreamRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.timestamp());
    ordered
}

/// Emotion of each record over time.
pub fn build_emotion_timeline(records: &[DreamRecord]) -> Vec<TrendPoint<String>> {
    chronological(records)
        .into_iter()
        .map(|r| TrendPoint {
            timestamp: r.timestamp(),
            value: r.emotion().to_string(),
        })
        .collect()
}

/// Sleep quality of each record over time.
pub fn build_sleep_quality_series(records: &[DreamRecord]) -> Vec<TrendPoint<u8>> {
    chronological(records)
        .into_iter()
        .map(|r| TrendPoint {
            timestamp: r.timestamp(),
            value: r.sleep_quality(),
        })
        .collect()
}

/// The `n` newest records, newest first; equal timestamps keep input order.
pub fn recent(records: &[DreamRecord], n: usize) -> Vec<&DreamRecord> {
    let mut ordered: Vec<&DreamRecord> = records.iter().collect();
    ordered.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    ordered.truncate(n);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::sentiment::SentimentClassifier;
    use crate::types::NewDream;
    use chrono::{Duration, TimeZone};

    fn at(hours: i64, title: &str, emotion: &str, sleep: u8) -> DreamRecord {
        let base = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        DreamRecord::create_at(
            NewDream::new(title, "something happened", emotion).sleep_quality(sleep),
            &SentimentClassifier::default(),
            base + Duration::hours(hours),
        )
        .unwrap()
    }

    #[test]
    fn test_emotion_timeline_sorted() {
        let records = vec![
            at(5, "c", "Sad", 4),
            at(1, "a", "Happy", 7),
            at(3, "b", "Curious", 6),
        ];
        let timeline = build_emotion_timeline(&records);
        let emotions: Vec<&str> = timeline.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(emotions, vec!["Happy", "Curious", "Sad"]);
        assert!(timeline.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_stable_for_equal_timestamps() {
        let records = vec![
            at(2, "first", "Angry", 1),
            at(2, "second", "Peaceful", 2),
            at(0, "zero", "Sad", 3),
            at(2, "third", "Happy", 4),
        ];
        let emotions: Vec<String> = build_emotion_timeline(&records)
            .into_iter()
            .map(|p| p.value)
            .collect();
        assert_eq!(emotions, vec!["Sad", "Angry", "Peaceful", "Happy"]);

        let sleep: Vec<u8> = build_sleep_quality_series(&records)
            .into_iter()
            .map(|p| p.value)
            .collect();
        assert_eq!(sleep, vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_timeline_depends_on_timestamps_not_input_order() {
        let records = vec![at(1, "a", "Happy", 7), at(2, "b", "Sad", 3)];
        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(
            build_emotion_timeline(&records),
            build_emotion_timeline(&reversed)
        );
    }

    #[test]
    fn test_empty_series() {
        assert!(build_emotion_timeline(&[]).is_empty());
        assert!(build_sleep_quality_series(&[]).is_empty());
        assert!(recent(&[], 5).is_empty());
    }

    #[test]
    fn test_recent() {
        let records = vec![
            at(1, "old", "Happy", 5),
            at(9, "newest", "Happy", 5),
            at(4, "middle", "Happy", 5),
        ];
        let titles: Vec<&str> = recent(&records, 2).iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["newest", "middle"]);
        assert_eq!(recent(&records, 10).len(), 3);
    }

    #[test]
    fn test_recent_stable_for_equal_timestamps() {
        let records = vec![
            at(2, "first", "Happy", 5),
            at(0, "old", "Happy", 5),
            at(2, "second", "Happy", 5),
            at(2, "third", "Happy", 5),
        ];
        let titles: Vec<&str> = recent(&records, 4).iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["first", "second", "third", "old"]);
    }
}
