//! Activity counts and recent-activity lists.

use crate::entities::{Activity, ActivityType};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStats {
    pub total: usize,
    /// Activities within the last seven days.
    pub this_week: usize,
    /// Activities since the first instant of the current UTC month.
    pub this_month: usize,
    /// Only types that occur are present.
    pub by_type: BTreeMap<ActivityType, usize>,
}

pub fn activity_stats(activities: &[Activity], now: DateTime<Utc>) -> ActivityStats {
    let week_start = now - Duration::days(7);
    let month_start = month_start(now);

    let mut stats = ActivityStats {
        total: activities.len(),
        ..Default::default()
    };
    for activity in activities {
        if activity.timestamp >= week_start {
            stats.this_week += 1;
        }
        if activity.timestamp >= month_start {
            stats.this_month += 1;
        }
        *stats.by_type.entry(activity.activity_type).or_insert(0) += 1;
    }
    stats
}

/// Midnight UTC on the first day of `now`'s month.
fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let first = NaiveDate::from_ymd_opt(now.year(), now.month(), 1).unwrap_or(now.date_naive());
    first.and_hms_opt(0, 0, 0).map_or(now, |start| start.and_utc())
}

/// The newest `limit` activities, newest first.
pub fn recent_activities(activities: &[Activity], limit: usize) -> Vec<&Activity> {
    let mut recent: Vec<&Activity> = activities.iter().collect();
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    recent.truncate(limit);
    recent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ActivityDraft;
    use crate::types::RecordId;
    use chrono::TimeZone;

    fn at(id: u32, activity_type: ActivityType, timestamp: DateTime<Utc>) -> Activity {
        Activity::from_draft(
            RecordId(id),
            ActivityDraft::new(activity_type, format!("A{id}"))
                .for_contact(RecordId(1))
                .at(timestamp),
            timestamp,
        )
    }

    #[test]
    fn test_month_start() {
        let now = Utc.with_ymd_and_hms(2025, 3, 17, 15, 42, 9).unwrap();
        assert_eq!(month_start(now), Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_week_and_month_windows() {
        let now = Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap();
        let acts = vec![
            at(1, ActivityType::Call, now - Duration::hours(1)),
            // Inside the week but in last month.
            at(2, ActivityType::Email, now - Duration::days(6)),
            at(3, ActivityType::Call, now - Duration::days(7)),
            at(4, ActivityType::Note, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()),
            at(5, ActivityType::Meeting, now - Duration::days(40)),
        ];

        let stats = activity_stats(&acts, now);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.this_week, 4);
        assert_eq!(stats.this_month, 2);
        assert_eq!(stats.by_type.get(&ActivityType::Call), Some(&2));
        assert_eq!(stats.by_type.get(&ActivityType::Task), None);
    }

    #[test]
    fn test_empty_stats() {
        let stats = activity_stats(&[], Utc::now());
        assert_eq!(stats, ActivityStats::default());
    }

    #[test]
    fn test_recent_is_newest_first() {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let acts: Vec<_> = (1..=7)
            .map(|i| at(i, ActivityType::Task, base + Duration::days(i as i64)))
            .collect();
        let recent: Vec<_> = recent_activities(&acts, 5).iter().map(|a| a.id.0).collect();
        assert_eq!(recent, vec![7, 6, 5, 4, 3]);
    }
}
