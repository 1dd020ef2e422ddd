//! Chart data
//!
//! Aggregates for the bar, doughnut and line charts. Everything here is
//! derived from typed scan results, history entries or `/api/stats`
//! counters.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::history::ScanHistory;
use crate::model::{Stats, Verdict};

/// Days shown by the placeholder line series
pub const PLACEHOLDER_DAYS: i64 = 7;

/// Colors per verdict, shared by every chart
pub const SAFE_COLOR: &str = "#10b981";
pub const SUSPICIOUS_COLOR: &str = "#f59e0b";
pub const DANGEROUS_COLOR: &str = "#ef4444";

/// Counts of the three verdict categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerdictCounts {
    pub safe: u64,
    pub suspicious: u64,
    pub dangerous: u64,
}

impl VerdictCounts {
    /// Count one verdict; unknown verdicts are not charted
    pub fn record(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::Safe => self.safe += 1,
            Verdict::Suspicious => self.suspicious += 1,
            Verdict::Dangerous => self.dangerous += 1,
            Verdict::Unknown(_) => {}
        }
    }

    pub fn from_history(history: &ScanHistory) -> Self {
        let mut counts = Self::default();
        for entry in history.iter() {
            counts.record(&entry.status);
        }
        counts
    }

    /// Best split available when only the aggregate counters are known
    pub fn from_stats(stats: &Stats) -> Self {
        Self {
            safe: stats.total_scans.saturating_sub(stats.threats_blocked),
            suspicious: 0,
            dangerous: stats.threats_blocked,
        }
    }

    pub fn total(&self) -> u64 {
        self.safe + self.suspicious + self.dangerous
    }

    /// `(label, count, color)` in display order
    pub fn series(&self) -> [(&'static str, u64, &'static str); 3] {
        [
            ("Safe", self.safe, SAFE_COLOR),
            ("Suspicious", self.suspicious, SUSPICIOUS_COLOR),
            ("Dangerous", self.dangerous, DANGEROUS_COLOR),
        ]
    }
}

/// One slice of the doughnut chart, angles in radians from 12 o'clock
#[derive(Debug, Clone, PartialEq)]
pub struct DoughnutSegment {
    pub label: &'static str,
    pub color: &'static str,
    pub start_angle: f64,
    pub sweep: f64,
}

/// Slices for non-zero categories; empty when there is nothing to show
pub fn doughnut_segments(counts: &VerdictCounts) -> Vec<DoughnutSegment> {
    let total = counts.total();
    if total == 0 {
        return Vec::new();
    }

    let mut start = -PI / 2.0;
    counts
        .series()
        .into_iter()
        .filter(|(_, count, _)| *count > 0)
        .map(|(label, count, color)| {
            let sweep = count as f64 / total as f64 * 2.0 * PI;
            let segment = DoughnutSegment {
                label,
                color,
                start_angle: start,
                sweep,
            };
            start += sweep;
            segment
        })
        .collect()
}

/// One day of the line chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub label: String,
    pub count: u32,
}

/// Line chart series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySeries {
    pub points: Vec<DailyPoint>,
    /// No real history yet; the points are a synthetic week
    pub placeholder: bool,
}

impl DailySeries {
    pub fn max_count(&self) -> u32 {
        self.points.iter().map(|p| p.count).max().unwrap_or(0)
    }
}

/// Bucket scan timestamps by calendar day in the viewer's time zone
///
/// Days come out oldest first. With no timestamps, returns the seven days
/// ending `today` with zero counts, flagged as a placeholder.
pub fn daily_series<Tz, F>(
    timestamps: &[DateTime<Utc>],
    tz: &Tz,
    today: NaiveDate,
    label: F,
) -> DailySeries
where
    Tz: TimeZone,
    F: Fn(NaiveDate) -> String,
{
    if timestamps.is_empty() {
        let points = (0..PLACEHOLDER_DAYS)
            .rev()
            .map(|offset| {
                let date = today - Duration::days(offset);
                DailyPoint {
                    date,
                    label: label(date),
                    count: 0,
                }
            })
            .collect();
        return DailySeries {
            points,
            placeholder: true,
        };
    }

    let mut buckets: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for ts in timestamps {
        let day = ts.with_timezone(tz).date_naive();
        *buckets.entry(day).or_insert(0) += 1;
    }

    DailySeries {
        points: buckets
            .into_iter()
            .map(|(date, count)| DailyPoint {
                date,
                label: label(date),
                count,
            })
            .collect(),
        placeholder: false,
    }
}

/// Default day label, e.g. `Mar 01`
pub fn short_day_label(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ScanHistoryEntry;
    use chrono::FixedOffset;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_counts_from_history() {
        let mut history = ScanHistory::default();
        for status in [
            Verdict::Safe,
            Verdict::Dangerous,
            Verdict::Safe,
            Verdict::Suspicious,
            Verdict::Unknown("odd".into()),
        ] {
            history.record(ScanHistoryEntry::new("https://a.test", status, Utc::now()));
        }

        let counts = VerdictCounts::from_history(&history);
        assert_eq!(
            counts,
            VerdictCounts {
                safe: 2,
                suspicious: 1,
                dangerous: 1
            }
        );
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_counts_from_stats() {
        let counts = VerdictCounts::from_stats(&Stats {
            total_scans: 10,
            threats_blocked: 3,
        });
        assert_eq!(counts.safe, 7);
        assert_eq!(counts.dangerous, 3);

        let odd = VerdictCounts::from_stats(&Stats {
            total_scans: 1,
            threats_blocked: 4,
        });
        assert_eq!(odd.safe, 0);
    }

    #[test]
    fn test_doughnut_covers_full_circle() {
        let counts = VerdictCounts {
            safe: 2,
            suspicious: 0,
            dangerous: 2,
        };
        let segments = doughnut_segments(&counts);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].label, "Safe");
        assert!((segments[0].sweep - PI).abs() < 1e-9);
        let total: f64 = segments.iter().map(|s| s.sweep).sum();
        assert!((total - 2.0 * PI).abs() < 1e-9);
        assert!((segments[1].start_angle - PI / 2.0).abs() < 1e-9);

        assert!(doughnut_segments(&VerdictCounts::default()).is_empty());
    }

    #[test]
    fn test_daily_buckets_oldest_first() {
        let stamps = vec![at(2025, 3, 2, 9), at(2025, 3, 1, 10), at(2025, 3, 2, 18)];
        let today = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let series = daily_series(&stamps, &Utc, today, short_day_label);

        assert!(!series.placeholder);
        let got: Vec<_> = series.points.iter().map(|p| (p.label.as_str(), p.count)).collect();
        assert_eq!(got, vec![("Mar 01", 1), ("Mar 02", 2)]);
        assert_eq!(series.max_count(), 2);
    }

    #[test]
    fn test_daily_buckets_use_viewer_time_zone() {
        // 23:00 UTC on Mar 1 is already Mar 2 at UTC+2
        let stamps = vec![at(2025, 3, 1, 23)];
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let series = daily_series(&stamps, &tz, today, short_day_label);
        assert_eq!(series.points[0].date, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
    }

    #[test]
    fn test_placeholder_week() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let series = daily_series(&[], &Utc, today, short_day_label);

        assert!(series.placeholder);
        assert_eq!(series.points.len(), 7);
        assert_eq!(series.points[0].label, "Feb 27");
        assert_eq!(series.points[6].date, today);
        assert_eq!(series.max_count(), 0);
    }
}
