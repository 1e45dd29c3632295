//! Daily schedule coverage analysis against the business window.
//!
//! Given a day's staff schedule intervals, computes which portions of the
//! business day are uncovered. A day with no schedule at all is reported
//! distinctly from a day whose schedule leaves gaps: operators respond to
//! the two differently.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::config::BusinessHours;
use crate::interval::TimeInterval;
use crate::merge::merge_intervals;

/// An uncovered stretch of the business window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageGap {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub duration_minutes: i64,
}

/// Coverage summary for one business day. Strictly derived, recomputed on
/// every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCoverage {
    pub date: NaiveDate,
    /// False only when the day had no schedule intervals at all.
    pub has_intervals: bool,
    pub gaps: Vec<CoverageGap>,
    pub covered_minutes: i64,
    pub required_minutes: i64,
    pub coverage_percentage: i64,
}

impl DayCoverage {
    /// Whether the day's total gap time exceeds the configured threshold.
    pub fn has_significant_gap(&self, threshold_minutes: i64) -> bool {
        self.gaps
            .iter()
            .map(|gap| gap.duration_minutes)
            .sum::<i64>()
            > threshold_minutes
    }
}

/// Compute coverage of the business window by the day's intervals.
///
/// Intervals extending outside the window are clipped, not rejected; a
/// merged interval entirely outside the window contributes nothing and
/// generates no surrounding gaps.
pub fn analyze_coverage(
    date: NaiveDate,
    intervals: &[TimeInterval],
    window: &BusinessHours,
) -> DayCoverage {
    let required_minutes = window.required_minutes();
    let window_start = date.and_time(window.start);
    let window_end = date.and_time(window.end);

    if intervals.is_empty() {
        return DayCoverage {
            date,
            has_intervals: false,
            gaps: vec![CoverageGap {
                start: window.start,
                end: window.end,
                duration_minutes: required_minutes,
            }],
            covered_minutes: 0,
            required_minutes,
            coverage_percentage: 0,
        };
    }

    let mut gaps = Vec::new();
    let mut covered_minutes = 0;
    let mut cursor = window_start;

    for merged in merge_intervals(intervals) {
        let Some(clipped) = merged.clip(window_start, window_end) else {
            continue;
        };
        if clipped.start() > cursor {
            gaps.push(gap_between(cursor, clipped.start()));
        }
        covered_minutes += clipped.duration_minutes();
        cursor = clipped.end();
    }

    if cursor < window_end {
        gaps.push(gap_between(cursor, window_end));
    }

    DayCoverage {
        date,
        has_intervals: true,
        gaps,
        covered_minutes,
        required_minutes,
        coverage_percentage: percentage(covered_minutes, required_minutes),
    }
}

fn gap_between(start: NaiveDateTime, end: NaiveDateTime) -> CoverageGap {
    CoverageGap {
        start: start.time(),
        end: end.time(),
        duration_minutes: (end - start).num_minutes(),
    }
}

/// Round-half-up integer percentage.
fn percentage(covered: i64, required: i64) -> i64 {
    if required <= 0 {
        return 0;
    }
    (covered * 100 + required / 2) / required
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn window(start: (u32, u32), end: (u32, u32)) -> BusinessHours {
        BusinessHours {
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    fn iv(start: (u32, u32), end: (u32, u32)) -> TimeInterval {
        TimeInterval::from_times(
            day(),
            NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        )
        .unwrap()
    }

    fn t(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    #[test]
    fn test_full_coverage_by_touching_shifts() {
        // 10:00-22:00 window covered by two back-to-back shifts.
        let coverage = analyze_coverage(
            day(),
            &[iv((10, 0), (14, 0)), iv((14, 0), (18, 0)), iv((18, 0), (22, 0))],
            &window((10, 0), (22, 0)),
        );
        assert!(coverage.has_intervals);
        assert!(coverage.gaps.is_empty());
        assert_eq!(coverage.covered_minutes, 720);
        assert_eq!(coverage.coverage_percentage, 100);
    }

    #[test]
    fn test_two_shifts_full_window() {
        let coverage = analyze_coverage(
            day(),
            &[iv((10, 0), (14, 0)), iv((14, 0), (18, 0))],
            &window((10, 0), (18, 0)),
        );
        assert_eq!(coverage.coverage_percentage, 100);
        assert!(coverage.gaps.is_empty());
    }

    #[test]
    fn test_midday_gap() {
        // 10:00-12:00 and 16:00-18:00 in a 10:00-22:00 window: one midday
        // gap plus the uncovered evening.
        let coverage = analyze_coverage(
            day(),
            &[iv((10, 0), (12, 0)), iv((16, 0), (18, 0))],
            &window((10, 0), (22, 0)),
        );
        assert_eq!(
            coverage.gaps,
            vec![
                CoverageGap {
                    start: t(12, 0),
                    end: t(16, 0),
                    duration_minutes: 240,
                },
                CoverageGap {
                    start: t(18, 0),
                    end: t(22, 0),
                    duration_minutes: 240,
                },
            ]
        );
        assert_eq!(coverage.covered_minutes, 240);
        assert_eq!(coverage.coverage_percentage, 33);
    }

    #[test]
    fn test_empty_schedule_is_one_full_gap() {
        let coverage = analyze_coverage(day(), &[], &window((10, 0), (22, 0)));
        assert!(!coverage.has_intervals);
        assert_eq!(coverage.covered_minutes, 0);
        assert_eq!(coverage.coverage_percentage, 0);
        assert_eq!(
            coverage.gaps,
            vec![CoverageGap {
                start: t(10, 0),
                end: t(22, 0),
                duration_minutes: 720,
            }]
        );
    }

    #[test]
    fn test_leading_gap_before_first_shift() {
        let coverage = analyze_coverage(day(), &[iv((12, 0), (22, 0))], &window((10, 0), (22, 0)));
        assert_eq!(
            coverage.gaps,
            vec![CoverageGap {
                start: t(10, 0),
                end: t(12, 0),
                duration_minutes: 120,
            }]
        );
    }

    #[test]
    fn test_shift_straddling_window_is_clipped() {
        // 8:00-23:30 shift in a 10:00-22:00 window counts as 720 minutes.
        let coverage = analyze_coverage(day(), &[iv((8, 0), (23, 30))], &window((10, 0), (22, 0)));
        assert_eq!(coverage.covered_minutes, 720);
        assert_eq!(coverage.coverage_percentage, 100);
        assert!(coverage.gaps.is_empty());
    }

    #[test]
    fn test_shift_outside_window_contributes_nothing() {
        // An early-morning shift leaves the whole window uncovered, but
        // has_intervals stays true: a schedule exists.
        let coverage = analyze_coverage(day(), &[iv((6, 0), (9, 0))], &window((10, 0), (22, 0)));
        assert!(coverage.has_intervals);
        assert_eq!(coverage.covered_minutes, 0);
        assert_eq!(coverage.coverage_percentage, 0);
        assert_eq!(
            coverage.gaps,
            vec![CoverageGap {
                start: t(10, 0),
                end: t(22, 0),
                duration_minutes: 720,
            }]
        );
    }

    #[test]
    fn test_overlapping_shifts_count_once() {
        let coverage = analyze_coverage(
            day(),
            &[iv((10, 0), (16, 0)), iv((12, 0), (18, 0))],
            &window((10, 0), (22, 0)),
        );
        assert_eq!(coverage.covered_minutes, 480);
    }

    #[test]
    fn test_coverage_conservation() {
        // covered_minutes equals the independently-computed sum of the
        // clipped merged durations.
        let intervals = vec![
            iv((9, 0), (11, 30)),
            iv((11, 0), (13, 0)),
            iv((15, 0), (23, 0)),
        ];
        let hours = window((10, 0), (22, 0));
        let coverage = analyze_coverage(day(), &intervals, &hours);

        let expected: i64 = crate::merge::merge_intervals(&intervals)
            .iter()
            .filter_map(|m| m.clip(day().and_time(hours.start), day().and_time(hours.end)))
            .map(|c| c.duration_minutes())
            .sum();
        assert_eq!(coverage.covered_minutes, expected);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 359/720 = 49.86% -> 50
        let coverage = analyze_coverage(day(), &[iv((10, 0), (15, 59))], &window((10, 0), (22, 0)));
        assert_eq!(coverage.covered_minutes, 359);
        assert_eq!(coverage.coverage_percentage, 50);
    }

    #[test]
    fn test_significant_gap_threshold_is_strict() {
        let coverage = analyze_coverage(
            day(),
            &[iv((10, 0), (12, 0)), iv((14, 0), (22, 0))],
            &window((10, 0), (22, 0)),
        );
        // Exactly 120 gap minutes: not significant at the default.
        assert!(!coverage.has_significant_gap(120));
        assert!(coverage.has_significant_gap(119));
    }

    #[test]
    fn test_configured_threshold_flags_long_gap_days() {
        let config = crate::config::EngineConfig::default();
        let coverage = analyze_coverage(
            day(),
            &[iv((10, 0), (12, 0)), iv((16, 0), (18, 0))],
            &window((10, 0), (22, 0)),
        );
        assert!(coverage.has_significant_gap(config.significant_gap_minutes));
    }

    #[test]
    fn test_empty_day_is_significant() {
        let coverage = analyze_coverage(day(), &[], &window((10, 0), (22, 0)));
        assert!(coverage.has_significant_gap(120));
    }
}
