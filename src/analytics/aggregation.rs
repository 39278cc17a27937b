//! Buckets raw earnings and hours records into chart-ready series.
//!
//! [aggregate] is a pure function of its inputs: the current date is passed
//! in rather than read from the clock.

use serde::Serialize;
use time::{Date, Duration, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

use super::{record::AnalyticsRecord, timeframe::Timeframe};

const WEEKDAY_LABEL_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday repr:short]");
const DAY_MONTH_LABEL_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day padding:none] [month repr:short]");

/// How records are grouped into points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucketing {
    /// One point per calendar day.
    Daily,
    /// One point per seven days, counted from the start of the window.
    Weekly,
}

impl Bucketing {
    fn days_per_bucket(self) -> usize {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
        }
    }
}

/// A single labelled value in a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// The x-axis label, e.g. "Mon" or "Week 2".
    pub label: String,
    /// The sum of the records in the bucket.
    pub value: f64,
}

/// The points for a timeframe and their total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSeries {
    /// The window the series covers.
    pub timeframe: Timeframe,
    /// The buckets in chronological order, including empty ones.
    pub points: Vec<SeriesPoint>,
    /// The sum of the point values.
    pub total: f64,
}

/// Sum the records that fall in `timeframe`'s window ending at `today`.
///
/// Records are grouped per `bucketing` and the buckets are returned in
/// chronological order. Buckets without records are kept with a value of zero
/// so that the chart axis has no gaps. Records outside the window are ignored.
///
/// # Errors
/// Returns [Error::CorruptRecord] for the first record in the window whose
/// value is negative, NaN or infinite.
pub fn aggregate(
    records: &[AnalyticsRecord],
    timeframe: Timeframe,
    today: Date,
    bucketing: Bucketing,
) -> Result<AnalyticsSeries, Error> {
    let window = timeframe.window(today);
    let start = *window.start();
    let day_count = (today - start).whole_days() as usize + 1;
    let days_per_bucket = bucketing.days_per_bucket();
    let mut values = vec![0.0; day_count.div_ceil(days_per_bucket)];

    for record in records.iter().filter(|record| window.contains(&record.date)) {
        if !record.value.is_finite() || record.value < 0.0 {
            return Err(Error::CorruptRecord {
                date: record.date,
                value: record.value,
            });
        }

        let offset = (record.date - start).whole_days() as usize;
        values[offset / days_per_bucket] += record.value;
    }

    let points: Vec<SeriesPoint> = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| SeriesPoint {
            label: bucket_label(timeframe, bucketing, start, index),
            value,
        })
        .collect();
    let total = points.iter().map(|point| point.value).sum();

    Ok(AnalyticsSeries {
        timeframe,
        points,
        total,
    })
}

fn bucket_label(timeframe: Timeframe, bucketing: Bucketing, start: Date, index: usize) -> String {
    if timeframe == Timeframe::Today {
        return "Today".to_owned();
    }

    match bucketing {
        Bucketing::Weekly => format!("Week {}", index + 1),
        Bucketing::Daily => {
            let date = start
                .checked_add(Duration::days(index as i64))
                .unwrap_or(Date::MAX);
            let format = if timeframe == Timeframe::SevenDays {
                WEEKDAY_LABEL_FORMAT
            } else {
                DAY_MONTH_LABEL_FORMAT
            };

            date.format(format).unwrap_or_else(|_| date.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        analytics::{AnalyticsRecord, RecordSource, SeriesKind, sample_records},
    };

    use super::{AnalyticsSeries, Bucketing, aggregate};
    use crate::analytics::Timeframe;

    fn labels(series: &AnalyticsSeries) -> Vec<&str> {
        series.points.iter().map(|point| point.label.as_str()).collect()
    }

    fn values(series: &AnalyticsSeries) -> Vec<f64> {
        series.points.iter().map(|point| point.value).collect()
    }

    fn record(date: time::Date, value: f64) -> AnalyticsRecord {
        AnalyticsRecord { date, value }
    }

    // 1 December 2024 is a Sunday.
    const TODAY: time::Date = date!(2024 - 12 - 01);

    #[test]
    fn daily_earnings_for_seven_days() {
        let earnings = sample_records(TODAY).records(SeriesKind::Earnings).unwrap();

        let series = aggregate(&earnings, Timeframe::SevenDays, TODAY, Bucketing::Daily).unwrap();

        assert_eq!(
            labels(&series),
            ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        );
        assert_eq!(
            values(&series),
            [150.0, 230.0, 180.0, 250.0, 200.0, 300.0, 280.0]
        );
        assert_eq!(series.total, 1590.0);
        assert_eq!(series.timeframe, Timeframe::SevenDays);
    }

    #[test]
    fn today_has_single_bucket() {
        let earnings = sample_records(TODAY).records(SeriesKind::Earnings).unwrap();

        let series = aggregate(&earnings, Timeframe::Today, TODAY, Bucketing::Daily).unwrap();

        assert_eq!(labels(&series), ["Today"]);
        assert_eq!(series.total, 280.0);
    }

    #[test]
    fn thirty_days_labels_with_day_and_month() {
        let earnings = sample_records(TODAY).records(SeriesKind::Earnings).unwrap();

        let series = aggregate(&earnings, Timeframe::ThirtyDays, TODAY, Bucketing::Daily).unwrap();

        assert_eq!(series.points.len(), 30);
        assert_eq!(series.points[0].label, "2 Nov");
        assert_eq!(series.points[29].label, "1 Dec");
    }

    #[test]
    fn weekly_hours_for_thirty_days() {
        let hours = sample_records(TODAY).records(SeriesKind::Hours).unwrap();

        let series = aggregate(&hours, Timeframe::ThirtyDays, TODAY, Bucketing::Weekly).unwrap();

        assert_eq!(
            labels(&series),
            ["Week 1", "Week 2", "Week 3", "Week 4", "Week 5"]
        );
        assert_eq!(values(&series), [42.5, 42.5, 42.5, 42.5, 5.5]);
        assert_eq!(series.total, 175.5);
    }

    #[test]
    fn weekly_hours_for_seven_days() {
        let hours = sample_records(TODAY).records(SeriesKind::Hours).unwrap();

        let series = aggregate(&hours, Timeframe::SevenDays, TODAY, Bucketing::Weekly).unwrap();

        assert_eq!(labels(&series), ["Week 1"]);
        assert_eq!(series.total, 42.5);
    }

    #[test]
    fn empty_buckets_are_kept() {
        let records = [record(date!(2024 - 11 - 27), 12.0)];

        let series = aggregate(&records, Timeframe::SevenDays, TODAY, Bucketing::Daily).unwrap();

        assert_eq!(values(&series), [0.0, 0.0, 12.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(series.total, 12.0);
    }

    #[test]
    fn no_records_gives_zero_series() {
        let series = aggregate(&[], Timeframe::SevenDays, TODAY, Bucketing::Daily).unwrap();

        assert_eq!(series.points.len(), 7);
        assert_eq!(series.total, 0.0);
    }

    #[test]
    fn records_on_the_same_day_are_summed() {
        let records = [record(TODAY, 2.5), record(TODAY, 1.25), record(TODAY, 0.25)];

        let series = aggregate(&records, Timeframe::Today, TODAY, Bucketing::Daily).unwrap();

        assert_eq!(values(&series), [4.0]);
    }

    #[test]
    fn records_outside_window_are_ignored() {
        let records = [
            record(date!(2024 - 11 - 24), 100.0),
            record(date!(2024 - 11 - 25), 1.0),
            record(date!(2024 - 12 - 02), 100.0),
        ];

        let series = aggregate(&records, Timeframe::SevenDays, TODAY, Bucketing::Daily).unwrap();

        assert_eq!(series.total, 1.0);
    }

    #[test]
    fn corrupt_record_in_window_is_an_error() {
        let records = [record(date!(2024 - 11 - 30), 10.0), record(TODAY, -5.0)];

        let result = aggregate(&records, Timeframe::SevenDays, TODAY, Bucketing::Daily);

        assert_eq!(
            result,
            Err(Error::CorruptRecord {
                date: TODAY,
                value: -5.0
            })
        );
    }

    #[test]
    fn non_finite_record_is_an_error() {
        let records = [record(TODAY, f64::INFINITY)];

        let result = aggregate(&records, Timeframe::Today, TODAY, Bucketing::Weekly);

        assert!(matches!(result, Err(Error::CorruptRecord { .. })));
    }

    #[test]
    fn corrupt_record_outside_window_is_ignored() {
        let records = [record(date!(2024 - 10 - 01), -5.0), record(TODAY, 3.0)];

        let result = aggregate(&records, Timeframe::ThirtyDays, TODAY, Bucketing::Daily);

        assert_eq!(result.map(|series| series.total), Ok(3.0));
    }

    #[test]
    fn total_is_sum_of_points_and_in_window_records() {
        let earnings = sample_records(TODAY).records(SeriesKind::Earnings).unwrap();

        for timeframe in Timeframe::ALL {
            for bucketing in [Bucketing::Daily, Bucketing::Weekly] {
                let series = aggregate(&earnings, timeframe, TODAY, bucketing).unwrap();
                let window = timeframe.window(TODAY);
                let in_window: f64 = earnings
                    .iter()
                    .filter(|record| window.contains(&record.date))
                    .map(|record| record.value)
                    .sum();

                assert_eq!(series.total, values(&series).iter().sum::<f64>());
                assert_eq!(series.total, in_window);
                assert_eq!(
                    series,
                    aggregate(&earnings, timeframe, TODAY, bucketing).unwrap()
                );
            }
        }
    }

    #[test]
    fn serializes_to_json() {
        let records = [record(TODAY, 2.5)];
        let series = aggregate(&records, Timeframe::Today, TODAY, Bucketing::Daily).unwrap();

        let json = serde_json::to_value(&series).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "timeframe": "today",
                "points": [{ "label": "Today", "value": 2.5 }],
                "total": 2.5
            })
        );
    }
}
