//! Raw earnings and hours records and the sources that supply them.

use std::{fmt::Debug, io::Read, path::Path, str::FromStr, sync::Arc};

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use time::{Date, Duration, Weekday};

use crate::{Error, timezone::get_local_date, transaction::parse_date};

use super::aggregation::Bucketing;

/// A single dated earnings or hours value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticsRecord {
    /// The day the value was recorded.
    pub date: Date,
    /// Dollars earned or hours worked on `date`.
    pub value: f64,
}

/// The analytics series shown on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    /// Fare earnings in dollars.
    Earnings,
    /// Hours on duty.
    Hours,
}

impl SeriesKind {
    /// The name used in URLs, e.g. "earnings".
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Earnings => "earnings",
            Self::Hours => "hours",
        }
    }

    /// The card and chart title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Earnings => "Earnings",
            Self::Hours => "Hours Worked",
        }
    }

    /// How records of this kind are grouped into chart points.
    pub fn bucketing(self) -> Bucketing {
        match self {
            Self::Earnings => Bucketing::Daily,
            Self::Hours => Bucketing::Weekly,
        }
    }
}

impl FromStr for SeriesKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "earnings" => Ok(Self::Earnings),
            "hours" => Ok(Self::Hours),
            _ => Err(Error::UnknownSeries(s.to_owned())),
        }
    }
}

/// Supplies the earnings and hours records that analytics are computed from.
pub trait RecordSource: Send + Sync + Debug {
    /// Get every record of `kind`, in any order.
    ///
    /// # Errors
    /// Implementations may return an error if the underlying data cannot be read.
    fn records(&self, kind: SeriesKind) -> Result<Arc<[AnalyticsRecord]>, Error>;
}

/// Earnings and hours records held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryRecords {
    earnings: Arc<[AnalyticsRecord]>,
    hours: Arc<[AnalyticsRecord]>,
}

impl InMemoryRecords {
    /// Create a source from lists of earnings and hours records.
    pub fn new(earnings: Vec<AnalyticsRecord>, hours: Vec<AnalyticsRecord>) -> Self {
        Self {
            earnings: earnings.into(),
            hours: hours.into(),
        }
    }
}

impl Default for InMemoryRecords {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl RecordSource for InMemoryRecords {
    fn records(&self, kind: SeriesKind) -> Result<Arc<[AnalyticsRecord]>, Error> {
        let records = match kind {
            SeriesKind::Earnings => &self.earnings,
            SeriesKind::Hours => &self.hours,
        };

        Ok(Arc::clone(records))
    }
}

#[derive(Debug, Deserialize)]
struct RecordRow {
    date: String,
    value: f64,
}

/// Read records from CSV data with the header `date,value`.
///
/// Values are not checked here, a negative value is reported when a series
/// that includes it is aggregated.
///
/// # Errors
/// Returns [Error::CsvError] if a row cannot be parsed or [Error::InvalidDate]
/// if a date is not in the `YYYY-MM-DD` format.
pub fn read_records_csv<R: Read>(reader: R) -> Result<Vec<AnalyticsRecord>, Error> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(reader)
        .into_deserialize::<RecordRow>()
        .map(|row| -> Result<AnalyticsRecord, Error> {
            let row = row?;

            Ok(AnalyticsRecord {
                date: parse_date(&row.date)?,
                value: row.value,
            })
        })
        .collect()
}

/// Read records from the CSV file at `path`.
///
/// # Errors
/// Returns [Error::CsvError] if the file cannot be opened, or any of the
/// errors from [read_records_csv].
pub fn read_records_csv_path(path: &Path) -> Result<Vec<AnalyticsRecord>, Error> {
    let file = std::fs::File::open(path).map_err(|error| {
        tracing::error!("could not open {}: {error}", path.display());
        Error::CsvError(format!("{}: {error}", path.display()))
    })?;

    read_records_csv(file)
}

/// Sample records for the 30 days up to and including `today`.
///
/// Earnings follow a weekly pattern that peaks on Saturday. Hours follow a
/// weekday shift pattern with Sunday off.
pub fn sample_records(today: Date) -> InMemoryRecords {
    let (earnings, hours) = (0..30)
        .rev()
        .filter_map(|days_ago| today.checked_sub(Duration::days(days_ago)))
        .map(|date| {
            let (earned, worked) = sample_day(date.weekday());

            (
                AnalyticsRecord {
                    date,
                    value: earned,
                },
                AnalyticsRecord {
                    date,
                    value: worked,
                },
            )
        })
        .unzip();

    InMemoryRecords::new(earnings, hours)
}

/// Sample records that always end at today's date in the operator's timezone.
///
/// The records are regenerated on every call, so a long-running server keeps
/// showing data for "Today" after midnight.
#[derive(Debug, Clone)]
pub struct SampleRecords {
    local_timezone: String,
}

impl SampleRecords {
    /// Create a source for the timezone named by `local_timezone`, e.g. "America/Lower_Princes".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(local_timezone: &str) -> Result<Self, Error> {
        get_local_date(local_timezone)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
        })
    }
}

impl RecordSource for SampleRecords {
    fn records(&self, kind: SeriesKind) -> Result<Arc<[AnalyticsRecord]>, Error> {
        let today = get_local_date(&self.local_timezone)?;

        sample_records(today).records(kind)
    }
}

fn sample_day(weekday: Weekday) -> (f64, f64) {
    match weekday {
        Weekday::Monday => (150.0, 7.5),
        Weekday::Tuesday => (230.0, 8.0),
        Weekday::Wednesday => (180.0, 6.5),
        Weekday::Thursday => (250.0, 8.0),
        Weekday::Friday => (200.0, 7.0),
        Weekday::Saturday => (300.0, 5.5),
        Weekday::Sunday => (280.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use time::macros::date;

    use crate::Error;

    use time::OffsetDateTime;

    use super::{
        AnalyticsRecord, RecordSource, SampleRecords, SeriesKind, read_records_csv,
        sample_records,
    };

    #[test]
    fn parses_series_names() {
        assert_eq!(SeriesKind::from_str("earnings"), Ok(SeriesKind::Earnings));
        assert_eq!(SeriesKind::from_str("hours"), Ok(SeriesKind::Hours));
        assert_eq!(
            SeriesKind::from_str("tips"),
            Err(Error::UnknownSeries("tips".to_owned()))
        );
    }

    #[test]
    fn reads_records_from_csv() {
        let csv = "date,value\n2024-12-01,150.00\n2024-12-02, 230.5\n";

        let records = read_records_csv(csv.as_bytes()).unwrap();

        assert_eq!(
            records,
            [
                AnalyticsRecord {
                    date: date!(2024 - 12 - 01),
                    value: 150.0
                },
                AnalyticsRecord {
                    date: date!(2024 - 12 - 02),
                    value: 230.5
                },
            ]
        );
    }

    #[test]
    fn csv_keeps_negative_values_for_aggregation_to_reject() {
        let csv = "date,value\n2024-12-01,-5\n";

        let records = read_records_csv(csv.as_bytes()).unwrap();

        assert_eq!(records[0].value, -5.0);
    }

    #[test]
    fn csv_with_bad_date_is_rejected() {
        let csv = "date,value\n01/12/2024,150\n";

        assert_eq!(
            read_records_csv(csv.as_bytes()),
            Err(Error::InvalidDate("01/12/2024".to_owned()))
        );
    }

    #[test]
    fn sample_records_cover_thirty_days() {
        let today = date!(2024 - 12 - 01);

        let records = sample_records(today);
        let earnings = records.records(SeriesKind::Earnings).unwrap();
        let hours = records.records(SeriesKind::Hours).unwrap();

        assert_eq!(earnings.len(), 30);
        assert_eq!(hours.len(), 30);
        assert_eq!(earnings[0].date, date!(2024 - 11 - 02));
        assert_eq!(earnings[29].date, today);
        // 1 December 2024 is a Sunday.
        assert_eq!(earnings[29].value, 280.0);
        assert_eq!(hours[29].value, 0.0);
    }

    #[test]
    fn sample_source_ends_at_current_date() {
        let source = SampleRecords::new("Etc/UTC").unwrap();

        let earnings = source.records(SeriesKind::Earnings).unwrap();

        assert_eq!(earnings.len(), 30);
        assert_eq!(
            earnings.last().map(|record| record.date),
            Some(OffsetDateTime::now_utc().date())
        );
    }

    #[test]
    fn sample_source_rejects_unknown_timezone() {
        assert_eq!(
            SampleRecords::new("Mars/Olympus_Mons").map(|_| ()),
            Err(Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()))
        );
    }
}
