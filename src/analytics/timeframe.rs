//! The trailing windows that analytics can be viewed over.

use std::{fmt::Display, ops::RangeInclusive, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::Error;

/// A trailing window of days ending today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// Only today.
    #[default]
    #[serde(rename = "today")]
    Today,
    /// Today and the six days before it.
    #[serde(rename = "7days")]
    SevenDays,
    /// Today and the 29 days before it.
    #[serde(rename = "30days")]
    ThirtyDays,
}

impl Timeframe {
    /// Every timeframe, in the order they are offered on the home screen.
    pub const ALL: [Timeframe; 3] = [Self::Today, Self::SevenDays, Self::ThirtyDays];

    /// The identifier used in query strings and JSON, e.g. "7days".
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::SevenDays => "7days",
            Self::ThirtyDays => "30days",
        }
    }

    /// The label shown on the timeframe selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::SevenDays => "Last 7 Days",
            Self::ThirtyDays => "Last 30 Days",
        }
    }

    /// The number of days in the window.
    pub fn days(self) -> i64 {
        match self {
            Self::Today => 1,
            Self::SevenDays => 7,
            Self::ThirtyDays => 30,
        }
    }

    /// The inclusive range of dates in the window ending at `today`.
    pub fn window(self, today: Date) -> RangeInclusive<Date> {
        let start = today
            .checked_sub(Duration::days(self.days() - 1))
            .unwrap_or(Date::MIN);

        start..=today
    }
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query_value())
    }
}

impl FromStr for Timeframe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|timeframe| timeframe.as_query_value() == s)
            .ok_or_else(|| Error::UnknownTimeframe(s.to_owned()))
    }
}

/// The query string that selects a timeframe, e.g. `?timeframe=7days`.
///
/// The value is kept as a string so that an unknown identifier is reported
/// as [Error::UnknownTimeframe] instead of a generic query rejection.
#[derive(Debug, Default, Deserialize)]
pub struct TimeframeQuery {
    /// The timeframe identifier, if given.
    pub timeframe: Option<String>,
}

impl TimeframeQuery {
    /// The selected timeframe, or [Timeframe::Today] if none was given.
    ///
    /// # Errors
    /// Returns [Error::UnknownTimeframe] if the identifier is not recognised.
    pub fn timeframe(&self) -> Result<Timeframe, Error> {
        self.timeframe
            .as_deref()
            .map_or(Ok(Timeframe::default()), Timeframe::from_str)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use time::macros::date;

    use crate::Error;

    use super::{Timeframe, TimeframeQuery};

    #[test]
    fn windows_end_today() {
        let today = date!(2024 - 12 - 01);

        assert_eq!(Timeframe::Today.window(today), today..=today);
        assert_eq!(
            Timeframe::SevenDays.window(today),
            date!(2024 - 11 - 25)..=today
        );
        assert_eq!(
            Timeframe::ThirtyDays.window(today),
            date!(2024 - 11 - 02)..=today
        );
    }

    #[test]
    fn parses_query_values() {
        for timeframe in Timeframe::ALL {
            assert_eq!(Timeframe::from_str(timeframe.as_query_value()), Ok(timeframe));
        }
    }

    #[test]
    fn rejects_unknown_timeframe() {
        assert_eq!(
            Timeframe::from_str("90days"),
            Err(Error::UnknownTimeframe("90days".to_owned()))
        );
        assert_eq!(
            Timeframe::from_str("7 days"),
            Err(Error::UnknownTimeframe("7 days".to_owned()))
        );
    }

    #[test]
    fn serializes_as_query_value() {
        let json = serde_json::to_string(&Timeframe::SevenDays).unwrap();

        assert_eq!(json, "\"7days\"");
    }

    #[test]
    fn missing_query_defaults_to_today() {
        let query: TimeframeQuery = serde_html_form::from_str("").unwrap();

        assert_eq!(query.timeframe(), Ok(Timeframe::Today));
    }

    #[test]
    fn query_value_is_not_defaulted_when_unknown() {
        let query: TimeframeQuery = serde_html_form::from_str("timeframe=year").unwrap();

        assert_eq!(
            query.timeframe(),
            Err(Error::UnknownTimeframe("year".to_owned()))
        );
    }
}
