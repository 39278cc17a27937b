//! Transit Console is a web app for bus operators.
//!
//! It serves two screens as HTML pages:
//! - a home dashboard with the operator's duty status, current route and
//!   earnings/hours analytics for a selectable timeframe, and
//! - an activity screen listing fare transactions with search, filters and a
//!   "See more" control.
//!
//! The interesting logic lives in two pure transforms:
//! [activity::apply] / [activity::visible_slice] for the transaction list and
//! [analytics::aggregate] for the chart series. Everything else renders their
//! output.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use time::Date;
use tokio::signal;

pub mod activity;
mod alert;
pub mod analytics;
mod app_state;
pub mod config;
mod endpoints;
mod home;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
pub mod registry;
mod routing;
mod timezone;
pub mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use home::DutyStatus;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use timezone::get_local_date;

use crate::{
    html::error_view, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A timeframe identifier outside of `today`, `7days` and `30days`.
    ///
    /// The set of timeframes is closed, so this is a programming or
    /// configuration error and is never replaced with a default.
    #[error("unknown timeframe \"{0}\", expected one of: today, 7days, 30days")]
    UnknownTimeframe(String),

    /// An analytics series name other than `earnings` or `hours`.
    #[error("unknown analytics series \"{0}\", expected one of: earnings, hours")]
    UnknownSeries(String),

    /// A passenger type that is not in the passenger type registry.
    #[error("unknown passenger type \"{0}\"")]
    UnknownPassengerType(String),

    /// A payment method other than cash or card.
    #[error("unknown payment method \"{0}\"")]
    UnknownPaymentMethod(String),

    /// A transaction status that the console does not know about.
    #[error("unknown transaction status \"{0}\"")]
    UnknownStatus(String),

    /// A stop name that is not in the stop registry.
    #[error("\"{0}\" is not a registered stop")]
    UnknownStop(String),

    /// A fare that is negative or not a finite number.
    ///
    /// Fares come from an external data source, so this indicates that the
    /// upstream data is corrupt.
    #[error("invalid fare {0}, fares must be finite and non-negative")]
    InvalidFare(f64),

    /// An earnings or hours record with a negative or non-finite value.
    ///
    /// These records are never aggregated, since the resulting totals would
    /// be meaningless.
    #[error("corrupt analytics record on {date}: {value} is not a finite, non-negative value")]
    CorruptRecord {
        /// The date of the offending record.
        date: Date,
        /// The offending value.
        value: f64,
    },

    /// Two transactions in the same data set share a transaction ID.
    #[error("the transaction ID \"{0}\" appears more than once")]
    DuplicateTransactionId(String),

    /// A date string that could not be parsed as `YYYY-MM-DD`.
    #[error("could not parse \"{0}\" as a date, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A time of day that could not be parsed as `HH:MM AM`.
    #[error("could not parse \"{0}\" as a time of day, expected e.g. 09:30 AM")]
    InvalidTime(String),

    /// A CSV data file could not be read or parsed.
    #[error("could not read CSV data: {0}")]
    CsvError(String),

    /// A disclosure cap that would hide every transaction behind "See more".
    #[error("invalid disclosure cap {0}, at least one transaction must be shown")]
    InvalidDisclosureCap(usize),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the lock on the shared console state.
    #[error("could not acquire the console state lock")]
    StateLockError,
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        tracing::error!("could not read CSV data: {value}");
        Error::CsvError(value.to_string())
    }
}

impl Error {
    /// The HTTP status code used when this error is returned to a client.
    fn status_code(&self) -> StatusCode {
        match self {
            Error::UnknownTimeframe(_)
            | Error::UnknownSeries(_)
            | Error::UnknownPassengerType(_)
            | Error::UnknownPaymentMethod(_)
            | Error::UnknownStatus(_)
            | Error::UnknownStop(_)
            | Error::InvalidDate(_)
            | Error::InvalidTime(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::UnknownSeries(_) => get_404_not_found_response(),
            Error::UnknownTimeframe(ref timeframe) => {
                tracing::error!("Rejected unknown timeframe {timeframe:?}");
                let description = format!("\"{timeframe}\" is not a valid timeframe");
                (
                    self.status_code(),
                    error_view(
                        "Bad Request",
                        "400",
                        &description,
                        "Choose one of Today, Last 7 Days or Last 30 Days.",
                    ),
                )
                    .into_response()
            }
            error @ (Error::UnknownPassengerType(_)
            | Error::UnknownStop(_)
            | Error::InvalidDate(_)) => {
                tracing::error!("Rejected invalid filter: {error}");
                (
                    error.status_code(),
                    error_view(
                        "Bad Request",
                        "400",
                        &error.to_string(),
                        "Clear the filters and try again.",
                    ),
                )
                    .into_response()
            }
            error @ (Error::CorruptRecord { .. }
            | Error::InvalidFare(_)
            | Error::DuplicateTransactionId(_)) => {
                tracing::error!("Data integrity error: {error}");
                InternalServerError {
                    description: "Data Integrity Error",
                    fix: &format!(
                        "{error}. The upstream data source needs to be corrected before \
                        these figures can be shown."
                    ),
                }
                .into_response()
            }
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as a JSON body for the analytics API.
    fn into_json_response(self) -> Response {
        let status_code = match self {
            Error::UnknownSeries(_) => StatusCode::NOT_FOUND,
            _ => self.status_code(),
        };

        if status_code.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (
            status_code,
            axum::Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }

    /// Render the error as an alert fragment for HTMX requests.
    fn into_alert_response(self) -> Response {
        let status_code = self.status_code();

        match self {
            Error::StateLockError => (
                status_code,
                alert::Alert::error(
                    "Could not update duty status",
                    "Try refreshing the page, then toggle your duty status again.",
                ),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    status_code,
                    alert::Alert::error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    ),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use time::macros::date;

    use crate::Error;

    #[test]
    fn unknown_timeframe_is_a_bad_request() {
        let response = Error::UnknownTimeframe("90days".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn corrupt_record_is_an_internal_error() {
        let response = Error::CorruptRecord {
            date: date!(2024 - 12 - 01),
            value: -5.0,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn json_errors_keep_status_codes() {
        assert_eq!(
            Error::UnknownTimeframe("90days".to_owned())
                .into_json_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::UnknownSeries("tips".to_owned())
                .into_json_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::StateLockError.into_json_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unknown_series_is_not_found() {
        let response = Error::UnknownSeries("tips".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
