//! Defines the core data model for fare transactions.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, Time, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The format used for dates in data files and query strings, e.g. "2024-12-01".
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The format used for the time of day, e.g. "09:30 AM".
pub const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute] [period case:upper]");

/// Alias for the integer type used as the data source's row key.
pub type TransactionKey = u32;

// ============================================================================
// ENUMS
// ============================================================================

/// The fare category a passenger travelled under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassengerType {
    /// Standard fare.
    Adult,
    /// Reduced fare for children.
    Child,
    /// Reduced fare for students with a student card.
    Student,
    /// Reduced fare for seniors.
    Senior,
}

impl PassengerType {
    /// Every passenger type, in registry order.
    pub const ALL: [PassengerType; 4] = [
        PassengerType::Adult,
        PassengerType::Child,
        PassengerType::Student,
        PassengerType::Senior,
    ];

    /// The display name, e.g. "Adult".
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Adult => "Adult",
            Self::Child => "Child",
            Self::Student => "Student",
            Self::Senior => "Senior",
        }
    }
}

impl Display for PassengerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PassengerType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        PassengerType::ALL
            .into_iter()
            .find(|passenger_type| passenger_type.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownPassengerType(s.to_owned()))
    }
}

/// How the fare was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Paid in cash at the fare box.
    Cash,
    /// Paid by tapping a card.
    Card,
}

impl PaymentMethod {
    /// The display name, e.g. "Cash".
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            _ => Err(Error::UnknownPaymentMethod(s.to_owned())),
        }
    }
}

/// The processing state of a transaction.
///
/// Only completed transactions are reported by the fare box at the moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// The fare was collected.
    #[default]
    Completed,
}

impl TransactionStatus {
    /// The display name, e.g. "Completed".
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
        }
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("completed") {
            Ok(Self::Completed)
        } else {
            Err(Error::UnknownStatus(s.to_owned()))
        }
    }
}

// ============================================================================
// MODELS
// ============================================================================

/// A single fare paid by a passenger.
///
/// Transactions are read-only: they are supplied by a
/// [TransactionSource](super::TransactionSource) and never modified by the console.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The data source's key for the transaction.
    pub id: TransactionKey,
    /// The day the fare was paid.
    pub date: Date,
    /// The fare category the passenger travelled under.
    pub passenger_type: PassengerType,
    /// The stop the passenger boarded at.
    pub origin: String,
    /// The stop the passenger travelled to.
    pub destination: String,
    /// The fare in dollars, rounded to cents.
    pub fare: f64,
    /// The time of day the fare was paid.
    pub time: Time,
    /// How the fare was paid.
    pub payment_method: PaymentMethod,
    /// The fare box's receipt number, e.g. "#TXN001".
    pub transaction_id: String,
    /// The processing state of the transaction.
    pub status: TransactionStatus,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(id: TransactionKey, transaction_id: &str, date: Date) -> TransactionBuilder {
        TransactionBuilder {
            id,
            date,
            passenger_type: PassengerType::Adult,
            origin: String::new(),
            destination: String::new(),
            fare: 0.0,
            time: Time::MIDNIGHT,
            payment_method: PaymentMethod::Cash,
            transaction_id: transaction_id.to_owned(),
            status: TransactionStatus::Completed,
        }
    }

    /// The time of day formatted for display, e.g. "09:30 AM".
    pub fn formatted_time(&self) -> String {
        format_time(self.time)
    }
}

/// A builder for creating [Transaction] instances.
///
/// Fields that are not set default to an adult cash fare of $0.00 paid at
/// midnight. Call [TransactionBuilder::finalize] to validate the fare and
/// create the [Transaction].
///
/// # Examples
///
/// ```
/// use time::macros::{date, time};
///
/// use transit_console::transaction::{PassengerType, PaymentMethod, Transaction};
///
/// let transaction = Transaction::build(2, "#TXN002", date!(2024 - 12 - 01))
///     .passenger_type(PassengerType::Student)
///     .route("Maho", "French Quarter")
///     .fare(2.0)
///     .time(time!(10:15))
///     .payment_method(PaymentMethod::Card)
///     .finalize()
///     .unwrap();
///
/// assert_eq!(transaction.formatted_time(), "10:15 AM");
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    id: TransactionKey,
    date: Date,
    passenger_type: PassengerType,
    origin: String,
    destination: String,
    fare: f64,
    time: Time,
    payment_method: PaymentMethod,
    transaction_id: String,
    status: TransactionStatus,
}

impl TransactionBuilder {
    /// Set the passenger's fare category.
    pub fn passenger_type(mut self, passenger_type: PassengerType) -> Self {
        self.passenger_type = passenger_type;
        self
    }

    /// Set the stops the passenger travelled between.
    pub fn route(mut self, origin: &str, destination: &str) -> Self {
        self.origin = origin.to_owned();
        self.destination = destination.to_owned();
        self
    }

    /// Set the fare in dollars.
    pub fn fare(mut self, fare: f64) -> Self {
        self.fare = fare;
        self
    }

    /// Set the time of day the fare was paid.
    pub fn time(mut self, time: Time) -> Self {
        self.time = time;
        self
    }

    /// Set how the fare was paid.
    pub fn payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.payment_method = payment_method;
        self
    }

    /// Set the processing state of the transaction.
    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    /// Validate the fare and create the transaction.
    ///
    /// The fare is rounded to the nearest cent.
    ///
    /// # Errors
    /// Returns [Error::InvalidFare] if the fare is negative, NaN or infinite.
    pub fn finalize(self) -> Result<Transaction, Error> {
        if !self.fare.is_finite() || self.fare < 0.0 {
            return Err(Error::InvalidFare(self.fare));
        }

        Ok(Transaction {
            id: self.id,
            date: self.date,
            passenger_type: self.passenger_type,
            origin: self.origin,
            destination: self.destination,
            fare: (self.fare * 100.0).round() / 100.0,
            time: self.time,
            payment_method: self.payment_method,
            transaction_id: self.transaction_id,
            status: self.status,
        })
    }
}

// ============================================================================
// PARSING AND FORMATTING
// ============================================================================

/// Parse a date in the `YYYY-MM-DD` format.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is not a valid date.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// Parse a time of day in the `09:30 AM` format.
///
/// # Errors
/// Returns [Error::InvalidTime] if `text` is not a valid time of day.
pub fn parse_time(text: &str) -> Result<Time, Error> {
    Time::parse(&text.trim().to_ascii_uppercase(), TIME_FORMAT)
        .map_err(|_| Error::InvalidTime(text.to_owned()))
}

/// Format a time of day as e.g. "09:30 AM".
pub fn format_time(time: Time) -> String {
    time.format(TIME_FORMAT)
        .unwrap_or_else(|_| format!("{:02}:{:02}", time.hour(), time.minute()))
}
