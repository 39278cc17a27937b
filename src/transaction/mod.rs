//! Fare transactions.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The `TransactionSource` trait and its in-memory/CSV implementation
//! - The built-in sample transactions

mod core;
mod fixtures;
mod source;

pub use core::{
    DATE_FORMAT, PassengerType, PaymentMethod, TIME_FORMAT, Transaction, TransactionBuilder,
    TransactionKey, TransactionStatus, format_time, parse_date, parse_time,
};
pub use fixtures::sample_transactions;
pub use source::{InMemoryTransactions, TransactionSource};
