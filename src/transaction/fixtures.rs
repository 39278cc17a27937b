//! The built-in transaction list used when no CSV file is configured.

use time::{
    Date, Time,
    macros::{date, time},
};

use crate::transaction::{PassengerType, PaymentMethod, Transaction, TransactionKey};

const SAMPLE_DATE: Date = date!(2024 - 12 - 01);

/// The five sample fares taken on 1 December 2024.
pub fn sample_transactions() -> Vec<Transaction> {
    [
        (1, PassengerType::Adult, "St. Peters", "Philipsburg", 2.5, time!(09:30), PaymentMethod::Cash),
        (2, PassengerType::Student, "Maho", "French Quarter", 2.0, time!(10:15), PaymentMethod::Card),
        (3, PassengerType::Senior, "Dutch Quarter", "Cole Bay", 2.0, time!(11:00), PaymentMethod::Cash),
        (4, PassengerType::Child, "Philipsburg", "Maho", 1.0, time!(11:45), PaymentMethod::Cash),
        (5, PassengerType::Adult, "French Quarter", "St. Peters", 2.5, time!(12:30), PaymentMethod::Card),
    ]
    .into_iter()
    .map(sample_transaction)
    .collect()
}

fn sample_transaction(
    (id, passenger_type, origin, destination, fare, time, payment_method): (
        TransactionKey,
        PassengerType,
        &str,
        &str,
        f64,
        Time,
        PaymentMethod,
    ),
) -> Transaction {
    Transaction {
        id,
        date: SAMPLE_DATE,
        passenger_type,
        origin: origin.to_owned(),
        destination: destination.to_owned(),
        fare,
        time,
        payment_method,
        transaction_id: format!("#TXN{id:03}"),
        status: Default::default(),
    }
}
