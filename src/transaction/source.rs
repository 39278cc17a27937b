//! Read-only providers of fare transactions.

use std::{collections::HashSet, fmt::Debug, io::Read, path::Path, sync::Arc};

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use crate::{
    Error,
    registry::StopRegistry,
    transaction::core::{Transaction, TransactionKey, parse_date, parse_time},
};

/// Supplies the transactions shown on the activity screen.
///
/// Implementations must return the same transactions, in the same order, on
/// every call. The console never writes transactions back.
pub trait TransactionSource: Send + Sync + Debug {
    /// Get every transaction, ordered by date and time of day.
    ///
    /// # Errors
    /// Implementations may return an error if the underlying data cannot be read.
    fn transactions(&self) -> Result<Arc<[Transaction]>, Error>;
}

/// A validated, in-memory list of transactions.
#[derive(Debug, Clone)]
pub struct InMemoryTransactions {
    transactions: Arc<[Transaction]>,
}

impl InMemoryTransactions {
    /// Validate `transactions` against `stops` and wrap them in a source.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::UnknownStop] if a transaction starts or ends at a stop that is not in `stops`,
    /// - [Error::DuplicateTransactionId] if two transactions share a transaction ID.
    pub fn new(transactions: Vec<Transaction>, stops: &StopRegistry) -> Result<Self, Error> {
        let mut seen_ids = HashSet::new();

        for transaction in &transactions {
            stops.validate(&transaction.origin)?;
            stops.validate(&transaction.destination)?;

            if !seen_ids.insert(transaction.transaction_id.as_str()) {
                return Err(Error::DuplicateTransactionId(
                    transaction.transaction_id.clone(),
                ));
            }
        }

        Ok(Self {
            transactions: transactions.into(),
        })
    }

    /// Read transactions from CSV data with a header row.
    ///
    /// The columns are `id,date,passenger_type,origin,destination,fare,time,payment_method,transaction_id,status`.
    ///
    /// # Errors
    /// Returns an error if a row cannot be parsed, or any of the errors from
    /// [InMemoryTransactions::new].
    pub fn from_csv_reader<R: Read>(reader: R, stops: &StopRegistry) -> Result<Self, Error> {
        let reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let transactions = reader
            .into_deserialize::<TransactionRow>()
            .map(|row| -> Result<Transaction, Error> { row?.into_transaction() })
            .collect::<Result<Vec<_>, Error>>()?;

        Self::new(transactions, stops)
    }

    /// Read transactions from the CSV file at `path`.
    ///
    /// # Errors
    /// Returns [Error::CsvError] if the file cannot be opened, or any of the
    /// errors from [InMemoryTransactions::from_csv_reader].
    pub fn from_csv_path(path: &Path, stops: &StopRegistry) -> Result<Self, Error> {
        let file = std::fs::File::open(path).map_err(|error| {
            tracing::error!("could not open {}: {error}", path.display());
            Error::CsvError(format!("{}: {error}", path.display()))
        })?;

        Self::from_csv_reader(file, stops)
    }
}

impl TransactionSource for InMemoryTransactions {
    fn transactions(&self) -> Result<Arc<[Transaction]>, Error> {
        Ok(Arc::clone(&self.transactions))
    }
}

#[derive(Debug, Deserialize)]
struct TransactionRow {
    id: TransactionKey,
    date: String,
    passenger_type: String,
    origin: String,
    destination: String,
    fare: f64,
    time: String,
    payment_method: String,
    transaction_id: String,
    status: String,
}

impl TransactionRow {
    fn into_transaction(self) -> Result<Transaction, Error> {
        Transaction::build(self.id, &self.transaction_id, parse_date(&self.date)?)
            .passenger_type(self.passenger_type.parse()?)
            .route(&self.origin, &self.destination)
            .fare(self.fare)
            .time(parse_time(&self.time)?)
            .payment_method(self.payment_method.parse()?)
            .status(self.status.parse()?)
            .finalize()
    }
}
