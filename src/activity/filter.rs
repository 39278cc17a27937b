//! Multi-criteria filtering and progressive disclosure over a transaction list.
//!
//! These are pure functions: they borrow the transaction list, never modify
//! it and return results in the input order.

use time::Date;

use crate::transaction::{PassengerType, Transaction};

/// The number of transactions shown before the operator asks to see more.
pub const DEFAULT_DISCLOSURE_CAP: usize = 3;

/// The constraints selected on the activity screen.
///
/// Fields that are `None` impose no constraint. Set fields are combined with
/// logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Only keep transactions on this date.
    pub date: Option<Date>,
    /// Only keep transactions for this fare category.
    pub passenger_type: Option<PassengerType>,
    /// Only keep transactions that started at this stop.
    pub origin: Option<String>,
    /// Only keep transactions that ended at this stop.
    pub destination: Option<String>,
    /// Free text matched case-insensitively against the passenger type,
    /// origin, destination and transaction ID.
    pub search: Option<String>,
}

impl FilterCriteria {
    /// Whether any field other than the search text is set.
    pub fn has_field_filters(&self) -> bool {
        self.date.is_some()
            || self.passenger_type.is_some()
            || self.origin.is_some()
            || self.destination.is_some()
    }

    /// Whether the criteria impose no constraint at all.
    pub fn is_empty(&self) -> bool {
        !self.has_field_filters() && self.search_text().is_none()
    }

    /// The trimmed, lowercase search text, or `None` if the search is blank.
    fn search_text(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
            .map(str::to_lowercase)
    }
}

/// Get the transactions that match every set field of `criteria`, in input order.
///
/// With empty criteria every transaction is returned.
pub fn apply<'a>(transactions: &'a [Transaction], criteria: &FilterCriteria) -> Vec<&'a Transaction> {
    let search = criteria.search_text();

    transactions
        .iter()
        .filter(|transaction| {
            criteria.date.is_none_or(|date| transaction.date == date)
                && criteria
                    .passenger_type
                    .is_none_or(|passenger_type| transaction.passenger_type == passenger_type)
                && criteria
                    .origin
                    .as_deref()
                    .is_none_or(|origin| transaction.origin == origin)
                && criteria
                    .destination
                    .as_deref()
                    .is_none_or(|destination| transaction.destination == destination)
                && search
                    .as_deref()
                    .is_none_or(|search| matches_search(transaction, search))
        })
        .collect()
}

/// `search` must already be trimmed and lowercase.
fn matches_search(transaction: &Transaction, search: &str) -> bool {
    [
        transaction.passenger_type.as_str(),
        transaction.origin.as_str(),
        transaction.destination.as_str(),
        transaction.transaction_id.as_str(),
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(search))
}

/// Get the part of `filtered` that should be shown.
///
/// When `expanded` is false only the first `cap` items are returned,
/// otherwise everything is. The collapsed slice is always a prefix of the
/// expanded one.
pub fn visible_slice<T>(filtered: &[T], expanded: bool, cap: usize) -> &[T] {
    if expanded {
        filtered
    } else {
        &filtered[..filtered.len().min(cap)]
    }
}

/// Whether some of `filtered` is hidden by [visible_slice] and a
/// "See more" control should be offered.
pub fn has_more<T>(filtered: &[T], expanded: bool, cap: usize) -> bool {
    !expanded && filtered.len() > cap
}

/// Transactions that share a date, in list order.
#[derive(Debug, PartialEq)]
pub struct DayGroup<'a> {
    /// The date shared by the transactions.
    pub date: Date,
    /// The transactions on `date`.
    pub transactions: Vec<&'a Transaction>,
}

/// Group consecutive transactions with the same date under one heading.
///
/// The list is not re-sorted, so a date that appears in two separate runs
/// produces two groups.
pub fn group_by_day<'a>(transactions: &[&'a Transaction]) -> Vec<DayGroup<'a>> {
    let mut days: Vec<DayGroup<'a>> = Vec::new();

    for &transaction in transactions {
        match days.last_mut() {
            Some(current) if current.date == transaction.date => {
                current.transactions.push(transaction)
            }
            _ => days.push(DayGroup {
                date: transaction.date,
                transactions: vec![transaction],
            }),
        }
    }

    days
}
