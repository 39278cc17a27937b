//! The activity screen: the filterable list of fare transactions.
//!
//! This module contains:
//! - Pure filtering, progressive disclosure and day grouping over a transaction list
//! - The activity page handler and its query string
//! - HTML rendering for the filter panel and transaction cards

mod activity_page;
mod filter;
mod view;

pub use activity_page::{ActivityQuery, ActivityState, get_activity_page};
pub use filter::{
    DEFAULT_DISCLOSURE_CAP, DayGroup, FilterCriteria, apply, group_by_day, has_more,
    visible_slice,
};
