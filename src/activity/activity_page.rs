//! Defines the route handler for the activity page that lists fare transactions.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use axum_htmx::HxRequest;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, endpoints,
    registry::StopRegistry,
    transaction::{TransactionSource, parse_date},
};

use super::{
    filter::{FilterCriteria, apply, group_by_day, has_more, visible_slice},
    view::{ActivityResults, activity_results_view, activity_view},
};

/// The state needed for the activity page.
#[derive(Debug, Clone)]
pub struct ActivityState {
    /// Where fare transactions are read from.
    pub transaction_source: Arc<dyn TransactionSource>,
    /// The stops offered in the origin and destination filters.
    pub stop_registry: Arc<StopRegistry>,
    /// The number of transactions shown before "See more".
    pub disclosure_cap: usize,
}

impl FromRef<AppState> for ActivityState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_source: state.transaction_source.clone(),
            stop_registry: state.stop_registry.clone(),
            disclosure_cap: state.config.disclosure_cap,
        }
    }
}

/// The filter form and "See more" state carried in the query string.
///
/// Empty values, as sent by the "Any" options of the filter form, impose no
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityQuery {
    /// Only show transactions on this date, formatted as `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Only show transactions for this passenger type, e.g. "Adult".
    pub passenger_type: Option<String>,
    /// Only show transactions that started at this stop.
    pub origin: Option<String>,
    /// Only show transactions that ended at this stop.
    pub destination: Option<String>,
    /// Free text search.
    pub search: Option<String>,
    /// Whether every matching transaction should be shown.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub expanded: bool,
}

impl ActivityQuery {
    /// Convert the query into filter criteria.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::InvalidDate] if the date is not formatted as `YYYY-MM-DD`,
    /// - [Error::UnknownPassengerType] if the passenger type is not registered,
    /// - [Error::UnknownStop] if the origin or destination is not a registered stop.
    pub fn to_criteria(&self, stops: &StopRegistry) -> Result<FilterCriteria, Error> {
        let date = non_empty(&self.date).map(parse_date).transpose()?;
        let passenger_type = non_empty(&self.passenger_type)
            .map(str::parse)
            .transpose()?;
        let origin = non_empty(&self.origin)
            .map(|origin| stops.validate(origin).map(|_| origin.to_owned()))
            .transpose()?;
        let destination = non_empty(&self.destination)
            .map(|destination| stops.validate(destination).map(|_| destination.to_owned()))
            .transpose()?;

        Ok(FilterCriteria {
            date,
            passenger_type,
            origin,
            destination,
            search: non_empty(&self.search).map(str::to_owned),
        })
    }

    /// The query with empty values removed, for building links.
    fn normalized(&self) -> Self {
        let normalize = |value: &Option<String>| non_empty(value).map(str::to_owned);

        Self {
            date: normalize(&self.date),
            passenger_type: normalize(&self.passenger_type),
            origin: normalize(&self.origin),
            destination: normalize(&self.destination),
            search: normalize(&self.search),
            expanded: self.expanded,
        }
    }

    /// The URL for this query on the activity page.
    pub(super) fn to_url(&self) -> Option<String> {
        serde_urlencoded::to_string(self.normalized())
            .inspect_err(|error| {
                tracing::error!("Could not encode activity query {self:?}: {error}");
            })
            .ok()
            .map(|query_string| {
                if query_string.is_empty() {
                    endpoints::ACTIVITY_VIEW.to_owned()
                } else {
                    format!("{}?{query_string}", endpoints::ACTIVITY_VIEW)
                }
            })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Render the transactions that match the filters in the query string.
///
/// HTMX requests get just the results list so the filter form can swap it in place.
pub async fn get_activity_page(
    State(state): State<ActivityState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<ActivityQuery>,
) -> Result<Response, Error> {
    let criteria = query
        .to_criteria(&state.stop_registry)
        .inspect_err(|error| tracing::error!("could not parse activity filters: {error}"))?;
    let transactions = state
        .transaction_source
        .transactions()
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    let filtered = apply(&transactions, &criteria);
    let visible = visible_slice(&filtered, query.expanded, state.disclosure_cap);
    let see_more_url = if has_more(&filtered, query.expanded, state.disclosure_cap) {
        ActivityQuery {
            expanded: true,
            ..query.clone()
        }
        .to_url()
    } else {
        None
    };

    let results = ActivityResults {
        days: group_by_day(visible),
        match_count: filtered.len(),
        hidden_count: filtered.len() - visible.len(),
        see_more_url,
        is_filtered: !criteria.is_empty(),
    };

    if is_htmx_request {
        return Ok(activity_results_view(&results).into_response());
    }

    Ok(activity_view(&query, &criteria, &state.stop_registry, &results).into_response())
}
