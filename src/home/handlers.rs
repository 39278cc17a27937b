//! Route handlers for the home page and the duty status toggle.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRequest;
use serde::Deserialize;

use crate::{
    AppState, Error,
    analytics::{
        AnalyticsChart, RecordSource, SeriesKind, TimeframeQuery, earnings_chart, hours_chart,
        load_series,
    },
    config::OperatorProfile,
    timezone::get_local_date,
};

use super::{
    duty::DutyStatus,
    view::{
        AnalyticsCards, EARNINGS_CHART_ID, HOURS_CHART_ID, analytics_section, home_view,
        route_panel,
    },
};

/// The state needed for the home page.
#[derive(Debug, Clone)]
pub struct HomeState {
    /// Where earnings and hours records are read from.
    pub record_source: Arc<dyn RecordSource>,
    /// The local timezone as a canonical timezone name, e.g. "America/Lower_Princes".
    pub local_timezone: String,
    /// The operator shown in the header and route panel.
    pub operator: OperatorProfile,
    /// Whether the operator is on duty.
    pub duty_status: Arc<Mutex<DutyStatus>>,
}

impl FromRef<AppState> for HomeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            record_source: state.record_source.clone(),
            local_timezone: state.local_timezone.clone(),
            operator: state.config.operator.clone(),
            duty_status: state.duty_status.clone(),
        }
    }
}

/// The state needed for changing the duty status.
#[derive(Debug, Clone)]
pub struct DutyState {
    /// The operator shown in the route panel.
    pub operator: OperatorProfile,
    /// Whether the operator is on duty.
    pub duty_status: Arc<Mutex<DutyStatus>>,
}

impl FromRef<AppState> for DutyState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            operator: state.config.operator.clone(),
            duty_status: state.duty_status.clone(),
        }
    }
}

/// Form data for setting the duty status.
#[derive(Debug, Deserialize)]
pub struct DutyForm {
    /// The requested status, `true` for on duty.
    pub on_duty: bool,
}

/// Render the home page for the timeframe in the query string.
///
/// HTMX requests get just the analytics section so the timeframe selector
/// can swap it in place.
pub async fn get_home_page(
    State(state): State<HomeState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<TimeframeQuery>,
) -> Result<Response, Error> {
    let timeframe = query
        .timeframe()
        .inspect_err(|error| tracing::error!("could not parse timeframe: {error}"))?;
    let today = get_local_date(&state.local_timezone)?;

    let earnings = load_series(
        state.record_source.as_ref(),
        SeriesKind::Earnings,
        timeframe,
        today,
    )?;
    let hours = load_series(
        state.record_source.as_ref(),
        SeriesKind::Hours,
        timeframe,
        today,
    )?;

    let charts = [
        AnalyticsChart {
            id: EARNINGS_CHART_ID,
            options: earnings_chart(&earnings).to_string(),
        },
        AnalyticsChart {
            id: HOURS_CHART_ID,
            options: hours_chart(&hours).to_string(),
        },
    ];
    let cards = AnalyticsCards {
        timeframe,
        earnings: &earnings,
        hours: &hours,
        charts: &charts,
    };

    if is_htmx_request {
        return Ok(analytics_section(&cards, true).into_response());
    }

    let duty_status = *state
        .duty_status
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire duty status lock: {error}"))
        .map_err(|_| Error::StateLockError)?;

    Ok(home_view(&state.operator, duty_status, cards).into_response())
}

/// Set the operator's duty status and return the updated route panel.
pub async fn set_duty_status(
    State(state): State<DutyState>,
    Form(form): Form<DutyForm>,
) -> Response {
    let mut duty_status = match state.duty_status.lock() {
        Ok(duty_status) => duty_status,
        Err(error) => {
            tracing::error!("could not acquire duty status lock: {error}");
            return Error::StateLockError.into_alert_response();
        }
    };

    *duty_status = DutyStatus::from_on_duty(form.on_duty);
    tracing::info!("Duty status set to {}", duty_status.label());

    route_panel(&state.operator, *duty_status).into_response()
}
