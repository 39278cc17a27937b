//! The JSON endpoint that serves analytics series to external chart widgets.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use time::Date;

use crate::{AppState, Error, timezone::get_local_date};

use super::{
    aggregation::{AnalyticsSeries, aggregate},
    record::{RecordSource, SeriesKind},
    timeframe::{Timeframe, TimeframeQuery},
};

/// The state needed for the analytics API.
#[derive(Debug, Clone)]
pub struct AnalyticsState {
    /// Where earnings and hours records are read from.
    pub record_source: Arc<dyn RecordSource>,
    /// The local timezone as a canonical timezone name, e.g. "America/Lower_Princes".
    pub local_timezone: String,
}

impl FromRef<AppState> for AnalyticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            record_source: state.record_source.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Get the series named in the path for the timeframe in the query string as JSON.
///
/// Unknown series respond with 404 and unknown timeframes with 400, both
/// with a JSON body of the form `{"error": "..."}`.
pub async fn get_analytics_series(
    State(state): State<AnalyticsState>,
    Path(series_name): Path<String>,
    Query(query): Query<TimeframeQuery>,
) -> Response {
    analytics_series(&state, &series_name, &query)
        .map(|series| Json(series).into_response())
        .unwrap_or_else(Error::into_json_response)
}

fn analytics_series(
    state: &AnalyticsState,
    series_name: &str,
    query: &TimeframeQuery,
) -> Result<AnalyticsSeries, Error> {
    let kind: SeriesKind = series_name.parse()?;
    let timeframe = query.timeframe()?;
    let today = get_local_date(&state.local_timezone)?;

    load_series(state.record_source.as_ref(), kind, timeframe, today)
}

/// Read the records for `kind` and aggregate them for `timeframe`.
pub(crate) fn load_series(
    record_source: &dyn RecordSource,
    kind: SeriesKind,
    timeframe: Timeframe,
    today: Date,
) -> Result<AnalyticsSeries, Error> {
    let records = record_source
        .records(kind)
        .inspect_err(|error| tracing::error!("could not get {} records: {error}", kind.as_str()))?;

    aggregate(&records, timeframe, today, kind.bucketing())
        .inspect_err(|error| tracing::error!("could not aggregate {} records: {error}", kind.as_str()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use serde_json::Value;
    use time::{Date, Duration, OffsetDateTime};

    use crate::{
        analytics::{AnalyticsRecord, InMemoryRecords, sample_records},
        endpoints::{self, format_endpoint},
    };

    use super::{AnalyticsState, get_analytics_series};

    fn today_utc() -> Date {
        OffsetDateTime::now_utc().date()
    }

    fn get_test_server(records: InMemoryRecords) -> TestServer {
        let state = AnalyticsState {
            record_source: Arc::new(records),
            local_timezone: "Etc/UTC".to_owned(),
        };
        let app = Router::new()
            .route(endpoints::ANALYTICS_API, get(get_analytics_series))
            .with_state(state);

        TestServer::new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn returns_series_as_json() {
        let server = get_test_server(sample_records(today_utc()));

        let response = server
            .get(&format_endpoint(endpoints::ANALYTICS_API, "earnings"))
            .add_query_param("timeframe", "7days")
            .await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["timeframe"], "7days");
        assert_eq!(json["points"].as_array().map(Vec::len), Some(7));
        let total: f64 = json["points"]
            .as_array()
            .unwrap()
            .iter()
            .map(|point| point["value"].as_f64().unwrap())
            .sum();
        assert_eq!(json["total"].as_f64(), Some(total));
    }

    #[tokio::test]
    async fn hours_are_bucketed_by_week() {
        let server = get_test_server(sample_records(today_utc()));

        let response = server
            .get(&format_endpoint(endpoints::ANALYTICS_API, "hours"))
            .add_query_param("timeframe", "30days")
            .await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["points"][0]["label"], "Week 1");
        assert_eq!(json["points"].as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn unknown_timeframe_is_a_bad_request() {
        let server = get_test_server(sample_records(today_utc()));

        let response = server
            .get(&format_endpoint(endpoints::ANALYTICS_API, "earnings"))
            .add_query_param("timeframe", "90days")
            .await;

        response.assert_status_bad_request();
        let json: Value = response.json();
        assert!(json["error"].as_str().unwrap().contains("90days"));
    }

    #[tokio::test]
    async fn unknown_series_is_not_found() {
        let server = get_test_server(sample_records(today_utc()));

        let response = server
            .get(&format_endpoint(endpoints::ANALYTICS_API, "tips"))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn negative_record_is_a_server_error() {
        let today = today_utc();
        let records = InMemoryRecords::new(
            vec![AnalyticsRecord {
                date: today - Duration::days(1),
                value: -5.0,
            }],
            Vec::new(),
        );
        let server = get_test_server(records);

        let response = server
            .get(&format_endpoint(endpoints::ANALYTICS_API, "earnings"))
            .add_query_param("timeframe", "7days")
            .await;

        response.assert_status_internal_server_error();
    }
}
