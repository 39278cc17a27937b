//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use crate::{
    Error,
    analytics::RecordSource,
    config::ConsoleConfig,
    home::DutyStatus,
    registry::StopRegistry,
    timezone::get_local_offset,
    transaction::TransactionSource,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "America/Lower_Princes".
    pub local_timezone: String,

    /// The config that controls what the pages show.
    pub config: ConsoleConfig,

    /// The stops served by the route.
    pub stop_registry: Arc<StopRegistry>,

    /// Where fare transactions are read from.
    pub transaction_source: Arc<dyn TransactionSource>,

    /// Where earnings and hours records are read from.
    pub record_source: Arc<dyn RecordSource>,

    /// Whether the operator is currently on duty.
    pub duty_status: Arc<Mutex<DutyStatus>>,
}

impl AppState {
    /// Create a new [AppState] from the console's data sources.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "America/Lower_Princes".
    /// The operator starts on duty.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone,
    /// - any of the errors from [ConsoleConfig::validate].
    pub fn new(
        local_timezone: &str,
        config: ConsoleConfig,
        stop_registry: StopRegistry,
        transaction_source: Arc<dyn TransactionSource>,
        record_source: Arc<dyn RecordSource>,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            tracing::error!("Invalid timezone {local_timezone}");
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        config
            .validate(&stop_registry)
            .inspect_err(|error| tracing::error!("invalid console config: {error}"))?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            config,
            stop_registry: Arc::new(stop_registry),
            transaction_source,
            record_source,
            duty_status: Arc::new(Mutex::new(DutyStatus::OnDuty)),
        })
    }
}
