use std::{fs::OpenOptions, net::SocketAddr, path::PathBuf, process::ExitCode, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use transit_console::{
    AppState, Error, build_router,
    analytics::{InMemoryRecords, RecordSource, SampleRecords, read_records_csv_path},
    config::{ConsoleConfig, OperatorProfile},
    graceful_shutdown, logging_middleware,
    registry::StopRegistry,
    transaction::{InMemoryTransactions, TransactionSource, sample_transactions},
};

/// The web server for the transit operator console.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the console from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The canonical name of the operator's timezone, e.g. "America/Lower_Princes".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// CSV file with the fare transactions. The built-in sample data is used if omitted.
    #[arg(long)]
    transactions_csv: Option<PathBuf>,

    /// CSV file with daily earnings records. Sample records ending today are used if omitted.
    #[arg(long, requires = "hours_csv")]
    earnings_csv: Option<PathBuf>,

    /// CSV file with daily hours worked records.
    #[arg(long, requires = "earnings_csv")]
    hours_csv: Option<PathBuf>,

    /// How many transactions the activity page shows before "See more".
    #[arg(long)]
    disclosure_cap: Option<usize>,

    /// The operator's display name.
    #[arg(long)]
    operator_name: Option<String>,

    /// The label of the operator's vehicle, e.g. "Bus #245".
    #[arg(long)]
    vehicle: Option<String>,

    /// The stop the current route starts at.
    #[arg(long)]
    route_origin: Option<String>,

    /// The stop the current route ends at.
    #[arg(long)]
    route_destination: Option<String>,

    /// Log the head and the start of the body of every request and response.
    #[arg(long)]
    log_bodies: bool,
}

impl Args {
    fn console_config(&self) -> ConsoleConfig {
        let defaults = ConsoleConfig::default();
        let operator = OperatorProfile {
            name: self.operator_name.clone().unwrap_or(defaults.operator.name),
            vehicle: self.vehicle.clone().unwrap_or(defaults.operator.vehicle),
            route_origin: self
                .route_origin
                .clone()
                .unwrap_or(defaults.operator.route_origin),
            route_destination: self
                .route_destination
                .clone()
                .unwrap_or(defaults.operator.route_destination),
        };

        ConsoleConfig {
            disclosure_cap: self.disclosure_cap.unwrap_or(defaults.disclosure_cap),
            operator,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    let app_state = match build_app_state(&args) {
        Ok(app_state) => app_state,
        Err(error) => {
            tracing::error!("Could not start the console: {error}");
            return ExitCode::FAILURE;
        }
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(app_state);

    let router = if args.log_bodies {
        router.layer(middleware::from_fn(logging_middleware))
    } else {
        router
    };

    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn build_app_state(args: &Args) -> Result<AppState, Error> {
    let stops = StopRegistry::default();

    let transactions = match &args.transactions_csv {
        Some(path) => {
            tracing::info!("Loading transactions from {}", path.display());
            InMemoryTransactions::from_csv_path(path, &stops)?
        }
        None => {
            tracing::info!("No transactions CSV given, using the sample transactions");
            InMemoryTransactions::new(sample_transactions(), &stops)?
        }
    };

    let record_source: Arc<dyn RecordSource> = match (&args.earnings_csv, &args.hours_csv) {
        (Some(earnings_path), Some(hours_path)) => {
            tracing::info!(
                "Loading records from {} and {}",
                earnings_path.display(),
                hours_path.display()
            );
            Arc::new(InMemoryRecords::new(
                read_records_csv_path(earnings_path)?,
                read_records_csv_path(hours_path)?,
            ))
        }
        _ => {
            tracing::info!("No records CSV given, using the sample records");
            Arc::new(SampleRecords::new(&args.timezone)?)
        }
    };

    let transaction_source: Arc<dyn TransactionSource> = Arc::new(transactions);

    AppState::new(
        &args.timezone,
        args.console_config(),
        stops,
        transaction_source,
        record_source,
    )
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are handled, so skip the default 5xx logging.
        .on_failure(());

    router.layer(tracing_layer)
}
