//! Earnings and hours analytics for the home screen.
//!
//! This module contains:
//! - Raw records and the `RecordSource` trait that supplies them
//! - The `Timeframe` windows and the `aggregate` function that buckets records
//! - Chart configuration for the home screen cards
//! - The JSON endpoint for external chart widgets

mod aggregation;
mod charts;
mod handlers;
mod record;
mod timeframe;

pub use aggregation::{AnalyticsSeries, Bucketing, SeriesPoint, aggregate};
pub use charts::{earnings_chart, hours_chart};
pub use handlers::{AnalyticsState, get_analytics_series};
pub use record::{
    AnalyticsRecord, InMemoryRecords, RecordSource, SampleRecords, SeriesKind, read_records_csv,
    read_records_csv_path, sample_records,
};
pub use timeframe::{Timeframe, TimeframeQuery};

pub(crate) use charts::{AnalyticsChart, charts_head_script, charts_init_script};
pub(crate) use handlers::load_series;
