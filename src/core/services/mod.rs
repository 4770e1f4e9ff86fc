pub mod export_service;
pub mod query_service;
pub mod series_service;

pub use export_service::{ExportService, CSV_HEADER};
pub use query_service::{LedgerView, QueryService, ViewFilter};
pub use series_service::{MonthlySeries, SeriesService, DEFAULT_MONTHS_BACK, MAX_MONTHS_BACK};
