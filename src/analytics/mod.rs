mod aggregator;
mod time_range;

pub use aggregator::{TOP_PATHS_LIMIT, TOP_REFERRERS_LIMIT, RawMetrics, assemble_snapshot, compute_snapshot};
pub use time_range::{TimeRange, Window};
