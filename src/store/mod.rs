// everything that touches the database lives under here
// the analytics queries sit behind `EventStore` so the aggregator can be
// exercised without a live postgres instance
mod events;
mod postgres;
mod shops;
mod themes;

pub use events::{count_errors, list_errors};
pub use shops::get_shop_access_token;
pub use themes::{get_theme_statuses, upsert_theme_status};

use std::future::Future;

use crate::analytics::Window;
use crate::models::analytics::{PathCount, ReferrerCount, SeriesPoint};

/// Read-only query contract the metrics aggregator is built on.
///
/// Every call is scoped to one shop and one window; implementations must not
/// mix rows from other shops or from outside `[window.start, window.end]`.
pub trait EventStore {
    /// 404 counts grouped by `date_trunc(bucket, created_at)`, ascending.
    fn error_series(
        &self,
        shop_domain: &str,
        window: &Window,
        bucket: &'static str,
    ) -> impl Future<Output = Result<Vec<SeriesPoint>, anyhow::Error>> + Send;

    /// 404 counts grouped by path, most frequent first, at most `limit` rows.
    fn top_error_paths(
        &self,
        shop_domain: &str,
        window: &Window,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<PathCount>, anyhow::Error>> + Send;

    /// 404 counts grouped by referer, most frequent first, at most `limit` rows.
    fn top_referrers(
        &self,
        shop_domain: &str,
        window: &Window,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<ReferrerCount>, anyhow::Error>> + Send;

    fn count_redirects(
        &self,
        shop_domain: &str,
        window: &Window,
    ) -> impl Future<Output = Result<i64, anyhow::Error>> + Send;

    /// Errors in the window that have not been redirected yet.
    fn count_unfixed_errors(
        &self,
        shop_domain: &str,
        window: &Window,
    ) -> impl Future<Output = Result<i64, anyhow::Error>> + Send;
}
