use std::time::Duration;

use crate::analytics::{TimeRange, Window};
use crate::errors::AnalyticsError;
use crate::models::analytics::{MetricsSnapshot, PathCount, ReferrerCount, SeriesPoint};
use crate::store::EventStore;

pub const TOP_PATHS_LIMIT: usize = 5;
pub const TOP_REFERRERS_LIMIT: usize = 3;

// raw query results, before any derived metric is computed
#[derive(Debug, Default)]
pub struct RawMetrics {
    pub error_series: Vec<SeriesPoint>,
    pub top_paths: Vec<PathCount>,
    pub top_referrers: Vec<ReferrerCount>,
    pub total_redirects: i64,
    pub unfixed_errors: i64,
}

/// Build the analytics snapshot for one shop over the given range.
///
/// The five store queries are independent, so they are fanned out together
/// and joined before anything is assembled. A failing query or an expired
/// `timeout` fails the whole snapshot.
///
/// # Errors
/// `AnalyticsError::Timeout` if the queries do not complete in time,
/// `AnalyticsError::QueryFailed` if any one of them errors.
#[tracing::instrument(
    name = "Compute metrics snapshot",
    skip(store, range, timeout),
    fields(range = %range.as_str())
)]
pub async fn compute_snapshot<S: EventStore>(
    store: &S,
    shop_domain: &str,
    range: TimeRange,
    timeout: Duration,
) -> Result<MetricsSnapshot, AnalyticsError> {
    let window = range.window();

    let fan_out = async {
        tokio::try_join!(
            store.error_series(shop_domain, &window, range.bucket()),
            store.top_error_paths(shop_domain, &window, TOP_PATHS_LIMIT as i64),
            store.top_referrers(shop_domain, &window, TOP_REFERRERS_LIMIT as i64),
            store.count_redirects(shop_domain, &window),
            store.count_unfixed_errors(shop_domain, &window),
        )
    };

    let (error_series, top_paths, top_referrers, total_redirects, unfixed_errors) =
        tokio::time::timeout(timeout, fan_out)
            .await
            .map_err(|_| {
                tracing::error!("Analytics queries timed out after {timeout:?}");
                AnalyticsError::Timeout
            })?
            .map_err(|e| {
                tracing::error!(error.cause_chain = ?e, "Analytics query failed");
                AnalyticsError::QueryFailed(e)
            })?;

    let snapshot = assemble_snapshot(
        range,
        window,
        RawMetrics {
            error_series,
            top_paths,
            top_referrers,
            total_redirects,
            unfixed_errors,
        },
    );

    tracing::info!(
        "Computed snapshot with {} buckets and {} total errors",
        snapshot.error_series.len(),
        snapshot.total_errors
    );

    Ok(snapshot)
}

/// Reduce raw query results into the snapshot shown on the analytics page.
#[must_use]
pub fn assemble_snapshot(range: TimeRange, window: Window, raw: RawMetrics) -> MetricsSnapshot {
    let RawMetrics {
        mut error_series,
        mut top_paths,
        mut top_referrers,
        total_redirects,
        unfixed_errors,
    } = raw;

    error_series.sort_by(|a, b| a.bucket.cmp(&b.bucket));

    // the store already orders and limits these, but nothing downstream
    // should depend on that
    top_paths.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| b.path.cmp(&a.path)));
    top_paths.truncate(TOP_PATHS_LIMIT);
    top_referrers.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| b.referer.cmp(&a.referer)));
    top_referrers.truncate(TOP_REFERRERS_LIMIT);

    let total_errors: i64 = error_series.iter().map(|point| point.count).sum();

    MetricsSnapshot {
        range,
        start_date: window.start,
        end_date: window.end,
        error_series,
        top_paths,
        top_referrers,
        total_redirects,
        total_errors,
        // the queries run side by side, a row landing in between must not
        // push this above the total
        unfixed_errors: unfixed_errors.min(total_errors),
        avg_daily: average_daily(total_errors, range.days()),
    }
}

// rounds half up, same as rounding the float quotient for non-negative counts
const fn average_daily(total_errors: i64, days: i64) -> i64 {
    (total_errors + days / 2) / days
}
