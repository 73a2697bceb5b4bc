use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analytics::TimeRange;

// one point on the error chart: bucket start + number of 404s inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct SeriesPoint {
    pub bucket: DateTime<Utc>,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PathCount {
    pub path: String,
    pub count: i64,
}

// NULL referers (direct traffic) are kept as their own group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ReferrerCount {
    pub referer: Option<String>,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub range: TimeRange,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,

    // chart
    pub error_series: Vec<SeriesPoint>,

    // cards
    pub top_paths: Vec<PathCount>,
    pub top_referrers: Vec<ReferrerCount>,
    pub total_redirects: i64,
    pub total_errors: i64,
    pub unfixed_errors: i64,
    pub avg_daily: i64,
}
