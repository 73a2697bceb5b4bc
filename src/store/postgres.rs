use anyhow::Context;
use sqlx::PgPool;

use super::EventStore;
use crate::analytics::Window;
use crate::models::analytics::{PathCount, ReferrerCount, SeriesPoint};

// ties on count fall back to the grouping key, descending
impl EventStore for PgPool {
    #[tracing::instrument(name = "Query error series", skip(self))]
    async fn error_series(
        &self,
        shop_domain: &str,
        window: &Window,
        bucket: &'static str,
    ) -> Result<Vec<SeriesPoint>, anyhow::Error> {
        sqlx::query_as::<_, SeriesPoint>(
            r#"
            SELECT date_trunc($4, created_at) AS bucket, COUNT(*) AS count
            FROM not_found_errors
            WHERE shop_domain = $1
                AND created_at >= $2
                AND created_at <= $3
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
        .bind(shop_domain)
        .bind(window.start)
        .bind(window.end)
        .bind(bucket)
        .fetch_all(self)
        .await
        .context("Failed to group 404 errors by time bucket.")
    }

    #[tracing::instrument(name = "Query top error paths", skip(self))]
    async fn top_error_paths(
        &self,
        shop_domain: &str,
        window: &Window,
        limit: i64,
    ) -> Result<Vec<PathCount>, anyhow::Error> {
        sqlx::query_as::<_, PathCount>(
            r#"
            SELECT path, COUNT(*) AS count
            FROM not_found_errors
            WHERE shop_domain = $1
                AND created_at >= $2
                AND created_at <= $3
            GROUP BY path
            ORDER BY count DESC, path DESC
            LIMIT $4
            "#,
        )
        .bind(shop_domain)
        .bind(window.start)
        .bind(window.end)
        .bind(limit)
        .fetch_all(self)
        .await
        .context("Failed to group 404 errors by path.")
    }

    #[tracing::instrument(name = "Query top referrers", skip(self))]
    async fn top_referrers(
        &self,
        shop_domain: &str,
        window: &Window,
        limit: i64,
    ) -> Result<Vec<ReferrerCount>, anyhow::Error> {
        sqlx::query_as::<_, ReferrerCount>(
            r#"
            SELECT referer, COUNT(*) AS count
            FROM not_found_errors
            WHERE shop_domain = $1
                AND created_at >= $2
                AND created_at <= $3
            GROUP BY referer
            ORDER BY count DESC, referer DESC NULLS LAST
            LIMIT $4
            "#,
        )
        .bind(shop_domain)
        .bind(window.start)
        .bind(window.end)
        .bind(limit)
        .fetch_all(self)
        .await
        .context("Failed to group 404 errors by referer.")
    }

    #[tracing::instrument(name = "Count redirects", skip(self))]
    async fn count_redirects(&self, shop_domain: &str, window: &Window) -> Result<i64, anyhow::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM redirects
            WHERE shop_domain = $1
                AND created_at >= $2
                AND created_at <= $3
            "#,
        )
        .bind(shop_domain)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(self)
        .await
        .context("Failed to count redirects.")
    }

    #[tracing::instrument(name = "Count unfixed errors", skip(self))]
    async fn count_unfixed_errors(
        &self,
        shop_domain: &str,
        window: &Window,
    ) -> Result<i64, anyhow::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM not_found_errors
            WHERE shop_domain = $1
                AND created_at >= $2
                AND created_at <= $3
                AND redirected = FALSE
            "#,
        )
        .bind(shop_domain)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(self)
        .await
        .context("Failed to count unfixed 404 errors.")
    }
}
