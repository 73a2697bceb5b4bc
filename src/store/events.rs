use anyhow::Context;
use sqlx::PgPool;

use crate::models::not_found::NotFoundErrorRecord;

#[tracing::instrument(name = "Count 404 errors", skip(pool))]
pub async fn count_errors(
    pool: &PgPool,
    shop_domain: &str,
    unfixed_only: bool,
) -> Result<i64, anyhow::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM not_found_errors
        WHERE shop_domain = $1
            AND (NOT $2 OR redirected = FALSE)
        "#,
    )
    .bind(shop_domain)
    .bind(unfixed_only)
    .fetch_one(pool)
    .await
    .context("Failed to count 404 errors.")
}

#[tracing::instrument(name = "List 404 errors", skip(pool))]
pub async fn list_errors(
    pool: &PgPool,
    shop_domain: &str,
    unfixed_only: bool,
    limit: i64,
    offset: i64,
) -> Result<Vec<NotFoundErrorRecord>, anyhow::Error> {
    sqlx::query_as::<_, NotFoundErrorRecord>(
        r#"
        SELECT error_id, path, referer, created_at, redirected
        FROM not_found_errors
        WHERE shop_domain = $1
            AND (NOT $2 OR redirected = FALSE)
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(shop_domain)
    .bind(unfixed_only)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .context("Failed to fetch 404 errors.")
}
