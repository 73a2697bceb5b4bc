use anyhow::Context;
use sqlx::PgPool;

use crate::models::theme::ThemeActivationStatus;

#[tracing::instrument(name = "Get theme statuses", skip(pool))]
pub async fn get_theme_statuses(
    pool: &PgPool,
    shop_domain: &str,
) -> Result<Vec<ThemeActivationStatus>, anyhow::Error> {
    sqlx::query_as::<_, ThemeActivationStatus>(
        r#"
        SELECT theme_id, is_active
        FROM theme_statuses
        WHERE shop_domain = $1
        "#,
    )
    .bind(shop_domain)
    .fetch_all(pool)
    .await
    .context("Failed to fetch theme statuses.")
}

// one row per (shop, theme), last write wins
#[tracing::instrument(name = "Upsert theme status", skip(pool))]
pub async fn upsert_theme_status(
    pool: &PgPool,
    shop_domain: &str,
    theme_id: &str,
    is_active: bool,
) -> Result<(), anyhow::Error> {
    sqlx::query(
        r#"
        INSERT INTO theme_statuses (shop_domain, theme_id, is_active, updated_at)
        VALUES ($1, $2, $3, now())
        ON CONFLICT (shop_domain, theme_id)
        DO UPDATE SET is_active = EXCLUDED.is_active, updated_at = now()
        "#,
    )
    .bind(shop_domain)
    .bind(theme_id)
    .bind(is_active)
    .execute(pool)
    .await
    .context("Failed to upsert theme status.")?;
    Ok(())
}
