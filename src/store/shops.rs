use anyhow::Context;
use secrecy::SecretString;
use sqlx::PgPool;

// admin API token captured when the shop installed the app
#[tracing::instrument(name = "Get shop access token", skip(pool))]
pub async fn get_shop_access_token(
    pool: &PgPool,
    shop_domain: &str,
) -> Result<Option<SecretString>, anyhow::Error> {
    let token = sqlx::query_scalar::<_, String>(
        r#"
        SELECT access_token
        FROM shops
        WHERE shop_domain = $1
        "#,
    )
    .bind(shop_domain)
    .fetch_optional(pool)
    .await
    .context("Failed to fetch the shop access token.")?
    .map(|token| SecretString::new(Box::from(token)));
    Ok(token)
}
