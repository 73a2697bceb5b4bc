use actix_web::{HttpResponse, web};
use sqlx::PgPool;

use crate::authentication::ShopDomain;
use crate::errors::ThemeError;
use crate::store::{get_shop_access_token, get_theme_statuses};
use crate::themes::{ThemeClient, merge_theme_statuses};

#[allow(clippy::missing_errors_doc)]
#[tracing::instrument(
    name = "Get themes with activation status",
    skip_all,
    fields(shop_domain = %*shop_domain)
)]
pub async fn get_themes(
    shop_domain: web::ReqData<ShopDomain>,
    pool: web::Data<PgPool>,
    theme_client: web::Data<ThemeClient>,
) -> Result<HttpResponse, ThemeError> {
    let access_token = get_shop_access_token(&pool, &shop_domain)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up access token: {e:?}");
            ThemeError::QueryFailed(e)
        })?
        .ok_or(ThemeError::ShopNotInstalled)?;

    let (themes, statuses) = tokio::try_join!(
        async {
            theme_client
                .fetch_themes(&shop_domain, &access_token)
                .await
                .map_err(|e| {
                    tracing::error!("Theme platform request failed: {e:?}");
                    ThemeError::PlatformRequestFailed(e)
                })
        },
        async {
            get_theme_statuses(&pool, &shop_domain).await.map_err(|e| {
                tracing::error!("Failed to fetch theme statuses: {e:?}");
                ThemeError::QueryFailed(e)
            })
        },
    )?;

    let merged = merge_theme_statuses(themes, &statuses);
    tracing::info!("Returning {} themes", merged.len());

    Ok(HttpResponse::Ok().json(merged))
}
