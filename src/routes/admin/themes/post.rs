use actix_web::{HttpResponse, web};
use sqlx::PgPool;

use crate::authentication::ShopDomain;
use crate::errors::ThemeError;
use crate::store::upsert_theme_status;

#[derive(serde::Deserialize, Debug)]
pub struct ThemeStatusRequest {
    theme_id: String,
    is_active: bool,
}

// upserts are naturally idempotent, no idempotency key needed here
#[allow(clippy::missing_errors_doc)]
#[tracing::instrument(
    name = "Update theme status",
    skip_all,
    fields(shop_domain = %*shop_domain, theme_id = %body.theme_id, is_active = body.is_active)
)]
pub async fn update_theme_status(
    body: web::Json<ThemeStatusRequest>,
    shop_domain: web::ReqData<ShopDomain>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ThemeError> {
    let theme_id = body.theme_id.trim();
    if theme_id.is_empty() {
        return Err(ThemeError::InvalidThemeId);
    }

    upsert_theme_status(&pool, &shop_domain, theme_id, body.is_active)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save theme status: {e:?}");
            ThemeError::QueryFailed(e)
        })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}
