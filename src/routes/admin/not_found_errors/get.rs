use actix_web::{HttpResponse, web};
use sqlx::PgPool;

use crate::authentication::ShopDomain;
use crate::pagination::{PaginatedResponse, PaginationMeta, PaginationQuery};
use crate::store::{count_errors, list_errors};

#[derive(serde::Deserialize, Debug)]
pub struct NotFoundErrorQuery {
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_page_size")]
    page_size: i64,
    #[serde(default)]
    unfixed_only: bool,
}

const fn default_page() -> i64 {
    1
}

const fn default_page_size() -> i64 {
    20
}

#[allow(clippy::missing_errors_doc)]
#[tracing::instrument(
    name = "Get 404 errors with pagination",
    skip_all,
    fields(shop_domain = %*shop_domain, page = %query.page, page_size = %query.page_size)
)]
pub async fn get_not_found_errors(
    query: web::Query<NotFoundErrorQuery>,
    shop_domain: web::ReqData<ShopDomain>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    let pagination = PaginationQuery {
        page: query.page,
        page_size: query.page_size,
    };

    let total_items = count_errors(&pool, &shop_domain, query.unfixed_only)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count 404 errors: {e:?}");
            actix_web::error::ErrorInternalServerError("Failed to retrieve 404 error count")
        })?;

    let data = list_errors(
        &pool,
        &shop_domain,
        query.unfixed_only,
        pagination.limit(),
        pagination.offset(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch 404 errors: {e:?}");
        actix_web::error::ErrorInternalServerError("Failed to retrieve 404 errors")
    })?;

    tracing::info!(
        "Retrieved {} 404 errors for page {} (page_size: {})",
        data.len(),
        pagination.page(),
        pagination.page_size()
    );

    Ok(HttpResponse::Ok().json(PaginatedResponse {
        data,
        pagination: PaginationMeta::from_total(total_items, &pagination),
    }))
}
