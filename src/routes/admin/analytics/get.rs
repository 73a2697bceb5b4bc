use actix_web::{HttpResponse, web};
use sqlx::PgPool;

use crate::analytics::{TimeRange, compute_snapshot};
use crate::authentication::ShopDomain;
use crate::configuration::AnalyticsSettings;
use crate::errors::AnalyticsError;

// raw pairs rather than a struct: a repeated or undecodable `range` still
// means "week", never a 400
type QueryPairs = Vec<(String, String)>;

fn range_param(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "range")
        .map(|(_, value)| value.as_str())
}

#[allow(clippy::missing_errors_doc)]
#[tracing::instrument(
    name = "Get analytics snapshot",
    skip_all,
    fields(shop_domain = %*shop_domain, range = tracing::field::Empty)
)]
pub async fn get_analytics(
    query: web::Query<QueryPairs>,
    shop_domain: web::ReqData<ShopDomain>,
    pool: web::Data<PgPool>,
    settings: web::Data<AnalyticsSettings>,
) -> Result<HttpResponse, AnalyticsError> {
    let range = TimeRange::from(range_param(&query));
    tracing::Span::current().record("range", range.as_str());

    let snapshot =
        compute_snapshot(pool.get_ref(), &shop_domain, range, settings.query_timeout()).await?;

    Ok(HttpResponse::Ok().json(snapshot))
}
