use actix_web::{
    FromRequest, HttpMessage, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    error::{ErrorInternalServerError, InternalError},
    middleware::Next,
};
use std::ops::Deref;

use crate::session_state::TypedSession;

// shop scope for everything under /api/admin, inserted by the middleware below
#[derive(Clone, Debug)]
pub struct ShopDomain(String);

impl std::fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for ShopDomain {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[allow(clippy::missing_errors_doc)]
pub async fn reject_anonymous_shops(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let session = {
        let (http_request, payload) = req.parts_mut();
        TypedSession::from_request(http_request, payload).await
    }?;

    match session.get_shop_domain().map_err(ErrorInternalServerError)? {
        Some(shop_domain) => {
            req.extensions_mut().insert(ShopDomain(shop_domain));
            next.call(req).await
        }
        None => {
            let response = HttpResponse::Unauthorized().finish();
            let e = anyhow::anyhow!("No shop in session.");
            Err(InternalError::from_response(e, response).into())
        }
    }
}
