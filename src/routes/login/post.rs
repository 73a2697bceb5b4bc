use actix_limitation::{Error as LimiterError, Limiter};
use actix_web::{HttpResponse, ResponseError, error::InternalError, web};
use secrecy::SecretString;
use sqlx::PgPool;

use crate::authentication::{Credentials, validate_credentials};
use crate::errors::AuthError;
use crate::session_state::TypedSession;

#[derive(serde::Deserialize, Debug)]
pub struct LoginRequest {
    shop_domain: String,
    password: SecretString,
}

#[allow(clippy::missing_errors_doc)]
#[allow(clippy::future_not_send)]
#[tracing::instrument(
    skip(request, pool, session, limiter),
    fields(shop_domain=tracing::field::Empty)
)]
pub async fn login(
    request: web::Form<LoginRequest>,
    pool: web::Data<PgPool>,
    session: TypedSession,
    limiter: web::Data<Limiter>,
) -> Result<HttpResponse, InternalError<AuthError>> {
    let shop_domain = request.shop_domain.trim().to_lowercase();
    let rate_limit_key = format!("login:{shop_domain}");

    match limiter.count(rate_limit_key).await {
        Ok(status) if status.remaining() == 0 => {
            return Err(login_error(AuthError::RateLimitExceeded));
        }
        Err(LimiterError::LimitExceeded(_)) => {
            return Err(login_error(AuthError::RateLimitExceeded));
        }
        Ok(_) => {}
        Err(e) => {
            // the limiter is best effort, a redis hiccup should not lock everyone out
            tracing::error!("Rate limiter error: {e:?}");
        }
    }

    tracing::Span::current().record("shop_domain", tracing::field::display(&shop_domain));

    let credentials = Credentials {
        shop_domain,
        password: request.password.clone(),
    };

    match validate_credentials(credentials, &pool).await {
        Ok(shop_domain) => {
            session.renew();
            session
                .insert_shop_domain(&shop_domain)
                .map_err(|e| login_error(AuthError::UnexpectedError(e.into())))?;

            Ok(HttpResponse::Ok().finish())
        }
        Err(e) => Err(login_error(e)),
    }
}

#[allow(clippy::future_not_send, clippy::missing_errors_doc)]
pub async fn logout(session: TypedSession) -> Result<HttpResponse, actix_web::Error> {
    session.log_out();
    Ok(HttpResponse::Ok().finish())
}

fn login_error(e: AuthError) -> InternalError<AuthError> {
    let response = HttpResponse::build(e.status_code()).finish();
    InternalError::from_response(e, response)
}
