use actix_session::{Session, SessionExt, SessionGetError, SessionInsertError};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};

// wrapper type for session, the only place the shop domain is read from
pub struct TypedSession(Session);

#[allow(clippy::missing_errors_doc)]
impl TypedSession {
    const SHOP_DOMAIN_KEY: &'static str = "shop_domain";

    pub fn renew(&self) {
        self.0.renew();
    }

    pub fn insert_shop_domain(&self, shop_domain: &str) -> Result<(), SessionInsertError> {
        self.0.insert(Self::SHOP_DOMAIN_KEY, shop_domain)
    }

    pub fn get_shop_domain(&self) -> Result<Option<String>, SessionGetError> {
        self.0.get(Self::SHOP_DOMAIN_KEY)
    }

    pub fn log_out(self) {
        self.0.purge();
    }
}

impl FromRequest for TypedSession {
    // return the same error as Session's implementation of FromRequest
    type Error = <Session as FromRequest>::Error;

    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self(req.get_session())))
    }
}
