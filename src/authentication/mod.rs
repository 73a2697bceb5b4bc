mod middleware;
mod password;

pub use middleware::{ShopDomain, reject_anonymous_shops};
pub use password::{Credentials, validate_credentials};
