mod get;
mod post;

pub use get::check_auth;
pub use post::{login, logout};
