mod admin;
mod health_check;
mod login;

pub use admin::*;
pub use health_check::*;
pub use login::*;
