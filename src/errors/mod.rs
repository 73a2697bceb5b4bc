mod analytics;
mod authentication;
mod message;
mod theme;

pub use analytics::*;
pub use authentication::*;
pub use theme::*;
