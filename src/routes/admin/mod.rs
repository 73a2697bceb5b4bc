mod analytics;
mod not_found_errors;
mod themes;

pub use analytics::*;
pub use not_found_errors::*;
pub use themes::*;
