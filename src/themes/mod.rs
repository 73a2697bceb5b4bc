mod client;
mod merge;

pub use client::ThemeClient;
pub use merge::merge_theme_statuses;
