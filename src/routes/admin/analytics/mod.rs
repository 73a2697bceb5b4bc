mod get;

pub use get::get_analytics;
