pub mod analytics;
pub mod authentication;
pub mod configuration;
pub mod errors;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod session_state;
pub mod startup;
pub mod store;
pub mod telemetry;
pub mod themes;
