mod get;

pub use get::get_not_found_errors;
