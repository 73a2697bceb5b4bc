mod get;
mod post;

pub use get::get_themes;
pub use post::update_theme_status;
