use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use super::message::ErrorMessage;

#[derive(thiserror::Error, Debug)]
pub enum ThemeError {
    #[error("Theme id must not be empty")]
    InvalidThemeId,
    #[error("Shop has no stored access token")]
    ShopNotInstalled,
    #[error("Theme platform request failed")]
    PlatformRequestFailed(#[source] anyhow::Error),
    #[error("Theme status query failed")]
    QueryFailed(#[source] anyhow::Error),
}

impl ResponseError for ThemeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidThemeId => StatusCode::BAD_REQUEST,
            Self::ShopNotInstalled => StatusCode::NOT_FOUND,
            Self::PlatformRequestFailed(_) => StatusCode::BAD_GATEWAY,
            Self::QueryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Self::InvalidThemeId => "Theme id must not be empty",
            Self::ShopNotInstalled => "Shop is not installed",
            Self::PlatformRequestFailed(_) => "Failed to fetch themes",
            Self::QueryFailed(_) => "Failed to load theme status",
        };
        HttpResponse::build(self.status_code()).json(ErrorMessage::new(message))
    }
}
