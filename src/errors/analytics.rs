use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use super::message::ErrorMessage;

// no partial snapshots: every variant fails the whole request
#[derive(thiserror::Error, Debug)]
pub enum AnalyticsError {
    #[error("Analytics queries timed out")]
    Timeout,
    #[error("Analytics query failed")]
    QueryFailed(#[source] anyhow::Error),
}

impl ResponseError for AnalyticsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::QueryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Self::Timeout => "Analytics took too long to load",
            Self::QueryFailed(_) => "Failed to load analytics",
        };
        HttpResponse::build(self.status_code()).json(ErrorMessage::new(message))
    }
}
