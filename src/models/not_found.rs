use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NotFoundErrorRecord {
    pub error_id: Uuid,
    pub path: String,
    pub referer: Option<String>,
    pub created_at: DateTime<Utc>,
    pub redirected: bool,
}
