use serde::{Deserialize, Serialize};

// a storefront theme as reported by the platform admin API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ThemeActivationStatus {
    pub theme_id: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeWithStatus {
    pub id: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
}
