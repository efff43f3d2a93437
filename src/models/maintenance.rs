use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use validator::Validate;

#[derive(Serialize, Debug, Clone, sqlx::FromRow, JsonSchema)]
pub struct Maintenance {
    pub id: i64,
    pub machine_id: i64,
    pub issue: String,
    pub fixed: bool,
    pub fixed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, JsonSchema)]
pub struct MaintenanceRequest {
    #[validate(range(min = 1))]
    pub machine_id: i64,
    #[validate(length(min = 1))]
    pub issue: String,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub fixed_at: Option<DateTime<Utc>>,
}
