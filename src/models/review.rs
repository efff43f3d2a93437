use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use validator::Validate;

#[derive(Serialize, Debug, Clone, sqlx::FromRow, JsonSchema)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub machine_id: i64,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, JsonSchema)]
pub struct ReviewRequest {
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(range(min = 1))]
    pub machine_id: i64,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}
