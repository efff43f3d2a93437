use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use validator::Validate;

#[derive(Serialize, Debug, Clone, PartialEq, sqlx::FromRow, JsonSchema)]
pub struct Rental {
    pub id: i64,
    pub user_id: i64,
    pub machine_id: i64,
    pub rental_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rental {
    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }
}

#[derive(Deserialize, Debug, Clone, Validate, JsonSchema)]
pub struct RentalRequest {
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(range(min = 1))]
    pub machine_id: i64,
    pub rental_date: DateTime<Utc>,
    #[serde(default)]
    pub return_date: Option<DateTime<Utc>>,
}

impl RentalRequest {
    /// A return date, when given, must not precede the rental date.
    pub fn dates_are_consistent(&self) -> bool {
        self.return_date.is_none_or(|returned| returned >= self.rental_date)
    }
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct ReturnRentalResponse {
    pub message: String,
    pub rental: Rental,
}
