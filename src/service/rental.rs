use crate::database::rental::RentalRepository;
use crate::error::app_error::AppError;
use crate::models::rental::{Rental, RentalRequest};
use chrono::{DateTime, Utc};
use tracing::info;

pub struct RentalService<'a, R> {
    repository: &'a R,
}

impl<'a, R: RentalRepository + Sync> RentalService<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        RentalService { repository }
    }

    pub async fn create_rental(&self, request: &RentalRequest) -> Result<Rental, AppError> {
        if !request.dates_are_consistent() {
            return Err(AppError::BadRequest("Return date cannot be before rental date".to_string()));
        }

        self.repository.create_rental(request).await
    }

    pub async fn return_rental(&self, id: i64) -> Result<Rental, AppError> {
        self.return_rental_at(id, Utc::now()).await
    }

    /// Closes a rental at `now`, clamped so the return never precedes the rental.
    /// Returning an already closed rental overwrites the timestamp.
    pub async fn return_rental_at(&self, id: i64, now: DateTime<Utc>) -> Result<Rental, AppError> {
        let rental = self
            .repository
            .get_rental_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))?;

        if rental.is_returned() {
            info!(rental_id = id, "rental already returned, overwriting return date");
        }

        let returned_at = now.max(rental.rental_date);
        self.repository.mark_returned(id, returned_at).await
    }
}
