use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::pagination::PaginationParams;
use crate::models::rental::{Rental, RentalRequest};
use chrono::{DateTime, Utc};

#[async_trait::async_trait]
pub trait RentalRepository {
    async fn create_rental(&self, request: &RentalRequest) -> Result<Rental, AppError>;
    async fn get_rental_by_id(&self, id: i64) -> Result<Option<Rental>, AppError>;
    async fn list_rentals(&self, pagination: Option<&PaginationParams>) -> Result<Vec<Rental>, AppError>;
    /// Overwrites the return timestamp of an existing rental.
    async fn mark_returned(&self, id: i64, returned_at: DateTime<Utc>) -> Result<Rental, AppError>;
}

#[async_trait::async_trait]
impl RentalRepository for PostgresRepository {
    async fn create_rental(&self, request: &RentalRequest) -> Result<Rental, AppError> {
        let rental = sqlx::query_as::<_, Rental>(
            r#"
            INSERT INTO rentals (user_id, machine_id, rental_date, return_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, machine_id, rental_date, return_date, created_at, updated_at
            "#,
        )
        .bind(request.user_id)
        .bind(request.machine_id)
        .bind(request.rental_date)
        .bind(request.return_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(rental)
    }

    async fn get_rental_by_id(&self, id: i64) -> Result<Option<Rental>, AppError> {
        let rental = sqlx::query_as::<_, Rental>(
            r#"
            SELECT id, user_id, machine_id, rental_date, return_date, created_at, updated_at
            FROM rentals
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rental)
    }

    async fn list_rentals(&self, pagination: Option<&PaginationParams>) -> Result<Vec<Rental>, AppError> {
        let base_query = r#"
            SELECT id, user_id, machine_id, rental_date, return_date, created_at, updated_at
            FROM rentals
            ORDER BY id
            "#;

        let rentals = if let Some(params) = pagination {
            sqlx::query_as::<_, Rental>(&format!("{} LIMIT $1 OFFSET $2", base_query))
                .bind(params.effective_limit())
                .bind(params.offset())
                .fetch_all(&self.pool)
                .await?
        } else {
            sqlx::query_as::<_, Rental>(base_query).fetch_all(&self.pool).await?
        };

        Ok(rentals)
    }

    async fn mark_returned(&self, id: i64, returned_at: DateTime<Utc>) -> Result<Rental, AppError> {
        let mut transaction = self.pool.begin().await?;

        let mut rental = sqlx::query_as::<_, Rental>(
            r#"
            SELECT id, user_id, machine_id, rental_date, return_date, created_at, updated_at
            FROM rentals
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *transaction)
        .await?
        .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))?;

        rental.return_date = Some(returned_at);

        let saved = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals
            SET user_id = $1, machine_id = $2, rental_date = $3, return_date = $4, updated_at = now()
            WHERE id = $5
            RETURNING id, user_id, machine_id, rental_date, return_date, created_at, updated_at
            "#,
        )
        .bind(rental.user_id)
        .bind(rental.machine_id)
        .bind(rental.rental_date)
        .bind(rental.return_date)
        .bind(id)
        .fetch_one(&mut *transaction)
        .await?;

        transaction.commit().await?;

        Ok(saved)
    }
}
