use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::pagination::PaginationParams;
use crate::models::review::{Review, ReviewRequest};

#[async_trait::async_trait]
pub trait ReviewRepository {
    async fn create_review(&self, request: &ReviewRequest) -> Result<Review, AppError>;
    async fn get_review_by_id(&self, id: i64) -> Result<Option<Review>, AppError>;
    async fn list_reviews(&self, pagination: Option<&PaginationParams>) -> Result<Vec<Review>, AppError>;
    async fn delete_review(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait::async_trait]
impl ReviewRepository for PostgresRepository {
    async fn create_review(&self, request: &ReviewRequest) -> Result<Review, AppError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (user_id, machine_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, machine_id, rating, comment, created_at, updated_at
            "#,
        )
        .bind(request.user_id)
        .bind(request.machine_id)
        .bind(request.rating)
        .bind(&request.comment)
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }

    async fn get_review_by_id(&self, id: i64) -> Result<Option<Review>, AppError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, user_id, machine_id, rating, comment, created_at, updated_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    async fn list_reviews(&self, pagination: Option<&PaginationParams>) -> Result<Vec<Review>, AppError> {
        let base_query = r#"
            SELECT id, user_id, machine_id, rating, comment, created_at, updated_at
            FROM reviews
            ORDER BY id
            "#;

        let reviews = if let Some(params) = pagination {
            sqlx::query_as::<_, Review>(&format!("{} LIMIT $1 OFFSET $2", base_query))
                .bind(params.effective_limit())
                .bind(params.offset())
                .fetch_all(&self.pool)
                .await?
        } else {
            sqlx::query_as::<_, Review>(base_query).fetch_all(&self.pool).await?
        };

        Ok(reviews)
    }

    async fn delete_review(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1").bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Review not found".to_string()));
        }

        Ok(())
    }
}
