use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::maintenance::{Maintenance, MaintenanceRequest};
use crate::models::pagination::PaginationParams;

#[async_trait::async_trait]
pub trait MaintenanceRepository {
    async fn create_maintenance(&self, request: &MaintenanceRequest) -> Result<Maintenance, AppError>;
    async fn get_maintenance_by_id(&self, id: i64) -> Result<Option<Maintenance>, AppError>;
    async fn list_maintenance(&self, pagination: Option<&PaginationParams>) -> Result<Vec<Maintenance>, AppError>;
}

#[async_trait::async_trait]
impl MaintenanceRepository for PostgresRepository {
    async fn create_maintenance(&self, request: &MaintenanceRequest) -> Result<Maintenance, AppError> {
        let record = sqlx::query_as::<_, Maintenance>(
            r#"
            INSERT INTO maintenance (machine_id, issue, fixed, fixed_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, machine_id, issue, fixed, fixed_at, created_at, updated_at
            "#,
        )
        .bind(request.machine_id)
        .bind(&request.issue)
        .bind(request.fixed)
        .bind(request.fixed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn get_maintenance_by_id(&self, id: i64) -> Result<Option<Maintenance>, AppError> {
        let record = sqlx::query_as::<_, Maintenance>(
            r#"
            SELECT id, machine_id, issue, fixed, fixed_at, created_at, updated_at
            FROM maintenance
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_maintenance(&self, pagination: Option<&PaginationParams>) -> Result<Vec<Maintenance>, AppError> {
        let base_query = r#"
            SELECT id, machine_id, issue, fixed, fixed_at, created_at, updated_at
            FROM maintenance
            ORDER BY id
            "#;

        let records = if let Some(params) = pagination {
            sqlx::query_as::<_, Maintenance>(&format!("{} LIMIT $1 OFFSET $2", base_query))
                .bind(params.effective_limit())
                .bind(params.offset())
                .fetch_all(&self.pool)
                .await?
        } else {
            sqlx::query_as::<_, Maintenance>(base_query).fetch_all(&self.pool).await?
        };

        Ok(records)
    }
}
