use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::machine::{Machine, MachineCondition, MachineRequest, MachineUpdateRequest};
use crate::models::pagination::PaginationParams;
use chrono::{DateTime, Utc};

// Intermediate struct for sqlx query results with condition as text
#[derive(Debug, sqlx::FromRow)]
struct MachineRow {
    id: i64,
    name: String,
    stock_availability: i32,
    rental_costs: f64,
    category: String,
    description: String,
    brand: String,
    condition: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MachineRow> for Machine {
    type Error = AppError;

    fn try_from(row: MachineRow) -> Result<Self, Self::Error> {
        let condition = row
            .condition
            .parse::<MachineCondition>()
            .map_err(|e| AppError::db("Invalid machine row", sqlx::Error::Decode(e.into())))?;

        Ok(Machine {
            id: row.id,
            name: row.name,
            stock_availability: row.stock_availability,
            rental_costs: row.rental_costs,
            category: row.category,
            description: row.description,
            brand: row.brand,
            condition,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const MACHINE_COLUMNS: &str = "id, name, stock_availability, rental_costs, category, description, brand, condition, created_at, updated_at";

#[async_trait::async_trait]
pub trait MachineRepository {
    async fn create_machine(&self, request: &MachineRequest) -> Result<Machine, AppError>;
    async fn get_machine_by_id(&self, id: i64) -> Result<Option<Machine>, AppError>;
    async fn list_machines(&self, pagination: Option<&PaginationParams>) -> Result<Vec<Machine>, AppError>;
    async fn update_machine(&self, id: i64, request: &MachineUpdateRequest) -> Result<Machine, AppError>;
    async fn delete_machine(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait::async_trait]
impl MachineRepository for PostgresRepository {
    async fn create_machine(&self, request: &MachineRequest) -> Result<Machine, AppError> {
        let row = sqlx::query_as::<_, MachineRow>(&format!(
            r#"
            INSERT INTO machines (name, stock_availability, rental_costs, category, description, brand, condition)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {MACHINE_COLUMNS}
            "#
        ))
        .bind(&request.name)
        .bind(request.stock_availability)
        .bind(request.rental_costs)
        .bind(&request.category)
        .bind(&request.description)
        .bind(&request.brand)
        .bind(request.condition.as_str())
        .fetch_one(&self.pool)
        .await?;

        Machine::try_from(row)
    }

    async fn get_machine_by_id(&self, id: i64) -> Result<Option<Machine>, AppError> {
        let row = sqlx::query_as::<_, MachineRow>(&format!("SELECT {MACHINE_COLUMNS} FROM machines WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Machine::try_from).transpose()
    }

    async fn list_machines(&self, pagination: Option<&PaginationParams>) -> Result<Vec<Machine>, AppError> {
        let base_query = format!("SELECT {MACHINE_COLUMNS} FROM machines ORDER BY id");

        let rows = if let Some(params) = pagination {
            sqlx::query_as::<_, MachineRow>(&format!("{} LIMIT $1 OFFSET $2", base_query))
                .bind(params.effective_limit())
                .bind(params.offset())
                .fetch_all(&self.pool)
                .await?
        } else {
            sqlx::query_as::<_, MachineRow>(&base_query).fetch_all(&self.pool).await?
        };

        rows.into_iter().map(Machine::try_from).collect()
    }

    async fn update_machine(&self, id: i64, request: &MachineUpdateRequest) -> Result<Machine, AppError> {
        let mut transaction = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, MachineRow>(&format!("SELECT {MACHINE_COLUMNS} FROM machines WHERE id = $1 FOR UPDATE"))
            .bind(id)
            .fetch_optional(&mut *transaction)
            .await?
            .ok_or_else(|| AppError::NotFound("Machine not found".to_string()))?;

        let mut machine = Machine::try_from(existing)?;
        request.apply_to(&mut machine);

        let row = sqlx::query_as::<_, MachineRow>(&format!(
            r#"
            UPDATE machines
            SET name = $1, stock_availability = $2, rental_costs = $3, category = $4,
                description = $5, brand = $6, condition = $7, updated_at = now()
            WHERE id = $8
            RETURNING {MACHINE_COLUMNS}
            "#
        ))
        .bind(&machine.name)
        .bind(machine.stock_availability)
        .bind(machine.rental_costs)
        .bind(&machine.category)
        .bind(&machine.description)
        .bind(&machine.brand)
        .bind(machine.condition.as_str())
        .bind(id)
        .fetch_one(&mut *transaction)
        .await?;

        transaction.commit().await?;

        Machine::try_from(row)
    }

    async fn delete_machine(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM machines WHERE id = $1").bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Machine not found".to_string()));
        }

        Ok(())
    }
}
