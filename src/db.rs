use crate::config::DatabaseConfig;
use rocket::fairing::AdHoc;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

async fn init_pool(db_config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(db_config.max_connections)
        .min_connections(db_config.min_connections)
        .acquire_timeout(Duration::from_secs(db_config.acquire_timeout))
        .idle_timeout(Duration::from_secs(30))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(db_config.connect_options()?)
        .await
}

/// Opens the pool, applies pending migrations and puts the pool in managed state.
/// Ignition fails when either step fails.
pub fn stage_db(db_config: DatabaseConfig) -> AdHoc {
    AdHoc::try_on_ignite("Postgres (sqlx)", |rocket| async move {
        let pool = match init_pool(&db_config).await {
            Ok(pool) => pool,
            Err(e) => {
                tracing::error!("Failed to initialize database pool: {}", e);
                return Err(rocket);
            }
        };
        tracing::info!("Database pool initialized successfully");

        if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
            tracing::error!("Failed to apply database migrations: {}", e);
            return Err(rocket);
        }
        tracing::info!("Database schema is up to date");

        Ok(rocket.manage(pool))
    })
}

/// Closes the pool once the server stops accepting requests.
pub fn close_db() -> AdHoc {
    AdHoc::on_shutdown("Close Postgres pool", |rocket| {
        Box::pin(async move {
            if let Some(pool) = rocket.state::<PgPool>() {
                pool.close().await;
                tracing::info!("Database pool closed");
            }
        })
    })
}
