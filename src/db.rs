use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::entities;
use crate::errors::ServiceError;

/// Type alias for a database connection pool.
pub type DbPool = DatabaseConnection;

/// Establishes a connection pool from the application configuration.
pub async fn establish_connection(cfg: &AppConfig) -> Result<DbPool, ServiceError> {
    let mut opt = ConnectOptions::new(cfg.database_url.clone());
    opt.max_connections(cfg.db_max_connections)
        .min_connections(cfg.db_min_connections)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    let pool = Database::connect(opt).await?;
    info!("database connection established");
    Ok(pool)
}

/// Creates any missing tables from the entity definitions.
///
/// The schema is small and fixed, so tables are derived from the entities
/// instead of a migrations directory; `IF NOT EXISTS` makes this safe to run
/// on every startup.
pub async fn run_migrations(db: &DbPool) -> Result<(), ServiceError> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statements = vec![
        schema.create_table_from_entity(entities::Product),
        schema.create_table_from_entity(entities::CartItem),
        schema.create_table_from_entity(entities::Order),
        schema.create_table_from_entity(entities::OrderItem),
        schema.create_table_from_entity(entities::User),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(backend.build(&*statement)).await?;
    }

    debug!("schema bootstrap complete");
    Ok(())
}
