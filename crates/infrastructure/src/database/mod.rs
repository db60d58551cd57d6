//! PostgreSQL persistence through sea-orm

mod credit_repository;
mod employee_repository;
pub mod entities;
mod evaluation_repository;
mod sales_repository;
mod target_repository;
mod user_repository;

pub use credit_repository::SeaOrmCreditRepository;
pub use employee_repository::{SeaOrmCaptainRepository, SeaOrmEmployeeRepository};
pub use evaluation_repository::{SeaOrmAttendanceRepository, SeaOrmEvaluationRepository};
pub use sales_repository::{SeaOrmFuelSalesRepository, SeaOrmShopSalesRepository};
pub use target_repository::SeaOrmTargetRepository;
pub use user_repository::SeaOrmUserRepository;

use domain::DomainError;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::str::FromStr;
use std::time::Duration;

/// Open the shared connection pool
pub async fn connect(database_url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    Database::connect(options).await
}

pub(crate) fn db_error(err: DbErr) -> DomainError {
    DomainError::repository(format!("Database error: {}", err))
}

/// Map a failed insert/update: a uniqueness clash becomes `Duplicate`, a
/// dangling reference becomes `Validation`, anything else a repository error.
pub(crate) fn write_error(err: DbErr, duplicate: impl FnOnce() -> String) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(%detail, "Unique constraint violated");
            DomainError::Duplicate(duplicate())
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::debug!(%detail, "Foreign key constraint violated");
            DomainError::validation("Referenced object does not exist.")
        }
        _ => db_error(err),
    }
}

/// Parse a string-coded column back into its enumeration
pub(crate) fn decode<T>(column: &str, value: &str) -> Result<T, DomainError>
where
    T: FromStr<Err = DomainError>,
{
    T::from_str(value).map_err(|_| {
        DomainError::repository(format!("Unexpected value {:?} in column {}", value, column))
    })
}

pub(crate) fn rows_affected_or_not_found(
    rows: u64,
    entity: &'static str,
    id: i32,
) -> Result<(), DomainError> {
    if rows == 0 {
        Err(DomainError::not_found(entity, id))
    } else {
        Ok(())
    }
}
