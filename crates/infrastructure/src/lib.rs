//! Infrastructure layer - Persistence, configuration and credentials

pub mod auth;
pub mod config;
pub mod database;
pub mod repositories;

pub use config::ServerConfig;
pub use database::{
    SeaOrmAttendanceRepository, SeaOrmCaptainRepository, SeaOrmCreditRepository,
    SeaOrmEmployeeRepository, SeaOrmEvaluationRepository, SeaOrmFuelSalesRepository,
    SeaOrmShopSalesRepository, SeaOrmTargetRepository, SeaOrmUserRepository,
};
pub use repositories::InMemoryDatabase;
