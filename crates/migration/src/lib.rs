pub use sea_orm_migration::prelude::*;

mod m20250101_000001_staff;
mod m20250101_000002_sales;
mod m20250101_000003_evaluations;
mod m20250101_000004_credit;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_staff::Migration),
            Box::new(m20250101_000002_sales::Migration),
            Box::new(m20250101_000003_evaluations::Migration),
            Box::new(m20250101_000004_credit::Migration),
        ]
    }
}
