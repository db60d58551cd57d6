use super::{FuelSales, FuelSalesEntry, PumpTarget, ShopSales, ShopSalesEntry, ShopTarget};
use crate::DomainError;
use crate::staff::{Pump, Site};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Repository interface for fuel sales persistence
///
/// Implementations enforce one record per (user, date) and report a clash as
/// `DomainError::Duplicate`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FuelSalesRepository: Send + Sync {
    async fn create(
        &self,
        user: i32,
        entry: &FuelSalesEntry,
        performance: Option<Decimal>,
    ) -> Result<FuelSales, DomainError>;

    /// Overwrite every column of an existing record
    async fn update(&self, sale: &FuelSales) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<FuelSales>, DomainError>;

    async fn find_all(&self) -> Result<Vec<FuelSales>, DomainError>;

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<FuelSales>, DomainError>;

    /// Records dated within `from..=to` whose user is employed at `site`
    async fn find_by_site(
        &self,
        site: Site,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<FuelSales>, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository interface for shop sales persistence, unique on (user, date)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShopSalesRepository: Send + Sync {
    async fn create(
        &self,
        user: i32,
        entry: &ShopSalesEntry,
        performance: Option<Decimal>,
    ) -> Result<ShopSales, DomainError>;

    async fn update(&self, sale: &ShopSales) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<ShopSales>, DomainError>;

    async fn find_all(&self) -> Result<Vec<ShopSales>, DomainError>;

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<ShopSales>, DomainError>;

    async fn find_by_site(
        &self,
        site: Site,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ShopSales>, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Pump and shop targets; one value per key, overwritten in place
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TargetRepository: Send + Sync {
    async fn pump_target(&self, site: Site, pump: Pump) -> Result<Option<Decimal>, DomainError>;

    async fn shop_target(&self, site: Site) -> Result<Option<Decimal>, DomainError>;

    async fn pump_targets(&self) -> Result<Vec<PumpTarget>, DomainError>;

    async fn shop_targets(&self) -> Result<Vec<ShopTarget>, DomainError>;

    async fn set_pump_target(&self, target: &PumpTarget) -> Result<(), DomainError>;

    async fn set_shop_target(&self, target: &ShopTarget) -> Result<(), DomainError>;
}
