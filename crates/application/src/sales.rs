use std::collections::HashMap;
use std::sync::Arc;

use domain::performance::performance_percentage;
use domain::sales::{
    FuelSales, FuelSalesEntry, FuelSalesRepository, ShopSales, ShopSalesEntry,
    ShopSalesRepository, TargetRepository,
};
use domain::staff::EmployeeRepository;
use domain::{Actor, DomainError, Pump, Result, Site};
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

/// Records fuel/shop sales and keeps their stored performance in step with
/// the targets of the seller's site.
pub struct SalesService {
    fuel: Arc<dyn FuelSalesRepository>,
    shop: Arc<dyn ShopSalesRepository>,
    targets: Arc<dyn TargetRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

impl SalesService {
    pub fn new(
        fuel: Arc<dyn FuelSalesRepository>,
        shop: Arc<dyn ShopSalesRepository>,
        targets: Arc<dyn TargetRepository>,
        employees: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            fuel,
            shop,
            targets,
            employees,
        }
    }

    /// Site of the employee profile linked to `user`, if any
    async fn site_of(&self, user: i32) -> Result<Option<Site>> {
        Ok(self.employees.find_by_user(user).await?.map(|e| e.site()))
    }

    async fn fuel_performance(&self, user: i32, entry: &FuelSalesEntry) -> Result<Option<Decimal>> {
        let Some(site) = self.site_of(user).await? else {
            debug!(user, "No employee profile, fuel performance unknown");
            return Ok(None);
        };
        let target = self.targets.pump_target(site, entry.pump).await?;
        Ok(performance_percentage(entry.total_sales(), target))
    }

    async fn shop_performance(&self, user: i32, entry: &ShopSalesEntry) -> Result<Option<Decimal>> {
        let Some(site) = self.site_of(user).await? else {
            debug!(user, "No employee profile, shop performance unknown");
            return Ok(None);
        };
        let target = self.targets.shop_target(site).await?;
        Ok(performance_percentage(entry.sales, target))
    }

    // --- Fuel ---

    pub async fn record_fuel(&self, actor: &Actor, entry: FuelSalesEntry) -> Result<FuelSales> {
        entry.validate()?;
        let performance = self.fuel_performance(actor.user.id, &entry).await?;
        let sale = self.fuel.create(actor.user.id, &entry, performance).await?;
        info!(
            id = sale.id,
            user = sale.user,
            date = %sale.date(),
            total = %sale.total_sales(),
            performance = ?sale.performance,
            "⛽ Fuel sales recorded"
        );
        Ok(sale)
    }

    pub async fn update_fuel(&self, id: i32, entry: FuelSalesEntry) -> Result<FuelSales> {
        entry.validate()?;
        let mut sale = self.get_fuel(id).await?;
        sale.performance = self.fuel_performance(sale.user, &entry).await?;
        sale.entry = entry;
        self.fuel.update(&sale).await?;
        info!(id, performance = ?sale.performance, "⛽ Fuel sales updated");
        Ok(sale)
    }

    pub async fn get_fuel(&self, id: i32) -> Result<FuelSales> {
        self.fuel
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("FuelSales", id))
    }

    pub async fn list_fuel(&self) -> Result<Vec<FuelSales>> {
        self.fuel.find_all().await
    }

    pub async fn delete_fuel(&self, id: i32) -> Result<()> {
        self.fuel.delete(id).await?;
        info!(id, "🗑️ Fuel sales deleted");
        Ok(())
    }

    // --- Shop ---

    pub async fn record_shop(&self, actor: &Actor, entry: ShopSalesEntry) -> Result<ShopSales> {
        entry.validate()?;
        let performance = self.shop_performance(actor.user.id, &entry).await?;
        let sale = self.shop.create(actor.user.id, &entry, performance).await?;
        info!(
            id = sale.id,
            user = sale.user,
            date = %sale.date(),
            sales = %sale.total_sales(),
            performance = ?sale.performance,
            "🛒 Shop sales recorded"
        );
        Ok(sale)
    }

    pub async fn update_shop(&self, id: i32, entry: ShopSalesEntry) -> Result<ShopSales> {
        entry.validate()?;
        let mut sale = self.get_shop(id).await?;
        sale.performance = self.shop_performance(sale.user, &entry).await?;
        sale.entry = entry;
        self.shop.update(&sale).await?;
        info!(id, performance = ?sale.performance, "🛒 Shop sales updated");
        Ok(sale)
    }

    pub async fn get_shop(&self, id: i32) -> Result<ShopSales> {
        self.shop
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("ShopSales", id))
    }

    pub async fn list_shop(&self) -> Result<Vec<ShopSales>> {
        self.shop.find_all().await
    }

    pub async fn delete_shop(&self, id: i32) -> Result<()> {
        self.shop.delete(id).await?;
        info!(id, "🗑️ Shop sales deleted");
        Ok(())
    }

    // --- Batch recompute ---

    /// Re-derive and save the performance of every fuel record, one row at a
    /// time. Rows saved before a failure stay saved.
    pub async fn recompute_fuel_performance(&self) -> Result<usize> {
        let targets: HashMap<(Site, Pump), Decimal> = self
            .targets
            .pump_targets()
            .await?
            .into_iter()
            .map(|t| ((t.site, t.pump), t.target))
            .collect();
        let mut sites = SiteCache::default();
        let mut updated = 0;

        for mut sale in self.fuel.find_all().await? {
            let performance = match sites.get(self, sale.user).await? {
                Some(site) => performance_percentage(
                    sale.total_sales(),
                    targets.get(&(site, sale.entry.pump)).copied(),
                ),
                None => None,
            };
            sale.performance = performance;
            if let Err(e) = self.fuel.update(&sale).await {
                error!(id = sale.id, updated, "❌ Fuel performance recompute stopped: {}", e);
                return Err(e);
            }
            updated += 1;
        }

        info!(updated, "🔁 Fuel performance recomputed");
        Ok(updated)
    }

    /// Shop counterpart of [`Self::recompute_fuel_performance`]
    pub async fn recompute_shop_performance(&self) -> Result<usize> {
        let targets: HashMap<Site, Decimal> = self
            .targets
            .shop_targets()
            .await?
            .into_iter()
            .map(|t| (t.site, t.target))
            .collect();
        let mut sites = SiteCache::default();
        let mut updated = 0;

        for mut sale in self.shop.find_all().await? {
            let performance = match sites.get(self, sale.user).await? {
                Some(site) => {
                    performance_percentage(sale.total_sales(), targets.get(&site).copied())
                }
                None => None,
            };
            sale.performance = performance;
            if let Err(e) = self.shop.update(&sale).await {
                error!(id = sale.id, updated, "❌ Shop performance recompute stopped: {}", e);
                return Err(e);
            }
            updated += 1;
        }

        info!(updated, "🔁 Shop performance recomputed");
        Ok(updated)
    }
}

/// Per-batch memo of user -> employee site
#[derive(Default)]
struct SiteCache(HashMap<i32, Option<Site>>);

impl SiteCache {
    async fn get(&mut self, service: &SalesService, user: i32) -> Result<Option<Site>> {
        if let Some(site) = self.0.get(&user) {
            return Ok(*site);
        }
        let site = service.site_of(user).await?;
        if site.is_none() {
            warn!(user, "Sales owner has no employee profile");
        }
        self.0.insert(user, site);
        Ok(site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use domain::sales::{PumpTarget, ShopTarget};
    use domain::staff::{Employee, EmployeeProfile};
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Targets {}
        #[async_trait]
        impl TargetRepository for Targets {
            async fn pump_target(&self, site: Site, pump: Pump) -> Result<Option<Decimal>>;
            async fn shop_target(&self, site: Site) -> Result<Option<Decimal>>;
            async fn pump_targets(&self) -> Result<Vec<PumpTarget>>;
            async fn shop_targets(&self) -> Result<Vec<ShopTarget>>;
            async fn set_pump_target(&self, target: &PumpTarget) -> Result<()>;
            async fn set_shop_target(&self, target: &ShopTarget) -> Result<()>;
        }
    }

    mock! {
        Employees {}
        #[async_trait]
        impl EmployeeRepository for Employees {
            async fn create(&self, profile: &EmployeeProfile, user: Option<i32>) -> Result<Employee>;
            async fn update(&self, employee: &Employee) -> Result<()>;
            async fn find_by_id(&self, id: i32) -> Result<Option<Employee>>;
            async fn find_by_user(&self, user_id: i32) -> Result<Option<Employee>>;
            async fn find_all(&self) -> Result<Vec<Employee>>;
            async fn find_active_attendants(&self) -> Result<Vec<Employee>>;
            async fn delete(&self, id: i32) -> Result<()>;
        }
    }

    mock! {
        Fuel {}
        #[async_trait]
        impl FuelSalesRepository for Fuel {
            async fn create(&self, user: i32, entry: &FuelSalesEntry, performance: Option<Decimal>) -> Result<FuelSales>;
            async fn update(&self, sale: &FuelSales) -> Result<()>;
            async fn find_by_id(&self, id: i32) -> Result<Option<FuelSales>>;
            async fn find_all(&self) -> Result<Vec<FuelSales>>;
            async fn find_by_user(&self, user_id: i32) -> Result<Vec<FuelSales>>;
            async fn find_by_site(&self, site: Site, from: NaiveDate, to: NaiveDate) -> Result<Vec<FuelSales>>;
            async fn delete(&self, id: i32) -> Result<()>;
        }
    }

    mock! {
        Shop {}
        #[async_trait]
        impl ShopSalesRepository for Shop {
            async fn create(&self, user: i32, entry: &ShopSalesEntry, performance: Option<Decimal>) -> Result<ShopSales>;
            async fn update(&self, sale: &ShopSales) -> Result<()>;
            async fn find_by_id(&self, id: i32) -> Result<Option<ShopSales>>;
            async fn find_all(&self) -> Result<Vec<ShopSales>>;
            async fn find_by_user(&self, user_id: i32) -> Result<Vec<ShopSales>>;
            async fn find_by_site(&self, site: Site, from: NaiveDate, to: NaiveDate) -> Result<Vec<ShopSales>>;
            async fn delete(&self, id: i32) -> Result<()>;
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
    }

    fn fuel_sale(id: i32, user: i32) -> FuelSales {
        FuelSales {
            id,
            user,
            entry: FuelSalesEntry {
                date: day(),
                pump: Pump::Pump2,
                captain: 1,
                pms_sales: Decimal::from(600),
                dx_sales: Decimal::from(400),
                vp_sales: Decimal::ZERO,
            },
            performance: None,
        }
    }

    #[tokio::test]
    async fn test_recompute_stops_at_first_failed_save() {
        let mut fuel = MockFuel::new();
        fuel.expect_find_all()
            .returning(|| Ok(vec![fuel_sale(1, 7), fuel_sale(2, 7), fuel_sale(3, 7)]));
        fuel.expect_update()
            .withf(|s| s.id == 1)
            .times(1)
            .returning(|_| Ok(()));
        fuel.expect_update()
            .withf(|s| s.id == 2)
            .times(1)
            .returning(|_| Err(DomainError::repository("connection reset")));

        let mut targets = MockTargets::new();
        targets.expect_pump_targets().returning(|| {
            Ok(vec![PumpTarget {
                site: Site::Airport,
                pump: Pump::Pump2,
                target: Decimal::from(1250),
            }])
        });

        // No profile: performance stays unknown, but rows are still saved
        let mut employees = MockEmployees::new();
        employees
            .expect_find_by_user()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(None));

        let service = SalesService::new(
            Arc::new(fuel),
            Arc::new(MockShop::new()),
            Arc::new(targets),
            Arc::new(employees),
        );

        let err = service.recompute_fuel_performance().await.unwrap_err();
        assert!(matches!(err, DomainError::Repository(_)));
    }

    #[tokio::test]
    async fn test_update_of_missing_record_is_not_found() {
        let mut fuel = MockFuel::new();
        fuel.expect_find_by_id().returning(|_| Ok(None));
        fuel.expect_update().never();

        let service = SalesService::new(
            Arc::new(fuel),
            Arc::new(MockShop::new()),
            Arc::new(MockTargets::new()),
            Arc::new(MockEmployees::new()),
        );

        let err = service
            .update_fuel(42, fuel_sale(0, 0).entry)
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("FuelSales", 42));
    }
}
