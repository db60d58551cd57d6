mod record;
mod repository;
mod target;

pub use record::{FuelSales, FuelSalesEntry, ShopSales, ShopSalesEntry};
pub use repository::{FuelSalesRepository, ShopSalesRepository, TargetRepository};
pub use target::{PumpTarget, ShopTarget, site_daily_fuel_target};
