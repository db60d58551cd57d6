use crate::staff::{Pump, Site};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Daily fuel sales target of one pump at one site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpTarget {
    pub site: Site,
    pub pump: Pump,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub target: Decimal,
}

/// Daily shop sales target of a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopTarget {
    pub site: Site,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub target: Decimal,
}

/// Sum of every pump target at a site
pub fn site_daily_fuel_target(targets: &[PumpTarget], site: Site) -> Decimal {
    targets
        .iter()
        .filter(|t| t.site == site)
        .map(|t| t.target)
        .sum()
}
