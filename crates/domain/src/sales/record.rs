use crate::staff::Pump;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Daily fuel sales of one employee at one pump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelSales {
    pub id: i32,
    pub user: i32,
    #[serde(flatten)]
    pub entry: FuelSalesEntry,
    /// Percentage of the pump target; `None` while no target applies
    #[serde(serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub performance: Option<Decimal>,
}

/// Client-supplied part of a fuel sales record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelSalesEntry {
    pub date: NaiveDate,
    pub pump: Pump,
    pub captain: i32,
    #[serde(default, serialize_with = "rust_decimal::serde::float::serialize")]
    pub pms_sales: Decimal,
    #[serde(default, serialize_with = "rust_decimal::serde::float::serialize")]
    pub dx_sales: Decimal,
    #[serde(default, serialize_with = "rust_decimal::serde::float::serialize")]
    pub vp_sales: Decimal,
}

impl FuelSalesEntry {
    /// Petrol + diesel + premium
    pub fn total_sales(&self) -> Decimal {
        self.pms_sales + self.dx_sales + self.vp_sales
    }

    pub fn validate(&self) -> crate::Result<()> {
        validate_amount("pms_sales", self.pms_sales)?;
        validate_amount("dx_sales", self.dx_sales)?;
        validate_amount("vp_sales", self.vp_sales)
    }
}

impl FuelSales {
    pub fn total_sales(&self) -> Decimal {
        self.entry.total_sales()
    }

    pub fn date(&self) -> NaiveDate {
        self.entry.date
    }
}

/// Daily shop sales of one employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopSales {
    pub id: i32,
    pub user: i32,
    #[serde(flatten)]
    pub entry: ShopSalesEntry,
    #[serde(serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub performance: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopSalesEntry {
    pub date: NaiveDate,
    pub captain: i32,
    #[serde(default, serialize_with = "rust_decimal::serde::float::serialize")]
    pub sales: Decimal,
}

impl ShopSalesEntry {
    pub fn validate(&self) -> crate::Result<()> {
        validate_amount("sales", self.sales)
    }
}

impl ShopSales {
    pub fn total_sales(&self) -> Decimal {
        self.entry.sales
    }

    pub fn date(&self) -> NaiveDate {
        self.entry.date
    }
}

/// Amounts are stored as NUMERIC(12, 2)
fn validate_amount(field: &str, value: Decimal) -> crate::Result<()> {
    let max = Decimal::new(9_999_999_999_99, 2);
    if value.is_sign_negative() && !value.is_zero() {
        return Err(crate::DomainError::validation(format!(
            "{field} cannot be negative."
        )));
    }
    if value > max {
        return Err(crate::DomainError::validation(format!(
            "Ensure that there are no more than 12 digits in total for {field}."
        )));
    }
    if value.scale() > 2 && value.normalize().scale() > 2 {
        return Err(crate::DomainError::validation(format!(
            "Ensure that there are no more than 2 decimal places for {field}."
        )));
    }
    Ok(())
}
