use crate::error::{DomainError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer buying fuel on credit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    #[serde(flatten)]
    pub entry: CustomerEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerEntry {
    pub name: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditSale {
    pub id: i32,
    pub user: i32,
    /// Set when the sale is recorded
    pub date: NaiveDate,
    #[serde(flatten)]
    pub entry: CreditSaleEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditSaleEntry {
    pub customer: i32,
    pub car_number: String,
    #[serde(default, serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub litres: Option<Decimal>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCollection {
    pub id: i32,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub entry: CreditCollectionEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCollectionEntry {
    pub customer: i32,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
}

impl CustomerEntry {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Name may not be blank."));
        }
        Ok(())
    }
}

impl CreditSaleEntry {
    pub fn validate(&self) -> Result<()> {
        if self.car_number.trim().is_empty() {
            return Err(DomainError::validation("Car number may not be blank."));
        }
        if self.amount <= Decimal::ZERO {
            return Err(DomainError::validation("Amount must be greater than zero."));
        }
        if self.litres.is_some_and(|l| l < Decimal::ZERO) {
            return Err(DomainError::validation("Litres cannot be negative."));
        }
        Ok(())
    }
}

impl CreditCollectionEntry {
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(DomainError::validation("Amount must be greater than zero."));
        }
        Ok(())
    }
}
