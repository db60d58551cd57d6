use super::{
    CreditCollection, CreditCollectionEntry, CreditSale, CreditSaleEntry, Customer,
    CustomerEntry,
};
use crate::DomainError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Credit customers, the fuel they take on credit and the money collected back
#[async_trait]
pub trait CreditRepository: Send + Sync {
    async fn create_customer(&self, entry: &CustomerEntry) -> Result<Customer, DomainError>;

    async fn find_customer(&self, id: i32) -> Result<Option<Customer>, DomainError>;

    async fn find_customers(&self) -> Result<Vec<Customer>, DomainError>;

    async fn create_sale(
        &self,
        user: i32,
        date: NaiveDate,
        entry: &CreditSaleEntry,
    ) -> Result<CreditSale, DomainError>;

    async fn update_sale(&self, sale: &CreditSale) -> Result<(), DomainError>;

    async fn find_sale(&self, id: i32) -> Result<Option<CreditSale>, DomainError>;

    async fn find_sales(&self) -> Result<Vec<CreditSale>, DomainError>;

    async fn delete_sale(&self, id: i32) -> Result<(), DomainError>;

    async fn create_collection(
        &self,
        date: NaiveDate,
        entry: &CreditCollectionEntry,
    ) -> Result<CreditCollection, DomainError>;

    async fn update_collection(&self, collection: &CreditCollection) -> Result<(), DomainError>;

    async fn find_collection(&self, id: i32) -> Result<Option<CreditCollection>, DomainError>;

    async fn find_collections(&self) -> Result<Vec<CreditCollection>, DomainError>;

    async fn delete_collection(&self, id: i32) -> Result<(), DomainError>;
}
