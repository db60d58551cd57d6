use std::sync::Arc;

use chrono::NaiveDate;
use domain::credit::{
    CreditCollection, CreditCollectionEntry, CreditRepository, CreditSale, CreditSaleEntry,
    Customer, CustomerEntry,
};
use domain::{Actor, Capability, DomainError, Result};
use tracing::info;

/// Fuel sold on credit and the money later collected for it
pub struct CreditService {
    repository: Arc<dyn CreditRepository>,
}

impl CreditService {
    pub fn new(repository: Arc<dyn CreditRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_customer(&self, entry: CustomerEntry) -> Result<Customer> {
        entry.validate()?;
        let customer = self.repository.create_customer(&entry).await?;
        info!(id = customer.id, "💳 Credit customer created");
        Ok(customer)
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.repository.find_customers().await
    }

    pub async fn get_customer(&self, id: i32) -> Result<Customer> {
        self.repository
            .find_customer(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", id))
    }

    /// Record a credit sale by the caller, dated `today`
    pub async fn record_sale(
        &self,
        actor: &Actor,
        entry: CreditSaleEntry,
        today: NaiveDate,
    ) -> Result<CreditSale> {
        entry.validate()?;
        let sale = self
            .repository
            .create_sale(actor.user.id, today, &entry)
            .await?;
        info!(
            id = sale.id,
            customer = sale.entry.customer,
            amount = %sale.entry.amount,
            "💳 Credit sale recorded"
        );
        Ok(sale)
    }

    /// The sale keeps its seller and date
    pub async fn update_sale(&self, id: i32, entry: CreditSaleEntry) -> Result<CreditSale> {
        entry.validate()?;
        let mut sale = self.get_sale(id).await?;
        sale.entry = entry;
        self.repository.update_sale(&sale).await?;
        Ok(sale)
    }

    pub async fn get_sale(&self, id: i32) -> Result<CreditSale> {
        self.repository
            .find_sale(id)
            .await?
            .ok_or_else(|| DomainError::not_found("CreditSale", id))
    }

    pub async fn list_sales(&self) -> Result<Vec<CreditSale>> {
        self.repository.find_sales().await
    }

    pub async fn delete_sale(&self, id: i32) -> Result<()> {
        self.repository.delete_sale(id).await
    }

    /// Record a collection dated `today`. Managers and supervisors only.
    pub async fn record_collection(
        &self,
        actor: &Actor,
        entry: CreditCollectionEntry,
        today: NaiveDate,
    ) -> Result<CreditCollection> {
        Capability::RecordCreditCollection.require(actor)?;
        entry.validate()?;
        let collection = self.repository.create_collection(today, &entry).await?;
        info!(
            id = collection.id,
            customer = collection.entry.customer,
            amount = %collection.entry.amount,
            "💰 Credit collection recorded"
        );
        Ok(collection)
    }

    pub async fn update_collection(
        &self,
        actor: &Actor,
        id: i32,
        entry: CreditCollectionEntry,
    ) -> Result<CreditCollection> {
        Capability::RecordCreditCollection.require(actor)?;
        entry.validate()?;
        let mut collection = self.get_collection(id).await?;
        collection.entry = entry;
        self.repository.update_collection(&collection).await?;
        Ok(collection)
    }

    pub async fn get_collection(&self, id: i32) -> Result<CreditCollection> {
        self.repository
            .find_collection(id)
            .await?
            .ok_or_else(|| DomainError::not_found("CreditCollection", id))
    }

    pub async fn list_collections(&self) -> Result<Vec<CreditCollection>> {
        self.repository.find_collections().await
    }

    pub async fn delete_collection(&self, actor: &Actor, id: i32) -> Result<()> {
        Capability::RecordCreditCollection.require(actor)?;
        self.repository.delete_collection(id).await
    }
}
