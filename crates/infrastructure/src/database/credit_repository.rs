use super::entities::{credit_collections, credit_sales, customers};
use super::{db_error, rows_affected_or_not_found, write_error};
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::DomainError;
use domain::credit::{
    CreditCollection, CreditCollectionEntry, CreditRepository, CreditSale, CreditSaleEntry,
    Customer, CustomerEntry,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

pub struct SeaOrmCreditRepository {
    db: DatabaseConnection,
}

impl SeaOrmCreditRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_customer(model: customers::Model) -> Customer {
    Customer {
        id: model.id,
        entry: CustomerEntry {
            name: model.name,
            contact: model.contact,
        },
    }
}

fn to_sale(model: credit_sales::Model) -> CreditSale {
    CreditSale {
        id: model.id,
        user: model.user_id,
        date: model.date,
        entry: CreditSaleEntry {
            customer: model.customer_id,
            car_number: model.car_number,
            litres: model.litres,
            amount: model.amount,
        },
    }
}

fn to_collection(model: credit_collections::Model) -> CreditCollection {
    CreditCollection {
        id: model.id,
        date: model.date,
        entry: CreditCollectionEntry {
            customer: model.customer_id,
            amount: model.amount,
        },
    }
}

fn no_duplicate() -> String {
    "Record already exists.".to_string()
}

#[async_trait]
impl CreditRepository for SeaOrmCreditRepository {
    async fn create_customer(&self, entry: &CustomerEntry) -> Result<Customer, DomainError> {
        let model = customers::ActiveModel {
            name: Set(entry.name.clone()),
            contact: Set(entry.contact.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, no_duplicate))?;
        Ok(to_customer(model))
    }

    async fn find_customer(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        let model = customers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(to_customer))
    }

    async fn find_customers(&self) -> Result<Vec<Customer>, DomainError> {
        let models = customers::Entity::find()
            .order_by_asc(customers::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(models.into_iter().map(to_customer).collect())
    }

    async fn create_sale(
        &self,
        user: i32,
        date: NaiveDate,
        entry: &CreditSaleEntry,
    ) -> Result<CreditSale, DomainError> {
        let model = credit_sales::ActiveModel {
            user_id: Set(user),
            date: Set(date),
            customer_id: Set(entry.customer),
            car_number: Set(entry.car_number.clone()),
            litres: Set(entry.litres),
            amount: Set(entry.amount),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, no_duplicate))?;
        Ok(to_sale(model))
    }

    async fn update_sale(&self, sale: &CreditSale) -> Result<(), DomainError> {
        let result = credit_sales::Entity::update_many()
            .set(credit_sales::ActiveModel {
                customer_id: Set(sale.entry.customer),
                car_number: Set(sale.entry.car_number.clone()),
                litres: Set(sale.entry.litres),
                amount: Set(sale.entry.amount),
                ..Default::default()
            })
            .filter(credit_sales::Column::Id.eq(sale.id))
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, no_duplicate))?;
        rows_affected_or_not_found(result.rows_affected, "CreditSale", sale.id)
    }

    async fn find_sale(&self, id: i32) -> Result<Option<CreditSale>, DomainError> {
        let model = credit_sales::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(to_sale))
    }

    async fn find_sales(&self) -> Result<Vec<CreditSale>, DomainError> {
        let models = credit_sales::Entity::find()
            .order_by_desc(credit_sales::Column::Date)
            .order_by_desc(credit_sales::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(models.into_iter().map(to_sale).collect())
    }

    async fn delete_sale(&self, id: i32) -> Result<(), DomainError> {
        let result = credit_sales::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;
        rows_affected_or_not_found(result.rows_affected, "CreditSale", id)
    }

    async fn create_collection(
        &self,
        date: NaiveDate,
        entry: &CreditCollectionEntry,
    ) -> Result<CreditCollection, DomainError> {
        let model = credit_collections::ActiveModel {
            customer_id: Set(entry.customer),
            date: Set(date),
            amount: Set(entry.amount),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, no_duplicate))?;
        Ok(to_collection(model))
    }

    async fn update_collection(&self, collection: &CreditCollection) -> Result<(), DomainError> {
        let result = credit_collections::Entity::update_many()
            .set(credit_collections::ActiveModel {
                customer_id: Set(collection.entry.customer),
                amount: Set(collection.entry.amount),
                ..Default::default()
            })
            .filter(credit_collections::Column::Id.eq(collection.id))
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, no_duplicate))?;
        rows_affected_or_not_found(result.rows_affected, "CreditCollection", collection.id)
    }

    async fn find_collection(&self, id: i32) -> Result<Option<CreditCollection>, DomainError> {
        let model = credit_collections::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(to_collection))
    }

    async fn find_collections(&self) -> Result<Vec<CreditCollection>, DomainError> {
        let models = credit_collections::Entity::find()
            .order_by_desc(credit_collections::Column::Date)
            .order_by_desc(credit_collections::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(models.into_iter().map(to_collection).collect())
    }

    async fn delete_collection(&self, id: i32) -> Result<(), DomainError> {
        let result = credit_collections::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;
        rows_affected_or_not_found(result.rows_affected, "CreditCollection", id)
    }
}
