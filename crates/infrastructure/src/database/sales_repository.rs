use super::entities::{employees, fuel_sales, shop_sales};
use super::{db_error, decode, rows_affected_or_not_found, write_error};
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::DomainError;
use domain::sales::{
    FuelSales, FuelSalesEntry, FuelSalesRepository, ShopSales, ShopSalesEntry, ShopSalesRepository,
};
use domain::staff::Site;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

fn duplicate_day(user: i32, date: NaiveDate) -> String {
    format!("Sales for user {} on {} have already been recorded.", user, date)
}

/// Users whose employee profile is at `site`
async fn site_user_ids(db: &DatabaseConnection, site: Site) -> Result<Vec<i32>, DomainError> {
    let ids: Vec<Option<i32>> = employees::Entity::find()
        .select_only()
        .column(employees::Column::UserId)
        .filter(employees::Column::Site.eq(site.as_str()))
        .filter(employees::Column::UserId.is_not_null())
        .into_tuple()
        .all(db)
        .await
        .map_err(db_error)?;
    Ok(ids.into_iter().flatten().collect())
}

pub struct SeaOrmFuelSalesRepository {
    db: DatabaseConnection,
}

impl SeaOrmFuelSalesRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_sale(model: fuel_sales::Model) -> Result<FuelSales, DomainError> {
        Ok(FuelSales {
            id: model.id,
            user: model.user_id,
            entry: FuelSalesEntry {
                date: model.date,
                pump: decode("fuel_sales.pump", &model.pump)?,
                captain: model.captain_id,
                pms_sales: model.pms_sales,
                dx_sales: model.dx_sales,
                vp_sales: model.vp_sales,
            },
            performance: model.performance,
        })
    }

    fn active_model(
        user: i32,
        entry: &FuelSalesEntry,
        performance: Option<Decimal>,
    ) -> fuel_sales::ActiveModel {
        fuel_sales::ActiveModel {
            user_id: Set(user),
            date: Set(entry.date),
            pump: Set(entry.pump.as_str().to_string()),
            captain_id: Set(entry.captain),
            pms_sales: Set(entry.pms_sales),
            dx_sales: Set(entry.dx_sales),
            vp_sales: Set(entry.vp_sales),
            performance: Set(performance),
            ..Default::default()
        }
    }

    fn collect(models: Vec<fuel_sales::Model>) -> Result<Vec<FuelSales>, DomainError> {
        models.into_iter().map(Self::model_to_sale).collect()
    }
}

#[async_trait]
impl FuelSalesRepository for SeaOrmFuelSalesRepository {
    async fn create(
        &self,
        user: i32,
        entry: &FuelSalesEntry,
        performance: Option<Decimal>,
    ) -> Result<FuelSales, DomainError> {
        let model = Self::active_model(user, entry, performance)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, || duplicate_day(user, entry.date)))?;
        Self::model_to_sale(model)
    }

    async fn update(&self, sale: &FuelSales) -> Result<(), DomainError> {
        let mut active = Self::active_model(sale.user, &sale.entry, sale.performance);
        active.id = Set(sale.id);

        let result = fuel_sales::Entity::update_many()
            .set(active)
            .filter(fuel_sales::Column::Id.eq(sale.id))
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, || duplicate_day(sale.user, sale.entry.date)))?;
        rows_affected_or_not_found(result.rows_affected, "FuelSales", sale.id)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<FuelSales>, DomainError> {
        fuel_sales::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(Self::model_to_sale)
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<FuelSales>, DomainError> {
        let models = fuel_sales::Entity::find()
            .order_by_desc(fuel_sales::Column::Date)
            .order_by_desc(fuel_sales::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Self::collect(models)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<FuelSales>, DomainError> {
        let models = fuel_sales::Entity::find()
            .filter(fuel_sales::Column::UserId.eq(user_id))
            .order_by_asc(fuel_sales::Column::Date)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Self::collect(models)
    }

    async fn find_by_site(
        &self,
        site: Site,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<FuelSales>, DomainError> {
        let users = site_user_ids(&self.db, site).await?;
        if users.is_empty() {
            return Ok(Vec::new());
        }

        let models = fuel_sales::Entity::find()
            .filter(fuel_sales::Column::UserId.is_in(users))
            .filter(fuel_sales::Column::Date.between(from, to))
            .order_by_asc(fuel_sales::Column::Date)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Self::collect(models)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = fuel_sales::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;
        rows_affected_or_not_found(result.rows_affected, "FuelSales", id)
    }
}

pub struct SeaOrmShopSalesRepository {
    db: DatabaseConnection,
}

impl SeaOrmShopSalesRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_sale(model: shop_sales::Model) -> ShopSales {
        ShopSales {
            id: model.id,
            user: model.user_id,
            entry: ShopSalesEntry {
                date: model.date,
                captain: model.captain_id,
                sales: model.sales,
            },
            performance: model.performance,
        }
    }

    fn active_model(
        user: i32,
        entry: &ShopSalesEntry,
        performance: Option<Decimal>,
    ) -> shop_sales::ActiveModel {
        shop_sales::ActiveModel {
            user_id: Set(user),
            date: Set(entry.date),
            captain_id: Set(entry.captain),
            sales: Set(entry.sales),
            performance: Set(performance),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ShopSalesRepository for SeaOrmShopSalesRepository {
    async fn create(
        &self,
        user: i32,
        entry: &ShopSalesEntry,
        performance: Option<Decimal>,
    ) -> Result<ShopSales, DomainError> {
        let model = Self::active_model(user, entry, performance)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, || duplicate_day(user, entry.date)))?;
        Ok(Self::model_to_sale(model))
    }

    async fn update(&self, sale: &ShopSales) -> Result<(), DomainError> {
        let mut active = Self::active_model(sale.user, &sale.entry, sale.performance);
        active.id = Set(sale.id);

        let result = shop_sales::Entity::update_many()
            .set(active)
            .filter(shop_sales::Column::Id.eq(sale.id))
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, || duplicate_day(sale.user, sale.entry.date)))?;
        rows_affected_or_not_found(result.rows_affected, "ShopSales", sale.id)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ShopSales>, DomainError> {
        let model = shop_sales::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Self::model_to_sale))
    }

    async fn find_all(&self) -> Result<Vec<ShopSales>, DomainError> {
        let models = shop_sales::Entity::find()
            .order_by_desc(shop_sales::Column::Date)
            .order_by_desc(shop_sales::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(models.into_iter().map(Self::model_to_sale).collect())
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<ShopSales>, DomainError> {
        let models = shop_sales::Entity::find()
            .filter(shop_sales::Column::UserId.eq(user_id))
            .order_by_asc(shop_sales::Column::Date)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(models.into_iter().map(Self::model_to_sale).collect())
    }

    async fn find_by_site(
        &self,
        site: Site,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ShopSales>, DomainError> {
        let users = site_user_ids(&self.db, site).await?;
        if users.is_empty() {
            return Ok(Vec::new());
        }

        let models = shop_sales::Entity::find()
            .filter(shop_sales::Column::UserId.is_in(users))
            .filter(shop_sales::Column::Date.between(from, to))
            .order_by_asc(shop_sales::Column::Date)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(models.into_iter().map(Self::model_to_sale).collect())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = shop_sales::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;
        rows_affected_or_not_found(result.rows_affected, "ShopSales", id)
    }
}
