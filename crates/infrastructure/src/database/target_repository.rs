use super::entities::{pump_targets, shop_targets};
use super::{db_error, decode};
use async_trait::async_trait;
use domain::DomainError;
use domain::sales::{PumpTarget, ShopTarget, TargetRepository};
use domain::staff::{Pump, Site};
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct SeaOrmTargetRepository {
    db: DatabaseConnection,
}

impl SeaOrmTargetRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TargetRepository for SeaOrmTargetRepository {
    async fn pump_target(&self, site: Site, pump: Pump) -> Result<Option<Decimal>, DomainError> {
        let model = pump_targets::Entity::find()
            .filter(pump_targets::Column::Site.eq(site.as_str()))
            .filter(pump_targets::Column::Pump.eq(pump.as_str()))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(|m| m.target))
    }

    async fn shop_target(&self, site: Site) -> Result<Option<Decimal>, DomainError> {
        let model = shop_targets::Entity::find_by_id(site.as_str().to_string())
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(|m| m.target))
    }

    async fn pump_targets(&self) -> Result<Vec<PumpTarget>, DomainError> {
        pump_targets::Entity::find()
            .order_by_asc(pump_targets::Column::Site)
            .order_by_asc(pump_targets::Column::Pump)
            .all(&self.db)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(|m| {
                Ok(PumpTarget {
                    site: decode("pump_targets.site", &m.site)?,
                    pump: decode("pump_targets.pump", &m.pump)?,
                    target: m.target,
                })
            })
            .collect()
    }

    async fn shop_targets(&self) -> Result<Vec<ShopTarget>, DomainError> {
        shop_targets::Entity::find()
            .order_by_asc(shop_targets::Column::Site)
            .all(&self.db)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(|m| {
                Ok(ShopTarget {
                    site: decode("shop_targets.site", &m.site)?,
                    target: m.target,
                })
            })
            .collect()
    }

    async fn set_pump_target(&self, target: &PumpTarget) -> Result<(), DomainError> {
        let active_model = pump_targets::ActiveModel {
            site: Set(target.site.as_str().to_string()),
            pump: Set(target.pump.as_str().to_string()),
            target: Set(target.target),
        };

        // Upsert
        pump_targets::Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([pump_targets::Column::Site, pump_targets::Column::Pump])
                    .update_column(pump_targets::Column::Target)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        tracing::info!(site = %target.site, pump = %target.pump, target = %target.target, "Pump target set");
        Ok(())
    }

    async fn set_shop_target(&self, target: &ShopTarget) -> Result<(), DomainError> {
        let active_model = shop_targets::ActiveModel {
            site: Set(target.site.as_str().to_string()),
            target: Set(target.target),
        };

        shop_targets::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(shop_targets::Column::Site)
                    .update_column(shop_targets::Column::Target)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        tracing::info!(site = %target.site, target = %target.target, "Shop target set");
        Ok(())
    }
}
