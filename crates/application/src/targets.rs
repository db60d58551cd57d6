use std::sync::Arc;

use domain::sales::{PumpTarget, ShopTarget, TargetRepository};
use domain::{Actor, Capability, DomainError, Pump, Result, Site};
use rust_decimal::Decimal;
use tracing::info;

/// Daily pump and shop targets, one value per key, overwritten in place.
///
/// Changing a target does not touch stored performance; managers trigger a
/// recompute for that.
pub struct TargetService {
    repository: Arc<dyn TargetRepository>,
}

impl TargetService {
    pub fn new(repository: Arc<dyn TargetRepository>) -> Self {
        Self { repository }
    }

    pub async fn pump_targets(&self) -> Result<Vec<PumpTarget>> {
        self.repository.pump_targets().await
    }

    pub async fn shop_targets(&self) -> Result<Vec<ShopTarget>> {
        self.repository.shop_targets().await
    }

    pub async fn set_pump_target(
        &self,
        actor: &Actor,
        site: Site,
        pump: Pump,
        target: Decimal,
    ) -> Result<PumpTarget> {
        Capability::ManageTargets.require(actor)?;
        ensure_not_negative(target)?;
        let target = PumpTarget { site, pump, target };
        self.repository.set_pump_target(&target).await?;
        info!(%site, %pump, target = %target.target, by = actor.user.id, "🎯 Pump target set");
        Ok(target)
    }

    pub async fn set_shop_target(
        &self,
        actor: &Actor,
        site: Site,
        target: Decimal,
    ) -> Result<ShopTarget> {
        Capability::ManageTargets.require(actor)?;
        ensure_not_negative(target)?;
        let target = ShopTarget { site, target };
        self.repository.set_shop_target(&target).await?;
        info!(%site, target = %target.target, by = actor.user.id, "🎯 Shop target set");
        Ok(target)
    }
}

fn ensure_not_negative(target: Decimal) -> Result<()> {
    if target < Decimal::ZERO {
        return Err(DomainError::validation("Target cannot be negative."));
    }
    Ok(())
}
