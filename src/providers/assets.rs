use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ElectricVehicle, HomeBattery, SolarConfig};

/// Asset collaborator: read-only access to the user's configured EVs,
/// batteries and solar system. The core never mutates assets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetProvider: Send + Sync {
    async fn list_evs(&self, user_id: Uuid) -> Result<Vec<ElectricVehicle>>;
    async fn list_batteries(&self, user_id: Uuid) -> Result<Vec<HomeBattery>>;
    async fn solar_config(&self, user_id: Uuid) -> Result<Option<SolarConfig>>;
}

/// In-memory asset store for the demo binary and integration tests.
#[cfg(feature = "sim")]
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssetProvider {
    pub evs: Vec<ElectricVehicle>,
    pub batteries: Vec<HomeBattery>,
    pub solar: Option<SolarConfig>,
}

#[cfg(feature = "sim")]
#[async_trait]
impl AssetProvider for InMemoryAssetProvider {
    async fn list_evs(&self, _user_id: Uuid) -> Result<Vec<ElectricVehicle>> {
        Ok(self.evs.clone())
    }

    async fn list_batteries(&self, _user_id: Uuid) -> Result<Vec<HomeBattery>> {
        Ok(self.batteries.clone())
    }

    async fn solar_config(&self, _user_id: Uuid) -> Result<Option<SolarConfig>> {
        Ok(self.solar.clone())
    }
}
