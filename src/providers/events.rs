use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::GridEvent;

/// Event collaborator: grid events (demand response, price spikes) active
/// for a user on a given date.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GridEventProvider: Send + Sync {
    async fn active_events(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<GridEvent>>;
}

/// In-memory event source for the demo binary and integration tests.
#[cfg(feature = "sim")]
#[derive(Debug, Clone, Default)]
pub struct InMemoryGridEventProvider {
    pub events: Vec<GridEvent>,
}

#[cfg(feature = "sim")]
#[async_trait]
impl GridEventProvider for InMemoryGridEventProvider {
    async fn active_events(&self, _user_id: Uuid, _date: NaiveDate) -> Result<Vec<GridEvent>> {
        Ok(self.events.clone())
    }
}
