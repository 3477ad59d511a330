#[cfg(test)]
#[path = "dashboards_test.rs"]
mod tests;

use anyhow::Result;

use super::Storage;
use super::StorageKey;
use crate::domain::models::Dashboard;

/// The saved dashboard set, keyed by id. Read once at construction, written
/// through on save and delete.
pub struct DashboardStore {
    storage: Storage,
    dashboards: Vec<Dashboard>,
}

impl DashboardStore {
    pub async fn load(storage: Storage) -> Result<DashboardStore> {
        let dashboards = storage.read(StorageKey::Dashboards).await?;
        return Ok(DashboardStore {
            storage,
            dashboards: dashboards.unwrap_or_default(),
        });
    }

    pub fn list(&self) -> &[Dashboard] {
        return &self.dashboards;
    }

    pub fn get(&self, id: &str) -> Option<&Dashboard> {
        return self.dashboards.iter().find(|e| return e.id == id);
    }

    pub async fn save(&mut self, dashboard: Dashboard) -> Result<String> {
        let id = dashboard.id.to_string();
        self.dashboards.push(dashboard);
        self.storage
            .write(StorageKey::Dashboards, &self.dashboards)
            .await?;

        return Ok(id);
    }

    pub async fn delete(&mut self, id: &str) -> Result<bool> {
        let count = self.dashboards.len();
        self.dashboards.retain(|e| return e.id != id);
        if self.dashboards.len() == count {
            return Ok(false);
        }

        self.storage
            .write(StorageKey::Dashboards, &self.dashboards)
            .await?;

        return Ok(true);
    }
}
