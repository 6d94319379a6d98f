use std::sync::Arc;

use anyhow::Result;
use famboard_core::WeekPlanner;
use famboard_core::household::{ConfigFileStore, HouseholdConfig};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // The store re-reads the config file on each request, so household
    // edits are picked up without restarting
    planner: Arc<WeekPlanner<ConfigFileStore>>,
}

impl AppState {
    pub fn new() -> Result<Self> {
        // Verify the household config can be loaded at startup
        let _ = HouseholdConfig::load()?;

        let store = ConfigFileStore::new()?;
        Ok(AppState {
            planner: Arc::new(WeekPlanner::new(store)),
        })
    }

    pub fn planner(&self) -> &WeekPlanner<ConfigFileStore> {
        &self.planner
    }
}
