//! Household configuration: family members and the shared meal calendar.
//!
//! These are read-only inputs to the aggregation. famboard never writes
//! them back during a request; editing the config file is up to whoever
//! administers the household.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FamBoardError, FamBoardResult};

/// One family member and their personal calendar feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyMember {
    pub name: String,
    /// Display color used by the presentation layer.
    pub color: String,
    #[serde(default)]
    pub calendar_url: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// The shared meal-planning calendar feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealCalendar {
    pub calendar_url: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Configuration stored at ~/.config/famboard/config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HouseholdConfig {
    #[serde(default)]
    pub members: Vec<FamilyMember>,
    pub meal_calendar: Option<MealCalendar>,
}

impl HouseholdConfig {
    pub fn config_path() -> FamBoardResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FamBoardError::Config("Could not determine config directory".into()))?
            .join("famboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, or defaults when it does not exist yet.
    pub fn load() -> FamBoardResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> FamBoardResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: HouseholdConfig =
                toml::from_str(&content).map_err(|e| FamBoardError::Config(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the config file, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> FamBoardResult<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| FamBoardError::Serialization(e.to_string()))?;

        std::fs::write(path, content)?;

        Ok(())
    }
}

/// Read side of the household configuration, as the aggregator sees it.
pub trait HouseholdStore {
    fn family_members(&self) -> FamBoardResult<Vec<FamilyMember>>;
    fn meal_calendar(&self) -> FamBoardResult<Option<MealCalendar>>;
}

/// Store backed by the config file.
///
/// Re-reads the file on every call so edits are picked up without
/// restarting the server.
#[derive(Debug, Clone)]
pub struct ConfigFileStore {
    path: PathBuf,
}

impl ConfigFileStore {
    pub fn new() -> FamBoardResult<Self> {
        Ok(ConfigFileStore {
            path: HouseholdConfig::config_path()?,
        })
    }

    /// Store reading from an explicit path instead of the default location.
    pub fn at(path: PathBuf) -> Self {
        ConfigFileStore { path }
    }
}

impl HouseholdStore for ConfigFileStore {
    fn family_members(&self) -> FamBoardResult<Vec<FamilyMember>> {
        Ok(HouseholdConfig::load_from(&self.path)?.members)
    }

    fn meal_calendar(&self) -> FamBoardResult<Option<MealCalendar>> {
        Ok(HouseholdConfig::load_from(&self.path)?.meal_calendar)
    }
}
