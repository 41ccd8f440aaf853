use crate::error::{OrderDeskError, Result};
use crate::store::DeletePolicy;
use crate::view::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_ID_PREFIX: &str = "#CM";

pub const CONFIG_KEYS: &[&str] = &["page-size", "delete-policy", "prune-selection", "id-prefix"];

/// Configuration for orderdesk, stored in <config dir>/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderDeskConfig {
    /// Rows per page in the orders table
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Whether deleting a pair removes every duplicate or only the first
    #[serde(default)]
    pub delete_policy: DeletePolicy,

    /// Drop selected keys when their orders leave the store
    #[serde(default = "default_true")]
    pub prune_selection: bool,

    /// Prefix for generated order ids
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_true() -> bool {
    true
}

fn default_id_prefix() -> String {
    DEFAULT_ID_PREFIX.to_string()
}

impl Default for OrderDeskConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            delete_policy: DeletePolicy::default(),
            prune_selection: true,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }
}

impl OrderDeskConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(OrderDeskError::Io)?;
        let config: OrderDeskConfig =
            serde_json::from_str(&content).map_err(OrderDeskError::Serialization)?;
        if config.page_size == 0 {
            return Err(OrderDeskError::Config(
                "page_size must be greater than 0".to_string(),
            ));
        }
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(OrderDeskError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content =
            serde_json::to_string_pretty(self).map_err(OrderDeskError::Serialization)?;
        fs::write(config_path, content).map_err(OrderDeskError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "page-size" => Some(self.page_size.to_string()),
            "delete-policy" => Some(self.delete_policy.to_string()),
            "prune-selection" => Some(self.prune_selection.to_string()),
            "id-prefix" => Some(self.id_prefix.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "page-size" => {
                let size: usize = value
                    .parse()
                    .map_err(|_| format!("Invalid page size: {}", value))?;
                if size == 0 {
                    return Err("Page size must be greater than 0".to_string());
                }
                self.page_size = size;
            }
            "delete-policy" => self.delete_policy = value.parse()?,
            "prune-selection" => {
                self.prune_selection = match value.trim().to_lowercase().as_str() {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    _ => return Err(format!("Invalid boolean: {}", value)),
                }
            }
            "id-prefix" => self.id_prefix = value.to_string(),
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = OrderDeskConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.delete_policy, DeletePolicy::AllMatches);
        assert!(config.prune_selection);
        assert_eq!(config.id_prefix, "#CM");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempdir().unwrap();
        let config = OrderDeskConfig::load(dir.path()).unwrap();
        assert_eq!(config, OrderDeskConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested");

        let mut config = OrderDeskConfig::default();
        config.set("page-size", "25").unwrap();
        config.set("delete-policy", "first").unwrap();
        config.save(&nested).unwrap();

        let loaded = OrderDeskConfig::load(&nested).unwrap();
        assert_eq!(loaded.page_size, 25);
        assert_eq!(loaded.delete_policy, DeletePolicy::FirstMatch);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"delete_policy":"first"}"#).unwrap();

        let config = OrderDeskConfig::load(dir.path()).unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.delete_policy, DeletePolicy::FirstMatch);
        assert!(config.prune_selection);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"page_size":0}"#).unwrap();
        assert!(OrderDeskConfig::load(dir.path()).is_err());

        let mut config = OrderDeskConfig::default();
        assert!(config.set("page-size", "0").is_err());
        assert!(config.set("page-size", "many").is_err());
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_get_and_set_every_key() {
        let mut config = OrderDeskConfig::default();
        config.set("prune-selection", "off").unwrap();
        config.set("id-prefix", "#ORD").unwrap();

        assert_eq!(config.get("prune-selection").as_deref(), Some("false"));
        assert_eq!(config.get("id-prefix").as_deref(), Some("#ORD"));
        assert_eq!(config.get("delete-policy").as_deref(), Some("all"));
        for key in CONFIG_KEYS {
            assert!(config.get(key).is_some());
        }
        assert!(config.get("nope").is_none());
        assert!(config.set("nope", "x").is_err());
        assert!(config.set("prune-selection", "maybe").is_err());
    }
}
