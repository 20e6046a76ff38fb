//! Rule configuration loader.

use std::path::Path;

use conquest_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rule configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`GameConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.territories_per_bonus_troop == 0 {
            anyhow::bail!("territories_per_bonus_troop must be positive");
        }

        Ok(config)
    }
}
