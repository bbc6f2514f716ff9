//! Battle rules loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle rules from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`BattleConfig`] from a TOML file.
    ///
    /// Missing keys fall back to the compiled defaults, so an empty file is
    /// a valid config.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(
            config.defend_bonus >= 0,
            "defend_bonus must not be negative (got {})",
            config.defend_bonus
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("seed = 42\nvictory_exp = 50\n").unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.victory_exp, 50);
        assert_eq!(config.defend_bonus, BattleConfig::DEFAULT_DEFEND_BONUS);
        assert_eq!(
            config.low_health_threshold,
            BattleConfig::DEFAULT_LOW_HEALTH_THRESHOLD
        );
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), BattleConfig::default());
    }

    #[test]
    fn rejects_negative_defend_bonus() {
        let err = ConfigLoader::parse("defend_bonus = -3").unwrap_err();
        assert!(err.to_string().contains("defend_bonus"));
    }

    #[test]
    fn reports_unreadable_files() {
        let err = ConfigLoader::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
