//! Gameplay tunables and their TOML loader.
//!
//! Every field has a default, so a config file only needs to name what it changes:
//!
//! ```toml
//! encounter_chance = 25
//! seed = 42
//! ```

use anyhow::{Context, Result, bail};
use log::info;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ECHOES_CONFIG";
/// Config file looked for in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "echoes.toml";

/// Tunable game settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Percent chance (1-100) that entering the forest or cave spawns an enemy.
    pub encounter_chance: u32,
    /// Percent chance (1-100) that an attempt to flee combat succeeds.
    pub flee_chance: u32,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
    /// Room id the player starts in.
    pub start_room: String,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            encounter_chance: 60,
            flee_chance: 70,
            seed: None,
            start_room: "village".to_string(),
        }
    }
}
impl GameConfig {
    /// Load the config named by `ECHOES_CONFIG`, else `echoes.toml` in the working
    /// directory, else the defaults.
    ///
    /// # Errors
    /// - if `ECHOES_CONFIG` names a file that cannot be read
    /// - if the chosen file cannot be parsed
    pub fn load() -> Result<GameConfig> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_from(&PathBuf::from(path)),
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.is_file() {
                    Self::load_from(local)
                } else {
                    info!("no config file found, using default settings");
                    Ok(GameConfig::default())
                }
            },
        }
    }

    /// Load settings from a specific TOML file.
    ///
    /// # Errors
    /// - if the file cannot be read or parsed, or holds out-of-range chances
    pub fn load_from(path: &Path) -> Result<GameConfig> {
        let text = fs::read_to_string(path).with_context(|| format!("reading config from '{}'", path.display()))?;
        let config = Self::parse(&text).with_context(|| format!("parsing config from '{}'", path.display()))?;
        info!("game settings loaded from '{}': {config:?}", path.display());
        Ok(config)
    }

    /// Parse settings from TOML text.
    ///
    /// # Errors
    /// - on malformed TOML, unknown keys, or a chance above 100
    pub fn parse(text: &str) -> Result<GameConfig> {
        let config: GameConfig = toml::from_str(text)?;
        for (key, value) in [
            ("encounter_chance", config.encounter_chance),
            ("flee_chance", config.flee_chance),
        ] {
            if value > 100 {
                bail!("{key} must be between 0 and 100 (got {value})");
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(GameConfig::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let config = GameConfig::parse("encounter_chance = 25\nseed = 7\n").unwrap();
        assert_eq!(config.encounter_chance, 25);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.flee_chance, 70);
        assert_eq!(config.start_room, "village");
    }

    #[test]
    fn out_of_range_chance_is_rejected() {
        let err = GameConfig::parse("flee_chance = 150").unwrap_err();
        assert!(err.to_string().contains("flee_chance"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(GameConfig::parse("encounter_chanse = 10").is_err());
    }

    #[test]
    fn load_from_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "start_room = \"temple\"").unwrap();
        writeln!(file, "flee_chance = 100").unwrap();
        let config = GameConfig::load_from(file.path()).unwrap();
        assert_eq!(config.start_room, "temple");
        assert_eq!(config.flee_chance, 100);
    }

    #[test]
    fn load_from_reports_path_on_parse_failure() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "seed = \"not a number\"").unwrap();
        let err = GameConfig::load_from(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains(&file.path().display().to_string()));
    }

    #[test]
    fn load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GameConfig::load_from(&dir.path().join("absent.toml")).is_err());
    }
}
