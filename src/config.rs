use std::{collections::HashMap, path::PathBuf};

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub struct ModstartConfig {
    pub home_dir: Option<PathBuf>,
    pub base_dir: Option<PathBuf>,
}

impl ModstartConfig {
    pub fn load() -> anyhow::Result<Self> {
        let raw_config = RawConfig::load(None)?;

        Ok(Self {
            home_dir: raw_config.home.dir,
            base_dir: raw_config.base.dir,
        })
    }
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct RawConfig {
    #[serde(default)]
    home: DirConfig,
    #[serde(default)]
    base: DirConfig,
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct DirConfig {
    dir: Option<PathBuf>,
}

impl RawConfig {
    fn load(env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                Environment::with_prefix("MODSTART")
                    .separator("_")
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn load_empty() {
        let env = HashMap::from([]);
        let config = RawConfig::load(Some(env)).unwrap();
        assert_eq!(
            config,
            RawConfig {
                home: DirConfig { dir: None },
                base: DirConfig { dir: None }
            }
        )
    }

    #[test]
    fn load_environment() {
        let env = HashMap::from([
            ("MODSTART_HOME_DIR".to_owned(), "/srv/server".to_owned()),
            ("MODSTART_BASE_DIR".to_owned(), "/srv/overrides".to_owned()),
        ]);
        let config = RawConfig::load(Some(env)).unwrap();
        assert_eq!(
            config,
            RawConfig {
                home: DirConfig {
                    dir: Some("/srv/server".into())
                },
                base: DirConfig {
                    dir: Some("/srv/overrides".into())
                }
            }
        )
    }
}
