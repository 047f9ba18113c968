#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;
use std::time::Duration;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::ArmName;
use crate::infrastructure::terminals::DEFAULT_BAUD;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    Arm,
    ConfigFile,
    ExitAllowed,
    IdleTimeout,
    InfoTimeout,
    MinitelBaud,
    MinitelDevice,
    MotionDelayMs,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn get_bool(key: ConfigKey) -> bool {
        return matches!(Config::get(key).as_str(), "true" | "1" | "yes");
    }

    pub fn get_u64(key: ConfigKey) -> Result<u64> {
        let val = Config::get(key);
        return val
            .parse::<u64>()
            .map_err(|err| anyhow!("invalid value for '{key}': '{val}' ({err})"));
    }

    pub fn get_duration_secs(key: ConfigKey) -> Result<Duration> {
        return Ok(Duration::from_secs(Config::get_u64(key)?));
    }

    pub fn default(key: ConfigKey) -> String {
        let default_arm = ArmName::default().to_string();
        let config_path = dirs::config_dir()
            .map(|dir| dir.join("youpi2-minitel/config.toml"))
            .unwrap_or_default();

        let res = match key {
            ConfigKey::Arm => default_arm,
            ConfigKey::ExitAllowed => "false".to_string(),
            ConfigKey::IdleTimeout => "60".to_string(),
            ConfigKey::InfoTimeout => "300".to_string(),
            ConfigKey::MinitelBaud => DEFAULT_BAUD.to_string(),
            ConfigKey::MinitelDevice => "/dev/ttyUSB0".to_string(),
            ConfigKey::MotionDelayMs => "0".to_string(),

            // Special
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
        };

        return res;
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.is_file() {
            let toml_str = fs::read_to_string(&config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let mut possible_values = vec![];
                    if let Some(arg) = cmd
                        .get_arguments()
                        .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    {
                        possible_values = arg
                            .get_possible_values()
                            .iter()
                            .map(|e| return e.get_name().to_string())
                            .collect::<Vec<String>>();
                    }

                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_bool) = val.as_bool() {
                        Config::set(key, &val_bool.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::set(key, val_str);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                } else if let Ok(Some(true)) = matches.try_get_one::<bool>(&key.to_string()) {
                    Config::set(key, "true")
                }
            }
        }

        tracing::debug!(
            minitel_device = Config::get(ConfigKey::MinitelDevice),
            minitel_baud = Config::get(ConfigKey::MinitelBaud),
            exit_allowed = Config::get(ConfigKey::ExitAllowed),
            arm = Config::get(ConfigKey::Arm),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg.get_help()?.to_string();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() || val.parse::<bool>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
