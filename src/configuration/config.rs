#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::collections::HashMap;
use std::env;
use std::path;

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

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    AppName,
    AssistantName,
    ConfigFile,
    Conversation,
    ImageDir,
    ProductURL,
    StockOutOfStockMessage,
    StockStatusOutOfStock,
    StockStatusWarning,
    StockWarningMessage,
    Username,
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

    pub fn config_dir() -> path::PathBuf {
        #[cfg(not(target_os = "macos"))]
        let config_dir = dirs::config_dir().unwrap_or_else(env::temp_dir);
        #[cfg(target_os = "macos")]
        let config_dir = dirs::home_dir()
            .unwrap_or_else(env::temp_dir)
            .join(".config");

        return config_dir.join("curator");
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "You".to_string();
            }

            return user;
        }

        let config_path = Config::config_dir().join("config.toml");

        let res = match key {
            ConfigKey::AppName => "Product Recommendation Assistant",
            ConfigKey::AssistantName => "Curator",
            ConfigKey::Conversation => "",
            ConfigKey::ImageDir => "images/products",
            ConfigKey::ProductURL => "https://google.com",
            ConfigKey::StockOutOfStockMessage => {
                "This product is currently out of stock. Please check back later."
            }
            ConfigKey::StockStatusOutOfStock => "out of stock",
            ConfigKey::StockStatusWarning => "low stock",
            ConfigKey::StockWarningMessage => {
                "Only a few left in stock. We recommend ordering soon."
            }

            // Special
            ConfigKey::ConfigFile => return config_path.to_string_lossy().to_string(),
            ConfigKey::Username => "",
        };

        return res.to_string();
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        // Resolved in full before anything is stored, so a failed load leaves the
        // previous values untouched.
        let mut values = ConfigKey::iter()
            .map(|key| return (key, Config::default(key)))
            .collect::<HashMap<ConfigKey, String>>();

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_int) = val.as_integer() {
                        values.insert(key, val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        values.insert(key, val_str.to_string());
                    } else {
                        bail!(format!(
                            "config.toml has an invalid value for key '{key}', expected a string"
                        ));
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
                    values.insert(key, val.to_string());
                }
            }
        }

        for (key, val) in values {
            Config::set(key, &val);
        }

        tracing::debug!(
            app_name = Config::get(ConfigKey::AppName),
            conversation = Config::get(ConfigKey::Conversation),
            image_dir = Config::get(ConfigKey::ImageDir),
            stock_status_warning = Config::get(ConfigKey::StockStatusWarning),
            stock_status_out_of_stock = Config::get(ConfigKey::StockStatusOutOfStock),
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

                if key == ConfigKey::Username {
                    return Some(
                        "# Your name displayed on your own chat bubbles.\n# username = \"\""
                            .to_string(),
                    );
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
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
