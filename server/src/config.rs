use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use menu::model::MENU_ENDPOINT;
use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub menu_url: String,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "1111"),
            menu_url: try_load("MENU_URL", MENU_ENDPOINT),
            data_dir: try_load("MENU_DATA_DIR", "."),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
