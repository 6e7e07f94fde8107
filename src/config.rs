use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub preferences_path: PathBuf,
    pub bind_addr: String,
    /// Amount the -/+ row buttons move progress by
    pub progress_step: i32,
}

const DEFAULT_PREFERENCES_PATH: &str = "shared_preferences.json";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_PROGRESS_STEP: i32 = 5;

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let preferences_path = std::env::var("PREFERENCES_PATH")
            .unwrap_or(DEFAULT_PREFERENCES_PATH.into());
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or(DEFAULT_BIND_ADDR.into());
        let progress_step = match std::env::var("PROGRESS_STEP") {
            Ok(raw) => raw
                .trim()
                .parse::<i32>()
                .with_context(|| format!("Invalid PROGRESS_STEP: {}", raw))?,
            Err(_) => DEFAULT_PROGRESS_STEP,
        };
        Ok(Config {
            preferences_path: PathBuf::from(preferences_path),
            bind_addr,
            progress_step,
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.preferences_path.as_os_str().is_empty() {
            return Err("PREFERENCES_PATH is empty".into());
        }
        if self.bind_addr.trim().is_empty() {
            return Err("BIND_ADDR is empty".into());
        }
        if !(1..=100).contains(&self.progress_step) {
            return Err(format!(
                "PROGRESS_STEP must be between 1 and 100, got {}",
                self.progress_step
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            preferences_path: PathBuf::from(DEFAULT_PREFERENCES_PATH),
            bind_addr: DEFAULT_BIND_ADDR.into(),
            progress_step: DEFAULT_PROGRESS_STEP,
        }
    }
}
