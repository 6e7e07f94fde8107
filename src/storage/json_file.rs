use std::{
    fs,
    io::{ErrorKind, Write},
    path::PathBuf,
};

use anyhow::Context;
use serde_json::{Map, Value};

use super::PreferenceStore;

type PreferenceMap = Map<String, Value>;

/// Preferences kept as a single JSON object on disk, the layout Flutter's
/// `shared_preferences` uses on desktop targets (keys carry a `flutter.` prefix).
///
/// The file is read on every access so that writes made by the host app are
/// picked up without a restart.
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
}

impl JsonFilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        tracing::debug!(path = %path.display(), "using JSON preference file");
        Self { path }
    }

    /// Strict read: a missing file is an empty map, anything unreadable is an error.
    fn read_map(&self) -> anyhow::Result<PreferenceMap> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PreferenceMap::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read preferences from {}", self.path.display())
                });
            }
        };
        if raw.trim().is_empty() {
            return Ok(PreferenceMap::new());
        }
        serde_json::from_str(&raw)
            .with_context(|| format!("Malformed preference file {}", self.path.display()))
    }

    /// Lenient read used by lookups: failures degrade to an empty map.
    fn snapshot(&self) -> PreferenceMap {
        match self.read_map() {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "ignoring unreadable preference file");
                PreferenceMap::new()
            }
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "preferences".into());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn write_map(&self, map: &PreferenceMap) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string(map)?;
        let tmp_path = self.tmp_path();
        {
            let mut file = fs::File::create(&tmp_path)
                .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn contains(&self, key: &str) -> bool {
        self.snapshot().contains_key(key)
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.snapshot().remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    #[tracing::instrument(level = "debug", skip(self, value), fields(bytes = value.len()))]
    fn put_string(&self, key: &str, value: &str) -> anyhow::Result<()> {
        // never overwrite a file we could not parse; it belongs to the host app
        let mut map = self.read_map()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)
    }
}
