use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use checknote_export::footer::FooterContext;
use checknote_session::session::SessionConfig;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

fn default_advance_delay_ms() -> u64 {
    100
}

fn default_toast_duration_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckNoteConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub created_at: jiff::Timestamp,
    /// Alternative question specification. The built-in checklist is used
    /// when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions_path: Option<PathBuf>,
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
    /// Added in v1; older configs get the default footer names.
    pub provider_name: String,
    pub supervising_physician: String,
    /// Where session state and the log file live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for CheckNoteConfig {
    fn default() -> Self {
        let footer = FooterContext::default();
        Self {
            config_version: CURRENT_VERSION,
            created_at: jiff::Timestamp::now(),
            questions_path: None,
            advance_delay_ms: default_advance_delay_ms(),
            toast_duration_ms: default_toast_duration_ms(),
            provider_name: footer.provider_name,
            supervising_physician: footer.supervising_physician,
            data_dir: None,
        }
    }
}

impl CheckNoteConfig {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            advance_delay: Duration::from_millis(self.advance_delay_ms),
            toast_duration: Duration::from_millis(self.toast_duration_ms),
        }
    }

    pub fn footer_context(&self) -> FooterContext {
        FooterContext {
            provider_name: self.provider_name.clone(),
            supervising_physician: self.supervising_physician.clone(),
        }
    }

    pub fn data_dir(&self) -> eyre::Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
        Ok(base.join("checknote"))
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("checknote"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn load_config(path: &Path) -> eyre::Result<CheckNoteConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: CheckNoteConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Load the config at `path`, writing the defaults there first if the
/// file does not exist yet.
pub fn load_or_init(path: &Path) -> eyre::Result<CheckNoteConfig> {
    if path.exists() {
        return load_config(path);
    }
    let config = CheckNoteConfig::default();
    save_config(path, &config)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update Checknote."
        ));
    }

    // v0 → v1: footer names became configurable
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        let footer = FooterContext::default();
        obj.entry("provider_name")
            .or_insert(serde_json::Value::String(footer.provider_name));
        obj.entry("supervising_physician")
            .or_insert(serde_json::Value::String(footer.supervising_physician));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added footer names)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &CheckNoteConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
