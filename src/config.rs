use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub robot: RobotConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("ROSTER_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Snapshot file, defaulting to `<root>/employees.json`.
    pub fn snapshot_path(&self, root: &Path) -> PathBuf {
        self.data
            .snapshot_path
            .clone()
            .unwrap_or_else(|| root.join("employees.json"))
    }

    /// Upload archive directory, defaulting to `<root>/uploads`.
    pub fn upload_dir(&self, root: &Path) -> PathBuf {
        self.data
            .upload_dir
            .clone()
            .unwrap_or_else(|| root.join("uploads"))
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("roster/config.toml"))
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        let path = root.join("config.toml");
        Self::load_patch(&path)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| RosterError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| RosterError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.provider {
            self.provider.merge(patch);
        }
        if let Some(patch) = patch.data {
            self.data.merge(patch);
        }
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.robot {
            self.robot.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_bool("ROSTER_ROBOT") {
            self.robot.enabled = value;
        }

        // Names shared with the reference deployment scripts.
        if let Some(value) = env_string("OLLAMA_BASE") {
            self.provider.base_url = value;
        }
        if let Some(value) = env_string("EMBED_MODEL") {
            self.provider.embed_model = value;
        }
        if let Some(value) = env_string("LLM_MODEL") {
            self.provider.llm_model = value;
        }
        if let Some(value) = env_string("DATA_PATH") {
            self.data.snapshot_path = Some(PathBuf::from(value));
        }
        if let Some(value) = env_string("UPLOAD_DIR") {
            self.data.upload_dir = Some(PathBuf::from(value));
        }

        if let Some(value) = env_bool("ROSTER_PROVIDER_ENABLED") {
            self.provider.enabled = value;
        }
        if let Some(value) = env_f32("ROSTER_TEMPERATURE")? {
            self.provider.temperature = value;
        }
        if let Some(value) = env_u64("ROSTER_EMBED_TIMEOUT_SECS")? {
            self.provider.embed_timeout_secs = value;
        }
        if let Some(value) = env_u64("ROSTER_CHAT_TIMEOUT_SECS")? {
            self.provider.chat_timeout_secs = value;
        }
        if let Some(value) = env_u64("ROSTER_HEALTH_TIMEOUT_SECS")? {
            self.provider.health_timeout_secs = value;
        }

        if let Some(value) = env_bool("ROSTER_PERSIST_ON_INGEST") {
            self.data.persist_on_ingest = value;
        }
        if let Some(value) = env_bool("ROSTER_ARCHIVE_UPLOADS") {
            self.data.archive_uploads = value;
        }

        if let Some(value) = env_usize("ROSTER_DEFAULT_K")? {
            self.search.default_k = value;
        }
        if let Some(value) = env_usize("ROSTER_MAX_CANDIDATES")? {
            self.search.max_candidates = value;
        }

        if let Some(value) = env_string("ROSTER_ROBOT_FORMAT") {
            self.robot.format = value;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub enabled: bool,
    pub base_url: String,
    pub embed_model: String,
    pub llm_model: String,
    pub temperature: f32,
    pub embed_timeout_secs: u64,
    pub chat_timeout_secs: u64,
    pub health_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://localhost:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            llm_model: "llama3.1:8b".to_string(),
            temperature: 0.3,
            embed_timeout_secs: 120,
            chat_timeout_secs: 120,
            health_timeout_secs: 2,
        }
    }
}

impl ProviderConfig {
    fn merge(&mut self, patch: ProviderPatch) {
        if let Some(value) = patch.enabled {
            self.enabled = value;
        }
        if let Some(value) = patch.base_url {
            self.base_url = value;
        }
        if let Some(value) = patch.embed_model {
            self.embed_model = value;
        }
        if let Some(value) = patch.llm_model {
            self.llm_model = value;
        }
        if let Some(value) = patch.temperature {
            self.temperature = value;
        }
        if let Some(value) = patch.embed_timeout_secs {
            self.embed_timeout_secs = value;
        }
        if let Some(value) = patch.chat_timeout_secs {
            self.chat_timeout_secs = value;
        }
        if let Some(value) = patch.health_timeout_secs {
            self.health_timeout_secs = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub snapshot_path: Option<PathBuf>,
    pub upload_dir: Option<PathBuf>,
    pub persist_on_ingest: bool,
    pub archive_uploads: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            upload_dir: None,
            persist_on_ingest: true,
            archive_uploads: true,
        }
    }
}

impl DataConfig {
    fn merge(&mut self, patch: DataPatch) {
        if let Some(value) = patch.snapshot_path {
            self.snapshot_path = Some(value);
        }
        if let Some(value) = patch.upload_dir {
            self.upload_dir = Some(value);
        }
        if let Some(value) = patch.persist_on_ingest {
            self.persist_on_ingest = value;
        }
        if let Some(value) = patch.archive_uploads {
            self.archive_uploads = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_k: usize,
    /// Cap on candidates handed to the answer composer.
    pub max_candidates: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_k: 5,
            max_candidates: 5,
        }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.default_k {
            self.default_k = value;
        }
        if let Some(value) = patch.max_candidates {
            self.max_candidates = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Robot output without `--robot`.
    pub enabled: bool,
    /// Robot output format: `json` or `plain`.
    pub format: String,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            format: "json".to_string(),
        }
    }
}

impl RobotConfig {
    fn merge(&mut self, patch: RobotPatch) {
        if let Some(value) = patch.enabled {
            self.enabled = value;
        }
        if let Some(value) = patch.format {
            self.format = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub provider: Option<ProviderPatch>,
    pub data: Option<DataPatch>,
    pub search: Option<SearchPatch>,
    pub robot: Option<RobotPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ProviderPatch {
    pub enabled: Option<bool>,
    pub base_url: Option<String>,
    pub embed_model: Option<String>,
    pub llm_model: Option<String>,
    pub temperature: Option<f32>,
    pub embed_timeout_secs: Option<u64>,
    pub chat_timeout_secs: Option<u64>,
    pub health_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DataPatch {
    pub snapshot_path: Option<PathBuf>,
    pub upload_dir: Option<PathBuf>,
    pub persist_on_ingest: Option<bool>,
    pub archive_uploads: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub default_k: Option<usize>,
    pub max_candidates: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RobotPatch {
    pub enabled: Option<bool>,
    pub format: Option<String>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<u64>().map(Some).map_err(|err| {
            RosterError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<usize>().map(Some).map_err(|err| {
            RosterError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_f32(key: &str) -> Result<Option<f32>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<f32>().map(Some).map_err(|err| {
            RosterError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}
