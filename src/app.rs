use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{Result, RosterError};
use crate::ingest::{self, IngestReport};
use crate::provider::{self, Provider};
use crate::search::{EngineStatus, SearchEngine};
use crate::storage;

pub struct AppContext {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub config: Config,
    pub output_format: OutputFormat,
    pub verbosity: u8,
    provider: Arc<dyn Provider>,
    engine: OnceLock<Arc<SearchEngine>>,
}

/// Result of ingesting an upload file.
#[derive(Debug, Clone, serde::Serialize)]
pub struct UploadOutcome {
    /// Archived copy of the upload, when archiving is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored: Option<String>,
    pub added: usize,
    pub total: usize,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = Self::find_root()?;
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| default_config_path(&root));
        let config = Config::load(cli.config.as_deref(), &root)?;
        let output_format = resolve_output_format(cli, &config);
        Self::new(root, config_path, config, output_format, cli.verbose)
    }

    pub fn new(
        root: PathBuf,
        config_path: PathBuf,
        config: Config,
        output_format: OutputFormat,
        verbosity: u8,
    ) -> Result<Self> {
        let provider = provider::from_config(&config.provider)?;
        Ok(Self {
            root,
            config_path,
            config,
            output_format,
            verbosity,
            provider,
            engine: OnceLock::new(),
        })
    }

    /// Engine over the snapshot, built on first use (this embeds the roster).
    pub fn engine(&self) -> Result<Arc<SearchEngine>> {
        if let Some(engine) = self.engine.get() {
            return Ok(Arc::clone(engine));
        }
        let profiles = storage::load_snapshot(&self.snapshot_path())?;
        let engine = SearchEngine::new(Arc::clone(&self.provider), profiles)
            .with_max_candidates(self.config.search.max_candidates);
        Ok(Arc::clone(self.engine.get_or_init(|| Arc::new(engine))))
    }

    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.config.snapshot_path(&self.root)
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.config.upload_dir(&self.root)
    }

    pub const fn is_robot(&self) -> bool {
        !matches!(self.output_format, OutputFormat::Human)
    }

    /// Parse, archive, upsert and mirror an upload file.
    ///
    /// Parsing happens before anything is written or merged, so a bad file
    /// leaves both the store and the snapshot untouched.
    pub fn ingest_file(&self, path: &Path) -> Result<UploadOutcome> {
        let format = ingest::UploadFormat::from_path(path)?;
        let raw = std::fs::read(path)?;
        let records = ingest::parse(format, &raw)?;

        let stored = if self.config.data.archive_uploads {
            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| RosterError::InvalidInput(format!("bad upload name {}", path.display())))?;
            let dest = storage::archive_upload(&self.upload_dir(), filename, &raw)?;
            dest.file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
        } else {
            None
        };

        let IngestReport { added, total } = self.ingest_records(records)?;
        Ok(UploadOutcome {
            stored,
            added,
            total,
        })
    }

    /// Upsert records and mirror the collection to the snapshot.
    ///
    /// The snapshot is written before the new collection is swapped in; a
    /// failed write leaves the engine as it was.
    pub fn ingest_records(&self, records: Vec<crate::core::Profile>) -> Result<IngestReport> {
        let engine = self.engine()?;
        if !self.config.data.persist_on_ingest {
            return Ok(engine.ingest(records));
        }
        let path = self.snapshot_path();
        engine.ingest_and_persist(records, |profiles| {
            storage::save_snapshot(&path, profiles)?;
            debug!(path = %path.display(), "snapshot mirrored");
            Ok(())
        })
    }

    /// Rebuild the similarity index. A cold engine is built once, which
    /// already indexes the roster.
    pub fn reindex(&self) -> Result<EngineStatus> {
        match self.engine.get() {
            Some(engine) => Ok(engine.reindex()),
            None => Ok(self.engine()?.status()),
        }
    }

    fn find_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("ROSTER_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let cwd = std::env::current_dir()?;
        if let Some(found) = find_upwards(&cwd, ".roster") {
            return Ok(found);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| RosterError::MissingConfig("data directory not found".to_string()))?;
        Ok(data_dir.join("roster"))
    }
}

/// `--format` wins; otherwise `--robot` or `robot.enabled` select `robot.format`.
fn resolve_output_format(cli: &crate::cli::Cli, config: &Config) -> OutputFormat {
    if cli.format.is_some() || !(cli.robot || config.robot.enabled) {
        return cli.output_format();
    }
    match config.robot.format.as_str() {
        "plain" => OutputFormat::Plain,
        _ => OutputFormat::Json,
    }
}

fn default_config_path(root: &Path) -> PathBuf {
    if root.ends_with(".roster") {
        root.join("config.toml")
    } else {
        dirs::config_dir()
            .unwrap_or_else(|| root.to_path_buf())
            .join("roster/config.toml")
    }
}

fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_dir())
}
