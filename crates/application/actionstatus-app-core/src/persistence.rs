use crate::domain::AppSettings;
use crate::ports::RepoStore;
use actionstatus_core::Repo;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const QUALIFIER: &str = "com";
const ORG: &str = "actionstatus";
const APP: &str = "monitor";

const REPOS_FILE: &str = "repos.json";
const SETTINGS_FILE: &str = "settings.json";

/// JSON files in the per-user config directory, or in an explicit one.
pub struct FilePersistence {
    root: Option<PathBuf>,
}

impl Default for FilePersistence {
    fn default() -> Self {
        Self::new()
    }
}

impl FilePersistence {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn at(dir: impl AsRef<Utf8Path>) -> Self {
        Self {
            root: Some(dir.as_ref().as_std_path().to_path_buf()),
        }
    }

    fn config_dir(&self) -> Result<PathBuf> {
        let dir = match &self.root {
            Some(root) => root.clone(),
            None => ProjectDirs::from(QUALIFIER, ORG, APP)
                .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
                .config_dir()
                .to_path_buf(),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        Ok(dir)
    }

    pub fn repos_path(&self) -> Result<Utf8PathBuf> {
        to_utf8(self.config_dir()?.join(REPOS_FILE))
    }

    pub fn settings_path(&self) -> Result<Utf8PathBuf> {
        to_utf8(self.config_dir()?.join(SETTINGS_FILE))
    }

    pub fn load_repos(&self) -> Result<Vec<Repo>> {
        read_json_or_default(&self.config_dir()?.join(REPOS_FILE))
            .context("Failed to read repositories")
    }

    pub fn save_repos(&self, repos: &[Repo]) -> Result<()> {
        write_json(&self.config_dir()?.join(REPOS_FILE), &repos)
            .context("Failed to write repositories")
    }

    pub fn load_settings(&self) -> Result<AppSettings> {
        read_json_or_default(&self.config_dir()?.join(SETTINGS_FILE))
            .context("Failed to read settings")
    }

    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        write_json(&self.config_dir()?.join(SETTINGS_FILE), settings)
            .context("Failed to write settings")
    }
}

impl RepoStore for FilePersistence {
    fn load(&self) -> Result<Vec<Repo>> {
        self.load_repos()
    }

    fn save(&self, repos: &[Repo]) -> Result<()> {
        self.save_repos(repos)
    }
}

fn to_utf8(path: PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|p| anyhow::anyhow!("Path is not valid UTF-8: {}", p.display()))
}

fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Writes to a temp file beside `path` and renames it into place, so readers
/// see either the old or the new contents.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let dir = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("{} has no parent directory", path.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    if let Ok(d) = fs::File::open(dir) {
        let _ = d.sync_all();
    }
    debug!("Wrote {}", path.display());
    Ok(())
}
