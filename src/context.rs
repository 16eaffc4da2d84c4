// File: ./src/context.rs
/*! Filesystem locations for config, data and logs.

`AppContext` encapsulates how the application determines its
data/config/cache directories. Two concrete implementations:

- `StandardContext`: uses `directories::ProjectDirs`, or an override root
  passed with `--root`.
- `TestContext`: a temporary directory for isolated tests, removed on drop.

Anything that touches the filesystem takes an explicit `&dyn AppContext` or
`Arc<dyn AppContext>`; there are no environment-variable path helpers.
*/

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub const LOG_FILENAME: &str = "syllabus-radar.log";

/// Where config, data and cache files live. Object safe.
pub trait AppContext: Send + Sync + std::fmt::Debug {
    fn get_data_dir(&self) -> Result<PathBuf>;
    fn get_config_dir(&self) -> Result<PathBuf>;
    fn get_cache_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join("config.toml"))
    }

    /// Documents, events and accounts.
    fn get_store_path(&self) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join("store.json"))
    }

    fn get_session_path(&self) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join("session.json"))
    }

    fn get_log_path(&self) -> Option<PathBuf> {
        self.get_cache_dir().ok().map(|p| p.join(LOG_FILENAME))
    }
}

// --- Production Implementation ---

#[derive(Clone, Debug)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    /// When `override_root` is `Some(path)`, all directories are created under
    /// that root as `data`, `config` and `cache`.
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }

    fn ensure_exists(path: PathBuf) -> Result<PathBuf> {
        if !path.exists() {
            std::fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(path)
    }

    fn get_proj_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "syllabus-radar", "syllabus-radar")
    }

    fn resolve(&self, sub: &str, pick: fn(&ProjectDirs) -> PathBuf) -> Result<PathBuf> {
        if let Some(root) = &self.override_root {
            return Self::ensure_exists(root.join(sub));
        }
        let proj = Self::get_proj_dirs().ok_or_else(|| anyhow::anyhow!("No home directory"))?;
        Self::ensure_exists(pick(&proj))
    }
}

impl AppContext for StandardContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        self.resolve("data", |p| p.data_dir().to_path_buf())
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.resolve("config", |p| p.config_dir().to_path_buf())
    }

    fn get_cache_dir(&self) -> Result<PathBuf> {
        self.resolve("cache", |p| p.cache_dir().to_path_buf())
    }
}

// --- Test Implementation ---

/// Throwaway root under the system temp dir; deleted when dropped.
#[derive(Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!(
            "syllabus_radar_test_{}",
            uuid::Uuid::new_v4().simple()
        ));
        std::fs::create_dir_all(&root).expect("temp dir for TestContext");
        Self { root }
    }

    fn subdir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.root.join(name);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        self.subdir("data")
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.subdir("config")
    }

    fn get_cache_dir(&self) -> Result<PathBuf> {
        self.subdir("cache")
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
