//! Cleanup configuration: which roots belong to which category.
//!
//! The built-in table can be replaced by a JSON file of the form
//!
//! ```json
//! {
//!   "cleanup_paths": {
//!     "temp_files": ["/tmp", "~/Downloads"],
//!     "log_files": ["/var/log"],
//!     "cache_files": ["~/.cache/thumbnails"]
//!   }
//! }
//! ```
//!
//! Categories missing from the file keep their defaults. A leading `~` is
//! expanded to the current user's home directory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::cli::normalize_path;
use crate::error::{CleanError, Result};

/// One group of roots swept with its own extension list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Temp,
    Log,
    Cache,
}

impl Category {
    /// Processing order of a run.
    pub const ALL: [Category; 3] = [Category::Temp, Category::Log, Category::Cache];

    /// Key of this category under `cleanup_paths` in the configuration file.
    pub fn config_key(self) -> &'static str {
        match self {
            Category::Temp => "temp_files",
            Category::Log => "log_files",
            Category::Cache => "cache_files",
        }
    }

    /// File name suffixes targeted in this category.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Category::Temp => &[".tmp", ".temp", ".swp", ".bak", ".old"],
            Category::Log => &[".log", ".log.1", ".log.gz"],
            Category::Cache => &[".cache"],
        }
    }

    /// Whether empty directories under this category's roots are pruned.
    pub fn prunes_empty_dirs(self) -> bool {
        matches!(self, Category::Temp | Category::Cache)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Temp => "temporary",
            Category::Log => "log",
            Category::Cache => "cache",
        };
        f.write_str(label)
    }
}

/// Roots for every category, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupPaths {
    temp_files: Vec<PathBuf>,
    log_files: Vec<PathBuf>,
    cache_files: Vec<PathBuf>,
}

impl Default for CleanupPaths {
    fn default() -> Self {
        Self {
            temp_files: expand_all(["/tmp", "/var/tmp", "~/.cache", "~/Downloads"]),
            log_files: expand_all(["/var/log"]),
            cache_files: expand_all([
                "~/.cache/thumbnails",
                "~/.cache/mozilla",
                "~/.cache/google-chrome",
            ]),
        }
    }
}

impl CleanupPaths {
    pub fn new(temp_files: Vec<PathBuf>, log_files: Vec<PathBuf>, cache_files: Vec<PathBuf>) -> Self {
        Self {
            temp_files,
            log_files,
            cache_files,
        }
    }

    pub fn roots(&self, category: Category) -> &[PathBuf] {
        match category {
            Category::Temp => &self.temp_files,
            Category::Log => &self.log_files,
            Category::Cache => &self.cache_files,
        }
    }

    /// Make every root absolute so it compares equal to normalized exclusion
    /// paths.
    pub(crate) fn absolutize(self) -> Self {
        let absolute = |roots: Vec<PathBuf>| roots.into_iter().map(normalize_path).collect();
        Self {
            temp_files: absolute(self.temp_files),
            log_files: absolute(self.log_files),
            cache_files: absolute(self.cache_files),
        }
    }

    /// Roots whose empty directories are pruned after deletion: temp first,
    /// then cache.
    pub fn prune_roots(&self) -> Vec<PathBuf> {
        Category::ALL
            .into_iter()
            .filter(|category| category.prunes_empty_dirs())
            .flat_map(|category| self.roots(category).iter().cloned())
            .collect()
    }

    /// Parse a configuration document, filling missing categories from the
    /// defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let file: ConfigFile = serde_json::from_str(json)?;
        let defaults = Self::default();

        let Some(paths) = file.cleanup_paths else {
            return Ok(defaults);
        };

        let pick = |configured: Option<Vec<String>>, default: Vec<PathBuf>| {
            configured.map(expand_all).unwrap_or(default)
        };

        Ok(Self {
            temp_files: pick(paths.temp_files, defaults.temp_files),
            log_files: pick(paths.log_files, defaults.log_files),
            cache_files: pick(paths.cache_files, defaults.cache_files),
        })
    }

    /// Read and parse the configuration file at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CleanError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&json).map_err(|source| CleanError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, falling back to the defaults on any failure.
    ///
    /// A missing file is a warning, an unreadable or malformed one an error;
    /// neither stops the run.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            warn!(
                "Configuration file not found: {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(paths) => {
                info!("Loaded custom configuration from {}", path.display());
                paths
            }
            Err(err) => {
                let cause = match &err {
                    CleanError::ConfigParse { source, .. } => source.to_string(),
                    CleanError::ConfigRead { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                error!("{err}: {cause}");
                Self::default()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    cleanup_paths: Option<PathTable>,
}

#[derive(Debug, Deserialize)]
struct PathTable {
    temp_files: Option<Vec<String>>,
    log_files: Option<Vec<String>>,
    cache_files: Option<Vec<String>>,
}

fn expand_all<I, S>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths.into_iter().map(|p| expand_home(p.as_ref())).collect()
}

/// Expand a leading `~` or `~/` to the home directory. Paths are returned
/// unchanged when the home directory is unknown.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, home::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
