//! Scaffolding configuration loaded from `crudsmith.toml`.
//!
//! The file sits in the project root the artifacts are written into (or is
//! passed with `--config`). Every key is optional:
//!
//! ```toml
//! default_group = "DataEntry"
//! route = "api"
//! force = false
//!
//! [namespaces]
//! model = "App\\Models"
//!
//! [paths]
//! model = "app/Models"
//! ```

use crate::generator::RouteFile;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// File name looked up in the output directory.
pub const CONFIG_FILE_NAME: &str = "crudsmith.toml";

/// PHP namespaces of the generated classes. Group sub-namespaces are appended
/// for controllers, requests, resources and enums.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Namespaces {
    pub model: String,
    pub controller: String,
    pub request: String,
    pub resource: String,
    #[serde(rename = "enum")]
    pub enumeration: String,
    pub seeder: String,
}

impl Default for Namespaces {
    fn default() -> Self {
        Namespaces {
            model: "App\\Models".into(),
            controller: "App\\Http\\Controllers\\API".into(),
            request: "App\\Http\\Requests".into(),
            resource: "App\\Http\\Resources".into(),
            enumeration: "App\\Enums".into(),
            seeder: "Database\\Seeders".into(),
        }
    }
}

/// Output directories, relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Paths {
    pub model: PathBuf,
    pub controller: PathBuf,
    pub request: PathBuf,
    pub resource: PathBuf,
    #[serde(rename = "enum")]
    pub enumeration: PathBuf,
    pub migration: PathBuf,
    pub seeder: PathBuf,
    pub routes: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            model: "app/Models".into(),
            controller: "app/Http/Controllers/API".into(),
            request: "app/Http/Requests".into(),
            resource: "app/Http/Resources".into(),
            enumeration: "app/Enums".into(),
            migration: "database/migrations".into(),
            seeder: "database/seeders".into(),
            routes: "routes".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Group used when `--group` is not given
    pub default_group: String,
    /// Route file used when `--route` is not given
    pub route: RouteFile,
    /// Overwrite existing files (OR-ed with `--force`)
    pub force: bool,
    pub namespaces: Namespaces,
    pub paths: Paths,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        ScaffoldConfig {
            default_group: "DataEntry".into(),
            route: RouteFile::Api,
            force: false,
            namespaces: Namespaces::default(),
            paths: Paths::default(),
        }
    }
}

/// Load configuration from a TOML file.
///
/// Returns `Ok(None)` if the file does not exist and `Err` if it exists but
/// cannot be read or parsed.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<ScaffoldConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

    let config: ScaffoldConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;

    Ok(Some(config))
}

/// `crudsmith.toml` in `root`, if present.
pub fn auto_detect_config_path(root: &Path) -> Option<PathBuf> {
    let config_path = default_config_path(root);
    config_path.exists().then_some(config_path)
}

/// Resolve the config path: an existing explicit path first, then the file
/// in `root`.
pub fn resolve_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        warn!(path = %path.display(), "config file not found, falling back to auto-detection");
    }

    auto_detect_config_path(root)
}

/// Location of `crudsmith.toml` in `root`, whether or not it exists.
pub fn default_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Resolve and load configuration, falling back to defaults.
pub fn load_or_default(explicit_path: Option<&Path>, root: &Path) -> anyhow::Result<ScaffoldConfig> {
    match resolve_config_path(explicit_path, root) {
        Some(path) => Ok(load_config(&path)?.unwrap_or_default()),
        None => Ok(ScaffoldConfig::default()),
    }
}

/// Write config content unless the file already exists.
///
/// Returns whether the file was written.
pub fn write_config_if_missing(config_path: &Path, content: &str, force: bool) -> anyhow::Result<bool> {
    if config_path.exists() && !force {
        return Ok(false);
    }
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory for {}", config_path.display()))?;
    }
    std::fs::write(config_path, content)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("crudsmith_config_{}_{nanos}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = temp_dir();
        assert!(load_config(&dir.join("nope.toml")).unwrap().is_none());
        assert_eq!(load_or_default(None, &dir).unwrap(), ScaffoldConfig::default());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = temp_dir();
        std::fs::write(
            dir.join(CONFIG_FILE_NAME),
            "default_group = \"Shop\"\nroute = \"web\"\n\n[paths]\nmodel = \"src/Domain\"\n\n[namespaces]\nenum = \"App\\\\Support\\\\Enums\"\n",
        )
        .unwrap();
        let config = load_or_default(None, &dir).unwrap();
        assert_eq!(config.default_group, "Shop");
        assert_eq!(config.route, RouteFile::Web);
        assert_eq!(config.paths.model, PathBuf::from("src/Domain"));
        assert_eq!(config.paths.seeder, PathBuf::from("database/seeders"));
        assert_eq!(config.namespaces.enumeration, "App\\Support\\Enums");
        assert_eq!(config.namespaces.model, "App\\Models");
        assert!(!config.force);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = temp_dir();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "route = 42\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = temp_dir();
        let explicit = dir.join("custom.toml");
        std::fs::write(&explicit, "force = true\n").unwrap();
        std::fs::write(dir.join(CONFIG_FILE_NAME), "force = false\n").unwrap();
        assert_eq!(resolve_config_path(Some(&explicit), &dir), Some(explicit.clone()));
        assert!(load_or_default(Some(&explicit), &dir).unwrap().force);

        let missing = dir.join("missing.toml");
        assert_eq!(
            resolve_config_path(Some(&missing), &dir),
            Some(dir.join(CONFIG_FILE_NAME))
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_if_missing() {
        let dir = temp_dir();
        let path = dir.join("nested").join(CONFIG_FILE_NAME);
        assert!(write_config_if_missing(&path, "force = true\n", false).unwrap());
        assert!(!write_config_if_missing(&path, "force = false\n", false).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "force = true\n");
        assert!(write_config_if_missing(&path, "force = false\n", true).unwrap());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
