//! Configuration file and API key lookup.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const OPENCAGE_ENDPOINT: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Keys file picked up from the working directory when none is given
pub const DEFAULT_KEYS_FILE: &str = "Keys.toml";

/// `Keys.toml` inside `dir`, if there is one.
pub fn default_keys_file(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(DEFAULT_KEYS_FILE);
    path.is_file().then_some(path)
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: OPENCAGE_ENDPOINT.to_string(),
            timeout_secs: 30,
            user_agent: concat!("mapsearch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl GeocoderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search starts
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 1000 }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

/// Named API keys the application knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKey {
    OpenCage,
}

impl ApiKey {
    /// Name used both as environment variable and as key in the keys file
    pub fn name(&self) -> &'static str {
        match self {
            ApiKey::OpenCage => "OPEN_CAGE_API_TOKEN",
        }
    }

    /// Look the key up in the environment, then in a TOML key/value file.
    ///
    /// Without an explicit `keys_file`, `Keys.toml` in the working directory
    /// is used when present. Empty values count as missing. A keys file that
    /// cannot be read or parsed is an error; a keys file that simply lacks
    /// the entry is not.
    pub fn lookup(&self, keys_file: Option<&Path>) -> Result<Option<String>> {
        if let Some(value) = env::var(self.name()).ok().filter(|v| !v.is_empty()) {
            debug!("Using {} from environment", self.name());
            return Ok(Some(value));
        }

        let path = match keys_file {
            Some(path) => path.to_path_buf(),
            None => match env::current_dir().ok().and_then(|dir| default_keys_file(&dir)) {
                Some(path) => path,
                None => return Ok(None),
            },
        };

        debug!("Looking up {} in {}", self.name(), path.display());
        self.lookup_in_file(&path)
    }

    pub fn lookup_in_file(&self, path: &Path) -> Result<Option<String>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read keys file {}", path.display()))?;
        let table: toml::Table = toml::from_str(&content)
            .with_context(|| format!("Failed to parse keys file {}", path.display()))?;

        Ok(table
            .get(self.name())
            .and_then(|v| v.as_str())
            .filter(|v| !v.is_empty())
            .map(String::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.geocoder.base_url, OPENCAGE_ENDPOINT);
        assert_eq!(config.search.debounce(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_section() {
        let config: Config = toml::from_str(
            r#"
            [geocoder]
            base_url = "http://localhost:8080/geocode"

            [search]
            debounce_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.geocoder.base_url, "http://localhost:8080/geocode");
        assert_eq!(config.geocoder.timeout_secs, 30);
        assert_eq!(config.search.debounce(), Duration::from_millis(250));
    }

    #[test]
    fn test_load_from_missing_file() {
        assert!(Config::load_from_file("/nonexistent/mapsearch.toml").is_err());
    }

    #[test]
    fn test_key_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"OPEN_CAGE_API_TOKEN = "abc123""#).unwrap();

        let key = ApiKey::OpenCage.lookup_in_file(file.path()).unwrap();
        assert_eq!(key.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_empty_key_in_file_is_missing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"OPEN_CAGE_API_TOKEN = """#).unwrap();
        writeln!(file, r#"OTHER = "x""#).unwrap();

        assert_eq!(ApiKey::OpenCage.lookup_in_file(file.path()).unwrap(), None);
    }

    #[test]
    fn test_default_keys_file_only_when_present() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(default_keys_file(dir.path()), None);

        let path = dir.path().join("Keys.toml");
        std::fs::write(&path, "OPEN_CAGE_API_TOKEN = \"abc123\"\n").unwrap();

        let found = default_keys_file(dir.path()).unwrap();
        assert_eq!(found, path);
        assert_eq!(
            ApiKey::OpenCage.lookup_in_file(&found).unwrap().as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_unparseable_keys_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is = = not toml").unwrap();

        assert!(ApiKey::OpenCage.lookup_in_file(file.path()).is_err());
    }
}
