use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const CONFIG_ENV: &str = "CGIECHO_CONFIG";

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    pub logging: LogConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub heading: String,
    /// List the CGI meta-variables below the body section.
    pub show_environment: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "CGI Echo Test".to_string(),
            heading: "Hello from CGI!".to_string(),
            show_environment: false,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Loads the file named by `CGIECHO_CONFIG`.
    ///
    /// # Errors
    ///
    /// See [`Config::load_from`].
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_file_path())
    }

    /// No path, an empty path or a missing file yields the defaults; nothing
    /// is ever written back.
    ///
    /// # Errors
    ///
    /// Returns an error when an existing file cannot be read or parsed.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        match config_path {
            Some(config_path) if !config_path.as_os_str().is_empty() && config_path.exists() => {
                Self::from_path(&config_path)
            }
            _ => Ok(Config::default()),
        }
    }

    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not valid TOML.
    pub fn from_path(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
        Ok(config)
    }

    #[must_use]
    pub fn config_file_path() -> Option<PathBuf> {
        env::var_os(CONFIG_ENV)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "[page]\ntitle = \"Staging\"\nshow_environment = true")?;

        let config = Config::from_path(file.path())?;
        assert_eq!(config.page.title, "Staging");
        assert_eq!(config.page.heading, "Hello from CGI!");
        assert!(config.page.show_environment);
        assert_eq!(config.logging, LogConfig::default());
        Ok(())
    }

    #[test]
    fn empty_file_is_default() -> Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        assert_eq!(Config::from_path(file.path())?, Config::default());
        Ok(())
    }

    #[test]
    fn malformed_file_is_error() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "[page\ntitle = ")?;
        let err = Config::from_path(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config file"));
        Ok(())
    }

    #[test]
    fn load_without_path_is_default() -> Result<()> {
        assert_eq!(Config::load_from(None)?, Config::default());
        assert_eq!(Config::load_from(Some(PathBuf::new()))?, Config::default());
        Ok(())
    }

    #[test]
    fn load_of_absent_file_is_default_and_creates_nothing() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cgiecho.toml");
        assert_eq!(Config::load_from(Some(path.clone()))?, Config::default());
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn load_reads_existing_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "[logging]\nlevel = \"debug\"")?;
        let config = Config::load_from(Some(file.path().to_path_buf()))?;
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.page, PageConfig::default());
        Ok(())
    }

    #[test]
    fn load_of_malformed_file_is_error() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "page = 3")?;
        assert!(Config::load_from(Some(file.path().to_path_buf())).is_err());
        Ok(())
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config file"));
    }
}
