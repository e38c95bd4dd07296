use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::extract::DEFAULT_PADDING;
use crate::output::RenderOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Extraction settings
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Report and file output settings
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Seconds of context added on each side when `--padding` is not given
    pub default_padding: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report width in columns
    pub width: usize,

    /// Marker for segments inside the requested time range
    pub target_marker: String,

    /// Inserted before each search match
    pub highlight_open: String,

    /// Inserted after each search match
    pub highlight_close: String,

    /// Directory for `--save` (current directory if unset)
    pub save_dir: Option<PathBuf>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            default_padding: DEFAULT_PADDING,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            width: render.width,
            target_marker: render.target_marker,
            highlight_open: render.highlight_open,
            highlight_close: render.highlight_close,
            save_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from an explicit file, the usual locations, or defaults
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a YAML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .context("Failed to read config file")?;

        let config: Config = serde_yaml::from_str(&content)
            .context("Failed to parse config file")?;

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to the user config file
    pub async fn save(&self) -> Result<PathBuf> {
        let config_path = Self::user_config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        Self::user_config_path()
    }

    fn user_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("transcript-excerpt").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.output.width < 40 {
            anyhow::bail!("Output width must be at least 40 columns, got {}", self.output.width);
        }

        if self.output.target_marker.trim().is_empty() {
            anyhow::bail!("Target marker must not be empty");
        }

        if self.output.highlight_open.is_empty() || self.output.highlight_close.is_empty() {
            anyhow::bail!("Highlight delimiters must not be empty");
        }

        Ok(())
    }

    /// Render options derived from the output settings
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width: self.output.width,
            target_marker: self.output.target_marker.clone(),
            highlight_open: self.output.highlight_open.clone(),
            highlight_close: self.output.highlight_close.clone(),
        }
    }

    /// Directory used by `--save`
    pub fn save_dir(&self) -> Result<PathBuf> {
        match &self.output.save_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("Could not determine current directory"),
        }
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Default Padding: {}s", self.extract.default_padding);
        println!("  Report Width: {}", self.output.width);
        println!("  Target Marker: {:?}", self.output.target_marker);
        println!(
            "  Highlight: {:?} ... {:?}",
            self.output.highlight_open, self.output.highlight_close
        );
        match &self.output.save_dir {
            Some(dir) => println!("  Save Directory: {}", dir.display()),
            None => println!("  Save Directory: (current directory)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_render_defaults() {
        let config = Config::default();
        assert_eq!(config.extract.default_padding, 30);
        assert_eq!(config.render_options(), RenderOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("extract:\n  default_padding: 5\n").unwrap();
        assert_eq!(config.extract.default_padding, 5);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = Config::default();
        config.output.width = 100;
        config.output.save_dir = Some(dir.path().to_path_buf());
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_narrow_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs_err::write(&path, "output:\n  width: 10\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("at least 40"));
    }

    #[test]
    fn test_validate_rejects_empty_markers() {
        let mut config = Config::default();
        config.output.highlight_close = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.target_marker = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.yaml"))).await.is_err());
    }
}
