use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// External mesh converter settings
    #[serde(default)]
    pub converter: ConverterConfig,

    /// Layout caption extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// External binary converter configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ConverterConfig {
    // @field: Converter executable, empty disables conversion
    #[serde(default = "default_converter_path")]
    pub path: String,

    // @field: Treat a failed conversion as a fatal error
    #[serde(default)]
    pub fail_on_error: bool,
}

impl ConverterConfig {
    // @returns: True when a converter path is set
    pub fn is_enabled(&self) -> bool {
        !self.path.trim().is_empty()
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            path: default_converter_path(),
            fail_on_error: false,
        }
    }
}

/// What to do when a layout file is not well-formed XML
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLayoutPolicy {
    // @policy: Stop the whole run
    #[default]
    Abort,
    // @policy: Log, skip the file and continue
    Skip,
}

/// Layout caption extraction configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExtractorConfig {
    /// Extension of the layout files to scan, without the dot
    #[serde(default = "default_layout_extension")]
    pub layout_extension: String,

    /// Extension of the generated per-layout templates, without the dot
    #[serde(default = "default_template_extension")]
    pub template_extension: String,

    /// Delete per-layout templates once they have been merged
    #[serde(default)]
    pub remove_intermediate_files: bool,

    /// Behavior on malformed layout files
    #[serde(default)]
    pub on_malformed_layout: MalformedLayoutPolicy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            layout_extension: default_layout_extension(),
            template_extension: default_template_extension(),
            remove_intermediate_files: false,
            on_malformed_layout: MalformedLayoutPolicy::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_converter_path() -> String {
    "/usr/local/bin/OgreXMLConverter".to_string()
}

fn default_layout_extension() -> String {
    "layout".to_string()
}

fn default_template_extension() -> String {
    "pot".to_string()
}

impl Config {
    /// Load the configuration from a JSON file, writing a default one if it is missing
    pub fn load_or_create<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        if config_path.exists() {
            let file = File::open(config_path)
                .with_context(|| format!("Failed to open config file: {:?}", config_path))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", config_path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        validate_extension("layout_extension", &self.extractor.layout_extension)?;
        validate_extension("template_extension", &self.extractor.template_extension)?;

        if self.extractor.layout_extension == self.extractor.template_extension {
            return Err(anyhow!(
                "Layout and template extensions must differ, both are '{}'",
                self.extractor.layout_extension
            ));
        }

        Ok(())
    }
}

fn validate_extension(field: &str, extension: &str) -> Result<()> {
    if extension.is_empty() {
        return Err(anyhow!("{} must not be empty", field));
    }

    if extension.starts_with('.') {
        return Err(anyhow!("{} must not start with a dot: '{}'", field, extension));
    }

    if extension.contains('/') || extension.contains('\\') {
        return Err(anyhow!("{} must not contain a path separator: '{}'", field, extension));
    }

    Ok(())
}
