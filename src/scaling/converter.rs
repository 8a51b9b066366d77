use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::app_config::ConverterConfig;
use crate::errors::ScaleError;

// @module: External XML to binary mesh converter

/// Runs `OgreXMLConverter <xml> <binary>` without going through a shell
pub struct MeshConverter {
    executable: PathBuf,
    fail_on_error: bool,
}

impl MeshConverter {
    /// Build a converter from configuration, `None` when no path is configured
    pub fn from_config(config: &ConverterConfig) -> Option<Self> {
        if !config.is_enabled() {
            return None;
        }

        Some(Self {
            executable: PathBuf::from(config.path.trim()),
            fail_on_error: config.fail_on_error,
        })
    }

    /// Convert `xml` into `binary`, returning whether the converter succeeded
    ///
    /// Failures are only logged unless `fail_on_error` is set.
    pub fn convert(&self, xml: &Path, binary: &Path) -> Result<bool, ScaleError> {
        info!("Converting XML document to binary...");
        debug!("Running {:?} {:?} {:?}", self.executable, xml, binary);

        let output = Command::new(&self.executable)
            .arg(xml)
            .arg(binary)
            .output();

        let failure = match output {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                if !stdout.trim().is_empty() {
                    debug!("Converter output: {}", stdout.trim());
                }

                if output.status.success() {
                    return Ok(true);
                }

                let stderr = String::from_utf8_lossy(&output.stderr);
                format!("{} {}", output.status, stderr.trim())
            }
            Err(e) => e.to_string(),
        };

        let error = ScaleError::ConverterFailed {
            converter: self.executable.clone(),
            message: failure.trim().to_string(),
        };

        if self.fail_on_error {
            return Err(error);
        }

        warn!("{}", error);
        Ok(false)
    }
}
