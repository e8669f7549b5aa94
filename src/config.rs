//! Export settings.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::generation::GeneratorConfig;

/// Default directory for saved exports.
pub const DEFAULT_EXPORT_DIR: &str = "./exports";

/// Default artifact size limit in megabytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 50;

/// Settings for the export pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory saved artifacts are written to
    pub export_dir: PathBuf,

    /// Largest artifact accepted for saving, in megabytes (0 = unlimited)
    pub max_file_size_mb: u64,

    /// Text generator selection
    pub generator: GeneratorConfig,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            generator: GeneratorConfig::default(),
        }
    }
}

impl ExportSettings {
    /// Create settings with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `EXPORT_TEMP_DIR`, `MAX_FILE_SIZE_MB` and
    /// `LLM_PROVIDER` when set. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(dir) = env::var("EXPORT_TEMP_DIR") {
            if !dir.trim().is_empty() {
                settings.export_dir = PathBuf::from(dir);
            }
        }
        if let Some(mb) = env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|v| v.trim().parse().ok())
        {
            settings.max_file_size_mb = mb;
        }
        if let Ok(provider) = env::var("LLM_PROVIDER") {
            if !provider.trim().is_empty() {
                settings.generator.provider = provider;
            }
        }
        settings
    }

    /// Set the export directory.
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    /// Set the size limit in megabytes.
    pub fn with_max_file_size_mb(mut self, mb: u64) -> Self {
        self.max_file_size_mb = mb;
        self
    }

    /// Set the generator configuration.
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    /// Size limit in bytes, `None` when unlimited.
    pub fn max_file_size_bytes(&self) -> Option<u64> {
        match self.max_file_size_mb {
            0 => None,
            mb => Some(mb.saturating_mul(1024 * 1024)),
        }
    }
}
