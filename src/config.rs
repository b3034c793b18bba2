use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::transcribe::WaitConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    #[serde(default)]
    pub wait: WaitSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

/// Command line for the external capture tool plus the directory shared
/// with the transcription engine.
///
/// The recorder appends the target temp audio path as the final argument,
/// so `program` + `args` must form a command that records until killed
/// and writes to the path it is given last.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    pub program: String,
    pub args: Vec<String>,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionConfig {
    pub model: WhisperModel,
    pub language: String,
}

/// Result-wait timings in milliseconds, as written in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct WaitSettings {
    pub timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub settle_delay_ms: u64,
}

/// Whisper model size, passed through to logs only.
///
/// The engine picks its model from its own configuration; this exists so
/// operators can correlate bridge logs with engine logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhisperModel {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl Config {
    /// Loads configuration from a TOML file, falling back to defaults for
    /// anything the file omits (or if the file is absent entirely).
    pub fn load(path: &str) -> Result<Self, SessionError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .build()
            .map_err(|e| SessionError::Configuration(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| SessionError::Configuration(e.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            capture: CaptureConfig::default(),
            transcription: TranscriptionConfig::default(),
            wait: WaitSettings::default(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "whisper-bridge".to_string(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        // Same sox invocation the engine-side tooling expects:
        // 16 kHz, 16-bit signed, mono, from the default input device.
        Self {
            program: "sox".to_string(),
            args: vec![
                "-d".to_string(),
                "-b".to_string(),
                "16".to_string(),
                "-e".to_string(),
                "signed".to_string(),
                "-c".to_string(),
                "1".to_string(),
                "-r".to_string(),
                "16k".to_string(),
            ],
            output_dir: PathBuf::from("recordings"),
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: WhisperModel::Base,
            language: "en".to_string(),
        }
    }
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            poll_interval_ms: 100,
            settle_delay_ms: 100,
        }
    }
}

impl WaitSettings {
    pub fn to_wait_config(&self) -> WaitConfig {
        WaitConfig {
            timeout: Duration::from_millis(self.timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
        }
    }
}

impl fmt::Display for WhisperModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WhisperModel::Tiny => "tiny",
            WhisperModel::Base => "base",
            WhisperModel::Small => "small",
            WhisperModel::Medium => "medium",
            WhisperModel::Large => "large",
        };
        f.write_str(name)
    }
}
