use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub artifacts: ArtifactConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

// Manual Debug impl to avoid leaking the API key
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkflowConfig {
    /// How many times the regeneration loop-back edge may fire before the
    /// run is aborted as non-converging.
    #[serde(default = "default_max_regen_cycles")]
    pub max_regen_cycles: u32,
    /// Upper bound on total stage executions in a single run.
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
    #[serde(default = "default_automation_framework")]
    pub automation_framework: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_regen_cycles: default_max_regen_cycles(),
            max_steps: default_max_steps(),
            automation_framework: default_automation_framework(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArtifactConfig {
    #[serde(default = "default_artifact_dir")]
    pub base_dir: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            base_dir: default_artifact_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_regen_cycles() -> u32 {
    2
}

fn default_max_steps() -> u32 {
    25
}

fn default_automation_framework() -> String {
    "Python Playwright".to_string()
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            // Try default paths
            builder = builder.add_source(
                config::File::with_name("testloom")
                    .required(false),
            );
        }

        // Environment variable overrides with TESTLOOM_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("TESTLOOM")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn gemini_api_key(&self) -> &str {
        &self.gemini.api_key
    }
}
