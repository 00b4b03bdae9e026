use pdf_table_extract::{DetectionOptions, LopdfEngine};
use worker::Env;

use crate::error::ApiError;
use crate::models::{DEFAULT_ASSETS_BINDING, DEFAULT_UPLOAD_FIELD};

pub const ASSETS_BINDING_VAR: &str = "ASSETS_BINDING";
pub const UPLOAD_FIELD_VAR: &str = "UPLOAD_FIELD";
pub const MIN_COLS_VAR: &str = "MIN_COLS";

/// Per-request settings read from the worker's environment bindings.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub assets_binding: String,
    pub upload_field: String,
    pub engine: LopdfEngine,
}

impl WorkerConfig {
    pub fn from_env(env: &Env) -> Result<Self, ApiError> {
        Self::from_lookup(|key| env.var(key).ok().map(|value| value.to_string()))
    }

    /// Builds the config from any variable source; unset or blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut detection = DetectionOptions::default();
        if let Some(raw) = read(MIN_COLS_VAR) {
            detection.min_cols = raw.parse::<usize>().map_err(|error| {
                ApiError::Config(format!("{MIN_COLS_VAR} must be an integer: {error}"))
            })?;
        }

        Ok(Self {
            assets_binding: read(ASSETS_BINDING_VAR)
                .unwrap_or_else(|| DEFAULT_ASSETS_BINDING.to_string()),
            upload_field: read(UPLOAD_FIELD_VAR).unwrap_or_else(|| DEFAULT_UPLOAD_FIELD.to_string()),
            engine: LopdfEngine::new(detection)?,
        })
    }
}
