//! Server configuration loaded via OrthoConfig.
//!
//! Values come from command-line flags, `PATIENT_REGISTRY_*` environment
//! variables, and configuration files, in that order of precedence.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATA_FILE: &str = "patient.json";

/// Configuration values controlling the HTTP server and its patient store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PATIENT_REGISTRY")]
pub struct ServerSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// JSON document holding the patient collection.
    pub data_file: Option<PathBuf>,
    /// Keep records in memory instead of the data file.
    #[ortho_config(default = false)]
    pub in_memory: bool,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the configured data file, falling back to the default.
    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }
}
