//! HTTP server configuration object and helpers.

use std::sync::Arc;

use camino::Utf8PathBuf;
use patient_registry::domain::ports::{PatientRepository, PatientRepositoryError};
use patient_registry::outbound::persistence::{
    InMemoryPatientRepository, JsonFilePatientRepository,
};
use patient_registry::settings::ServerSettings;
use tracing::info;

/// Where the server keeps patient records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Records live in process memory and vanish on exit.
    InMemory,
    /// Records live in the JSON document at this path.
    File(Utf8PathBuf),
}

impl StoreConfig {
    /// Open the repository this configuration names.
    pub fn open(&self) -> Result<Arc<dyn PatientRepository>, PatientRepositoryError> {
        match self {
            Self::InMemory => {
                info!("using in-memory patient store");
                Ok(Arc::new(InMemoryPatientRepository::default()))
            }
            Self::File(path) => {
                info!(path = %path, "using JSON file patient store");
                Ok(Arc::new(JsonFilePatientRepository::open(path)?))
            }
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: String,
    pub(crate) store: StoreConfig,
}

impl ServerConfig {
    /// Construct a server configuration from loaded settings.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when the data file path is not valid UTF-8.
    pub fn from_settings(settings: &ServerSettings) -> std::io::Result<Self> {
        let store = if settings.in_memory {
            StoreConfig::InMemory
        } else {
            let path = Utf8PathBuf::from_path_buf(settings.data_file()).map_err(|path| {
                std::io::Error::other(format!(
                    "data file path is not valid UTF-8: {}",
                    path.display()
                ))
            })?;
            StoreConfig::File(path)
        };

        Ok(Self {
            bind_addr: settings.bind_addr().to_owned(),
            store,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn settings(in_memory: bool) -> ServerSettings {
        ServerSettings {
            bind_addr: Some("127.0.0.1:0".to_owned()),
            data_file: Some("records/patient.json".into()),
            in_memory,
        }
    }

    #[rstest]
    #[case(true, StoreConfig::InMemory)]
    #[case(false, StoreConfig::File(Utf8PathBuf::from("records/patient.json")))]
    fn store_follows_in_memory_flag(#[case] in_memory: bool, #[case] expected: StoreConfig) {
        let config = ServerConfig::from_settings(&settings(in_memory)).expect("valid settings");
        assert_eq!(config.store, expected);
        assert_eq!(config.bind_addr, "127.0.0.1:0");
    }
}
