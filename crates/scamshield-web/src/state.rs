//! Application state management

use crate::error::Result;
use crate::notification::Notifier;
use crate::pages::{EmployeesPage, VoiceSimulationsPage};
use scamshield_client::ApiClient;
use scamshield_core::Config;
use tracing::info;

/// Application state holding configuration, the API client and the
/// notification channel shared by every page
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// API client for backend communication
    pub api_client: ApiClient,
    /// Notification channel
    pub notifier: Notifier,
}

impl AppState {
    /// Create application state from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the API base URL
    /// cannot be parsed.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let api_client = ApiClient::new(&config.api)?;
        info!(base_url = %config.api.resolved_base_url(), "Application state ready");
        Ok(Self::with_client(config, api_client))
    }

    /// Create application state around an existing client
    #[must_use]
    pub fn with_client(config: Config, api_client: ApiClient) -> Self {
        Self {
            config,
            api_client,
            notifier: Notifier::default(),
        }
    }

    /// Load configuration from file and environment, then build state
    ///
    /// # Errors
    ///
    /// Returns an error if loading or validation fails.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::load()?)
    }

    /// A fresh Voice Simulations page
    #[must_use]
    pub fn voice_simulations(&self) -> VoiceSimulationsPage {
        VoiceSimulationsPage::new(self.api_client.clone(), self.notifier.clone(), &self.config)
    }

    /// A fresh Employee Security Assessments page
    #[must_use]
    pub fn employees(&self) -> EmployeesPage {
        EmployeesPage::new(self.api_client.clone(), self.notifier.clone(), &self.config)
    }
}
