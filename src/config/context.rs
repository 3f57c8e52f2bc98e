use anyhow::{Context, Result};
use crate::api::{ApiClient, HttpTransport, ReplayTransport};
use crate::cli::output::Style;
use crate::config::settings::Settings;

/// Everything a command handler needs, built once per invocation and
/// passed down explicitly.
pub struct AppContext {
    pub settings: Settings,
    pub client: ApiClient,
    pub style: Style,
}

impl AppContext {
    /// Load settings from the rc file and environment, then connect
    pub fn load() -> Result<Self> {
        let settings = Settings::load().context("Failed to load configuration")?;
        Self::from_settings(settings)
    }

    pub fn from_settings(settings: Settings) -> Result<Self> {
        let client = match &settings.fixtures {
            Some(dir) => {
                if !dir.is_dir() {
                    anyhow::bail!("Replay fixture directory not found: {}", dir.display());
                }
                log::debug!("Replay mode: serving API responses from {}", dir.display());
                ApiClient::new(Box::new(ReplayTransport::new(dir)))
            }
            None => {
                let transport = HttpTransport::new(&settings.api_url, settings.token.clone(), settings.timeout)
                    .context("Failed to build HTTP client")?;
                ApiClient::new(Box::new(transport))
            }
        };
        let style = Style::from_settings(&settings);

        Ok(Self { settings, client, style })
    }

    /// True when responses come from fixture files instead of the live API
    pub fn is_replay(&self) -> bool {
        self.settings.fixtures.is_some()
    }
}
