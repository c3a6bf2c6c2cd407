mod auth;
mod browse;
mod config;
mod list;
mod resources;

pub use auth::{cmd_login, cmd_logout};
pub use browse::cmd_browse;
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use list::{ListOptions, cmd_list};
pub use resources::cmd_resources;

use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use crate::api::ApiClient;
use crate::config::{Config, config_dir};
use crate::error::Result;
use crate::session::{FileSessionStore, SessionContext};

/// Output of a command in both JSON and human-readable form.
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, json: bool) -> Result<()> {
        match self.text {
            Some(text) if !json => println!("{text}"),
            _ => println!("{}", serde_json::to_string_pretty(&self.json)?),
        }
        Ok(())
    }
}

/// Whether stdout should receive ANSI colors.
pub(crate) fn color_enabled() -> bool {
    std::io::stdout().is_terminal() && env::var_os("NO_COLOR").is_none()
}

/// Configuration and session shared by the commands.
pub(crate) struct AppContext {
    pub config: Config,
    pub config_dir: PathBuf,
    pub session: Arc<SessionContext>,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let config_dir = config_dir()?;
        let config = Config::load_from(&config_dir)?;
        let store = Arc::new(FileSessionStore::in_dir(&config_dir));
        let session = Arc::new(SessionContext::load(store)?);
        Ok(Self {
            config,
            config_dir,
            session,
        })
    }

    pub fn client(&self) -> Result<Arc<ApiClient>> {
        Ok(Arc::new(ApiClient::from_config(
            &self.config,
            Arc::clone(&self.session),
        )?))
    }
}
