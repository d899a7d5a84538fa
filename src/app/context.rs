use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::{Api, GraphqlApi};
use crate::app::error::{MindstreamError, Result};
use crate::config::Config;
use crate::store::Store;

/// Wires configuration, the API client and the session file together.
pub struct AppContext {
    pub config: Config,
    pub api: Arc<GraphqlApi>,
    session_path: PathBuf,
}

impl AppContext {
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(&path)?,
            None => Config::load()?,
        };
        Self::with_session_path(config, Self::default_session_path()?)
    }

    pub fn with_session_path(config: Config, session_path: PathBuf) -> Result<Self> {
        let api = Arc::new(GraphqlApi::new(&config.api)?);
        let ctx = Self {
            config,
            api,
            session_path,
        };
        if let Some(token) = ctx.load_session()? {
            ctx.api.set_token(Some(token));
        }
        Ok(ctx)
    }

    /// A fresh store wired to this context's API client.
    pub fn store(&self) -> Store {
        let api: Arc<dyn Api + Send + Sync> = self.api.clone();
        let mut store = Store::new(api);
        if let Some(token) = self.api.token() {
            store.restore_session(token);
        }
        store
    }

    pub fn is_logged_in(&self) -> bool {
        self.api.token().is_some()
    }

    pub fn load_session(&self) -> Result<Option<String>> {
        read_session(&self.session_path)
    }

    pub fn save_session(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.session_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.session_path, token)?;
        self.api.set_token(Some(token.to_string()));
        tracing::info!(path = %self.session_path.display(), "Session saved");
        Ok(())
    }

    pub fn clear_session(&self) -> Result<()> {
        if self.session_path.exists() {
            fs::remove_file(&self.session_path)?;
        }
        self.api.set_token(None);
        Ok(())
    }

    fn default_session_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| MindstreamError::Config("Could not find data directory".into()))?;
        Ok(data_dir.join("mindstream").join("session"))
    }
}

fn read_session(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let token = fs::read_to_string(path)?;
    let token = token.trim();
    if token.is_empty() {
        Ok(None)
    } else {
        Ok(Some(token.to_string()))
    }
}
