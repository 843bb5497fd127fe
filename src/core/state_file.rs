//! Small client-owned state kept between runs: the anonymous user id and the
//! link of the last selected thread.

use std::error::Error;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::config::io::{load_toml_or_default, project_dirs, save_toml_atomically};
use crate::core::config::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientState {
    pub user_id: Option<String>,
    pub last_link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `state.toml` in the platform data directory.
    pub fn default_location() -> Result<Self, ConfigError> {
        Ok(Self::new(project_dirs()?.data_dir().join("state.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ClientState, ConfigError> {
        load_toml_or_default(&self.path)
    }

    /// Read-modify-write. The file is rewritten only when the closure changed
    /// something.
    pub fn update<F>(&self, mutate: F) -> Result<ClientState, Box<dyn Error>>
    where
        F: FnOnce(&mut ClientState),
    {
        let current = self.load()?;
        let mut next = current.clone();
        mutate(&mut next);
        if next != current {
            save_toml_atomically(&next, &self.path)?;
        }
        Ok(next)
    }
}
