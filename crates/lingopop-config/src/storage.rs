use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_notebook_path() -> PathBuf {
    PathBuf::from("notebook.json")
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// File the notebook is persisted to
    #[serde(default = "default_notebook_path")]
    pub notebook_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            notebook_path: default_notebook_path(),
        }
    }
}

impl StorageConfig {
    pub fn new() -> Self {
        Self {
            notebook_path: env::var("LINGOPOP_NOTEBOOK")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_notebook_path()),
        }
    }
}
