//! Project-local configuration.
//!
//! modlens works with zero configuration; an optional `modlens.toml` in
//! the working directory overrides the built-in conventions:
//!
//! ```toml
//! # modlens.toml
//! entry-file = "init.lua"
//! ```
//!
//! CLI flags override file values, which override the defaults.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_ENTRY_FILE};
use crate::core::ModlensError;

/// Settings read from `modlens.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ModlensConfig {
    /// Conventional root entry file of an archive. Used as the starting
    /// point of dependency resolution and as the attribution fallback
    /// for errors no transcript mention claims.
    pub entry_file: String,
}

impl Default for ModlensConfig {
    fn default() -> Self {
        Self {
            entry_file: DEFAULT_ENTRY_FILE.to_string(),
        }
    }
}

impl ModlensConfig {
    /// Load from an explicit path. The file must exist and parse.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text).map_err(|err| ModlensError::ConfigParseError {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Ok(config)
    }

    /// Load `modlens.toml` from the working directory if present,
    /// defaults otherwise. A present-but-invalid file is an error; a
    /// missing file is not.
    pub fn load_default() -> Result<Self> {
        let path = Path::new(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }
}
