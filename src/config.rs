//! Configuration for the schema compiler
//!
//! Loaded from a fixed JSON file relative to the working directory, then
//! overridden by environment variables (SCHEMA_COMPILE__*).
//!
//! ## Example config file (schema/schema-compile.config.json):
//! ```json
//! {
//!   "folders": {
//!     "core": "schemas/core",
//!     "events": "schemas/events"
//!   },
//!   "include": ["contracts/**/*.schema.json"],
//!   "exclude": ["schemas/**/legacy/**"]
//! }
//! ```

use config_crate::{Config, Environment, File, FileFormat, Map};
use jsonschema::Draft;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, SchemaError};

/// Location of the config file, relative to the working directory
pub const CONFIG_PATH: &str = "schema/schema-compile.config.json";

/// Prefix of environment variables overriding the config file
pub const ENV_PREFIX: &str = "SCHEMA_COMPILE";

/// Suffix appended to every configured folder to form its include pattern
pub const FOLDER_SUFFIX: &str = "**/*.json";

/// Main configuration for a compile run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileConfig {
    /// Named schema folders (name -> directory)
    pub folders: BTreeMap<String, PathBuf>,

    /// Extra include globs, used verbatim
    #[serde(default)]
    pub include: Vec<String>,

    /// Exclude globs
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Force a JSON Schema draft instead of detecting it from `$schema`
    #[serde(default)]
    pub draft: Option<String>,

    /// Enable `format` validators in the engine
    #[serde(default = "default_true")]
    pub validate_formats: bool,
}

fn default_true() -> bool {
    true
}

impl CompileConfig {
    /// Load configuration from the fixed location under `root`
    pub fn load(root: &Path) -> Result<Self> {
        Self::load_from(&root.join(CONFIG_PATH))
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load configuration from `path`, reading overrides from `env` instead
    /// of the process environment when given
    pub fn load_with_env(path: &Path, env: Option<Map<String, String>>) -> Result<Self> {
        if !path.is_file() {
            return Err(SchemaError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let config = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Json)
                    .required(true),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .source(env)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("include")
                    .with_list_parse_key("exclude"),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        tracing::debug!(
            path = %path.display(),
            folders = config.folders.len(),
            include = config.include.len(),
            exclude = config.exclude.len(),
            "loaded compile config"
        );
        Ok(config)
    }

    /// Include patterns: one recursive pattern per folder, then the extras
    pub fn include_patterns(&self) -> Vec<String> {
        let mut patterns: Vec<String> = self
            .folders
            .values()
            .map(|folder| folder.join(FOLDER_SUFFIX).to_string_lossy().replace('\\', "/"))
            .collect();
        patterns.extend(self.include.iter().cloned());
        patterns
    }

    /// The draft to force on the engine, if any
    pub fn draft(&self) -> Result<Option<Draft>> {
        let Some(name) = self.draft.as_deref() else {
            return Ok(None);
        };
        let draft = match name.trim().trim_start_matches("draft").trim_start_matches('-') {
            "4" | "04" => Draft::Draft4,
            "6" | "06" => Draft::Draft6,
            "7" | "07" => Draft::Draft7,
            "2019-09" => Draft::Draft201909,
            "2020-12" => Draft::Draft202012,
            _ => return Err(SchemaError::UnsupportedDraft(name.to_string())),
        };
        Ok(Some(draft))
    }
}
