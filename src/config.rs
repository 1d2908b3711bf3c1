//! The ambient `Configuration`: the fields `spec.md` §6 enumerates, loaded
//! from a `atelier.toml` file and `ATELIER_`-prefixed environment variables
//! the way the teacher's CLI loads its own configuration.

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use config::Config;
use config::Environment;
use config::File;
use config::FileFormat;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

const CONFIGURATION_FILE: &str = "atelier";
const ENVIRONMENT_PREFIX: &str = "ATELIER";
const DEFAULT_DB_FILENAME: &str = "db.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// Where compiled and meta files land. `None` means "do not compile",
    /// only valid for the `inspect` command.
    pub output_dir: Option<PathBuf>,

    /// Preserve line-number mapping during compile.
    pub track_line_numbers: bool,

    /// If `false`, the resource manager is not created and the resource
    /// sub-db is neither loaded nor saved.
    pub process_resources: bool,

    /// Forwarded to the compiler.
    pub add_created_at: bool,

    /// Compile-time environment values, merged into the environment
    /// registry before a run.
    pub environment: Option<BTreeMap<String, Value>>,

    /// Forwarded to the source transformer; this crate never interprets
    /// its shape.
    pub babel_options: Option<Value>,

    /// Primary class database path, relative to the workspace root.
    pub db_filename: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            output_dir: None,
            track_line_numbers: false,
            process_resources: true,
            add_created_at: false,
            environment: None,
            babel_options: None,
            db_filename: DEFAULT_DB_FILENAME.to_string(),
        }
    }
}

impl Configuration {
    /// Loads configuration from (in order of precedence) environment
    /// variables, an `atelier.toml` file in `workspace`, then built-in
    /// defaults.
    pub fn load(workspace: &Path) -> Result<Self, Error> {
        tracing::debug!(workspace = %workspace.display(), "loading configuration");

        let builder = Config::builder()
            .add_source(File::from(workspace.join(format!("{CONFIGURATION_FILE}.toml"))).required(false).format(FileFormat::Toml))
            .add_source(Environment::with_prefix(ENVIRONMENT_PREFIX).try_parsing(true));

        let mut this: Configuration = builder.build()?.try_deserialize()?;
        this.normalize(workspace);

        Ok(this)
    }

    fn normalize(&mut self, workspace: &Path) {
        if let Some(output_dir) = &self.output_dir {
            if !output_dir.is_absolute() {
                self.output_dir = Some(workspace.join(output_dir));
            }
        }

        if self.db_filename.trim().is_empty() {
            tracing::warn!("db_filename is empty, falling back to `{DEFAULT_DB_FILENAME}`");
            self.db_filename = DEFAULT_DB_FILENAME.to_string();
        }
    }

    pub fn db_path(&self, workspace: &Path) -> PathBuf {
        workspace.join(&self.db_filename)
    }
}
