//! Application configuration for keydoc.
//!
//! Config lives at `keydoc.toml` in the project root (or wherever `--config`
//! points). Every field has a default, so a missing file is equivalent to an
//! empty one. CLI flags override config file values, which override defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KeydocError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "keydoc.toml";

// ---------------------------------------------------------------------------
// Config structs (matching keydoc.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration-key reference generation.
    #[serde(default)]
    pub config_keys: ConfigKeysConfig,

    /// Command reference generation.
    #[serde(default)]
    pub commands: CommandsConfig,
}

/// `[config_keys]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigKeysConfig {
    /// Source files to scan, in order, relative to the project root.
    #[serde(default = "default_key_sources")]
    pub sources: Vec<PathBuf>,

    /// Output document path, relative to the project root.
    #[serde(default = "default_key_output")]
    pub output: PathBuf,

    /// File whose declarations only apply to games hosted after a reload.
    #[serde(default = "default_game_file")]
    pub game_file: PathBuf,

    /// File holding per-connection (realm) declarations.
    #[serde(default = "default_realm_file")]
    pub realm_file: PathBuf,

    /// Namespace used for realm keys outside the per-realm constructor.
    #[serde(default = "default_global_prefix")]
    pub global_prefix: String,

    /// Namespace used for realm keys inside the per-realm constructor.
    #[serde(default = "default_realm_prefix")]
    pub realm_prefix: String,

    /// Keys ending with this suffix are never documented.
    #[serde(default = "default_hardcoded_suffix")]
    pub hardcoded_suffix: String,

    /// Keys containing any of these substrings are never documented.
    #[serde(default = "default_excluded_substrings")]
    pub excluded_substrings: Vec<String>,

    /// Source-level constants rendered with a fixed human label.
    #[serde(default = "default_named_constants")]
    pub named_constants: BTreeMap<String, String>,
}

impl Default for ConfigKeysConfig {
    fn default() -> Self {
        Self {
            sources: default_key_sources(),
            output: default_key_output(),
            game_file: default_game_file(),
            realm_file: default_realm_file(),
            global_prefix: default_global_prefix(),
            realm_prefix: default_realm_prefix(),
            hardcoded_suffix: default_hardcoded_suffix(),
            excluded_substrings: default_excluded_substrings(),
            named_constants: default_named_constants(),
        }
    }
}

impl ConfigKeysConfig {
    /// Whether `source` is the designated game configuration file.
    pub fn is_game_file(&self, source: &Path) -> bool {
        source == self.game_file
    }

    /// Whether `source` is the designated per-connection file.
    pub fn is_realm_file(&self, source: &Path) -> bool {
        source == self.realm_file
    }
}

fn default_key_sources() -> Vec<PathBuf> {
    [
        "src/aura.cpp",
        "src/auradb.cpp",
        "src/net.cpp",
        "src/config/config_bot.cpp",
        "src/config/config_discord.cpp",
        "src/config/config_game.cpp",
        "src/config/config_irc.cpp",
        "src/config/config_net.cpp",
        "src/config/config_realm.cpp",
        "src/config/config_commands.cpp",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}
fn default_key_output() -> PathBuf {
    PathBuf::from("CONFIG.md")
}
fn default_game_file() -> PathBuf {
    PathBuf::from("src/config/config_game.cpp")
}
fn default_realm_file() -> PathBuf {
    PathBuf::from("src/config/config_realm.cpp")
}
fn default_global_prefix() -> String {
    "global_realm.".into()
}
fn default_realm_prefix() -> String {
    "realm_N.".into()
}
fn default_hardcoded_suffix() -> String {
    "--but_its_hardcoded".into()
}
fn default_excluded_substrings() -> Vec<String> {
    vec![".gameranger.".into()]
}
fn default_named_constants() -> BTreeMap<String, String> {
    [
        ("MAP_TRANSFERS_AUTOMATIC", "auto"),
        ("COMMAND_PERMISSIONS_AUTO", "auto"),
        ("REALM_AUTH_PVPGN", "pvpgn"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// `[commands]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsConfig {
    /// Command source files, relative to the project root.
    #[serde(default = "default_command_sources")]
    pub sources: Vec<PathBuf>,

    /// Output document path, relative to the project root.
    #[serde(default = "default_command_output")]
    pub output: PathBuf,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            sources: default_command_sources(),
            output: default_command_output(),
        }
    }
}

fn default_command_sources() -> Vec<PathBuf> {
    vec![PathBuf::from("src/command.cpp")]
}
fn default_command_output() -> PathBuf {
    PathBuf::from("COMMANDS.md")
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load `keydoc.toml` from the project root. Returns defaults if the file does not exist.
pub fn load_config(root: &Path) -> Result<AppConfig> {
    let path = root.join(CONFIG_FILE_NAME);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| KeydocError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| KeydocError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Write a default config file into `root`.
/// Returns the path to the created file.
pub fn init_config(root: &Path) -> Result<PathBuf> {
    let path = root.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| KeydocError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| KeydocError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
