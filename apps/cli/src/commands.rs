//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, bail};
use keydoc_render::{generate_command_reference, generate_config_reference, write_document};
use keydoc_shared::{AppConfig, CONFIG_FILE_NAME, init_config, load_config, load_config_from};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// keydoc — generate reference documents for configuration keys and commands.
#[derive(Parser)]
#[command(
    name = "keydoc",
    version,
    about = "Generate configuration key and command reference documents from source files.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Project root that source and output paths are resolved against.
    #[arg(long, default_value = ".", global = true, env = "KEYDOC_ROOT")]
    pub root: PathBuf,

    /// Config file to use instead of `<root>/keydoc.toml`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to `keys` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate the configuration key reference.
    Keys {
        /// Output path (defaults to the configured `config_keys.output`).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print rendered entries as JSON to stdout instead of writing the document.
        #[arg(long)]
        json: bool,
    },

    /// Generate the command reference.
    Commands {
        /// Output path (defaults to the configured `commands.output`).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write `keydoc.toml` with defaults into the project root.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "keydoc=info",
        1 => "keydoc=debug",
        _ => "keydoc=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let root = cli.root;
    let config_path = cli.config;

    match cli.command.unwrap_or(Command::Keys {
        output: None,
        json: false,
    }) {
        Command::Keys { output, json } => {
            let config = resolve_config(&root, config_path.as_deref())?;
            cmd_keys(&root, &config, output.as_deref(), json)
        }
        Command::Commands { output } => {
            let config = resolve_config(&root, config_path.as_deref())?;
            cmd_commands(&root, &config, output.as_deref())
        }
        Command::Config { action } => match action {
            ConfigAction::Init { force } => cmd_config_init(&root, force),
            ConfigAction::Show => cmd_config_show(&root, config_path.as_deref()),
        },
    }
}

/// Load `--config` if given, otherwise `<root>/keydoc.toml` or defaults.
fn resolve_config(root: &Path, explicit: Option<&Path>) -> Result<AppConfig> {
    let config = match explicit {
        Some(path) => load_config_from(path)?,
        None => load_config(root)?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_keys(root: &Path, config: &AppConfig, output: Option<&Path>, json: bool) -> Result<()> {
    let keys = &config.config_keys;
    let reference = generate_config_reference(root, keys)
        .wrap_err("failed to generate the config key reference")?;

    if !reference.diagnostics.is_empty() {
        warn!(
            count = reference.diagnostics.len(),
            "config key scan finished with diagnostics"
        );
    }

    if json {
        let diagnostics: Vec<String> = reference.diagnostics.iter().map(ToString::to_string).collect();
        let payload = serde_json::json!({
            "entries": reference.entries,
            "diagnostics": diagnostics,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let path = root.join(output.unwrap_or(keys.output.as_path()));
    write_document(&path, &reference.document)?;

    info!(entries = reference.entries.len(), path = %path.display(), "config key reference generated");
    println!("Wrote {} keys to {}", reference.entries.len(), path.display());
    Ok(())
}

fn cmd_commands(root: &Path, config: &AppConfig, output: Option<&Path>) -> Result<()> {
    let document = generate_command_reference(root, &config.commands)
        .wrap_err("failed to generate the command reference")?;

    let path = root.join(output.unwrap_or(config.commands.output.as_path()));
    write_document(&path, &document)?;

    println!("Wrote command reference to {}", path.display());
    Ok(())
}

fn cmd_config_init(root: &Path, force: bool) -> Result<()> {
    let existing = root.join(CONFIG_FILE_NAME);
    if existing.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            existing.display()
        );
    }
    let path = init_config(root)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(root: &Path, explicit: Option<&Path>) -> Result<()> {
    let config = resolve_config(root, explicit)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_keys() {
        let cli = Cli::try_parse_from(["keydoc"]).expect("parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn keys_flags_parse() {
        let cli = Cli::try_parse_from(["keydoc", "--root", "aura", "keys", "--json", "-o", "docs/CONFIG.md"])
            .expect("parse");
        match cli.command {
            Some(Command::Keys { output, json }) => {
                assert!(json);
                assert_eq!(output, Some(PathBuf::from("docs/CONFIG.md")));
            }
            _ => panic!("expected keys subcommand"),
        }
        assert_eq!(cli.root, PathBuf::from("aura"));
    }

    #[test]
    fn keys_writes_document_under_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("net.cpp"),
            "m_Port = CFG.GetUint16(\"net.game_port\", 6112);\n",
        )
        .expect("write source");

        let mut config = AppConfig::default();
        config.config_keys.sources = vec![PathBuf::from("net.cpp")];

        cmd_keys(dir.path(), &config, None, false).expect("keys");
        let doc = std::fs::read_to_string(dir.path().join("CONFIG.md")).expect("read output");
        assert!(doc.contains("## \\`net.game_port\\`\n- Type: uint16\n- Default value: 6112\n"));
    }

    #[test]
    fn keys_fails_on_missing_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = AppConfig::default();
        config.config_keys.sources = vec![PathBuf::from("missing.cpp")];

        assert!(cmd_keys(dir.path(), &config, None, false).is_err());
        assert!(!dir.path().join("CONFIG.md").exists());
    }

    #[test]
    fn config_init_refuses_overwrite() {
        let dir = tempfile::tempdir().expect("tempdir");
        cmd_config_init(dir.path(), false).expect("first init");
        assert!(cmd_config_init(dir.path(), false).is_err());
        cmd_config_init(dir.path(), true).expect("forced init");
    }
}
