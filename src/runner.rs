//! Binary runner
//!
//! Initializes logging from the CLI flags, wires the store, catalog and
//! resolver together and executes one command.

use std::io::{BufRead, Write};

use serde_json::{Value, json};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::bridge::{AlwaysConfirm, ChangeBroadcaster, Confirmer, LogBroadcaster};
use crate::cli::{Cli, Command, LangArg};
use crate::presets::{DefaultPresetCatalog, PresetResolver};
use crate::settings::SettingsStore;
use crate::types::{AppPaths, Preset, Result};

/// Build an EnvFilter based on CLI args and RUST_LOG environment variable
///
/// Priority: RUST_LOG environment variable > CLI arguments (-v, -vv, -q)
fn build_env_filter(cli: &Cli) -> tracing_subscriber::EnvFilter {
    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        if !rust_log.is_empty() {
            return tracing_subscriber::EnvFilter::new(rust_log);
        }
    }

    let level = cli.log_level();
    tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into())
}

/// Initialize logging with file output (diagnostic mode)
fn init_logging_to_file(cli: &Cli) -> anyhow::Result<()> {
    let filter = build_env_filter(cli);

    let log_path = cli.log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(&log_path)?;

    eprintln!("Diagnostic mode: logging to {}", log_path.display());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    Ok(())
}

/// Initialize logging with stderr output (normal mode)
fn init_logging_to_stderr(cli: &Cli) {
    let filter = build_env_filter(cli);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Initialize logging based on CLI arguments
pub fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    if cli.is_diagnostic() {
        init_logging_to_file(cli)
    } else {
        init_logging_to_stderr(cli);
        Ok(())
    }
}

/// Asks on stderr, reads the answer from stdin
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl Confirmer for TerminalConfirm {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        drop(std::io::stderr().flush());

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Resolver plus the on-disk catalog it reads from
#[derive(Debug)]
pub struct Engine {
    resolver: PresetResolver,
    catalog: DefaultPresetCatalog,
}

impl Engine {
    /// Wire the settings file and catalog directories for a set of paths
    pub fn open(paths: &AppPaths) -> Self {
        let catalog =
            DefaultPresetCatalog::new(paths.editable_presets_dir(), &paths.bundled_presets_dir);
        let resolver = PresetResolver::new(SettingsStore::open(paths.settings_file()), catalog.clone())
            .with_broadcaster(LogBroadcaster);
        Self { resolver, catalog }
    }

    pub fn with_confirmer(mut self, confirmer: impl Confirmer + 'static) -> Self {
        self.resolver = self.resolver.with_confirmer(confirmer);
        self
    }

    pub fn with_broadcaster(mut self, broadcaster: impl ChangeBroadcaster + 'static) -> Self {
        self.resolver = self.resolver.with_broadcaster(broadcaster);
        self
    }

    pub fn resolver(&self) -> &PresetResolver {
        &self.resolver
    }

    pub fn catalog(&self) -> &DefaultPresetCatalog {
        &self.catalog
    }

    /// Execute one command, returning its JSON result
    pub fn execute(&self, command: &Command) -> Result<Value> {
        let resolver = &self.resolver;
        let store = resolver.store();
        let language = |arg: &LangArg| arg.lang.clone().unwrap_or_else(|| store.load().language);

        let output = match command {
            Command::Show => serde_json::to_value(store.load())?,
            Command::List(lang) => {
                serde_json::to_value(resolver.effective_presets(&language(lang)))?
            }
            Command::Create {
                lang,
                name,
                wpm,
                description,
            } => {
                let preset = build_preset(name, *wpm, description.as_deref());
                resolver.create(&language(lang), preset)?;
                json!({"action": "created", "name": name})
            }
            Command::Delete { lang, name } => {
                serde_json::to_value(resolver.delete(&language(lang), name)?)?
            }
            Command::Edit {
                lang,
                original,
                name,
                wpm,
                description,
            } => {
                let new_name = name.as_deref().unwrap_or(original);
                let preset = build_preset(new_name, *wpm, description.as_deref());
                serde_json::to_value(resolver.edit(&language(lang), original, preset)?)?
            }
            Command::Restore(lang) => {
                serde_json::to_value(resolver.restore_defaults(&language(lang))?)?
            }
            Command::Seed => json!({"seeded": self.catalog.ensure_seeded()}),
            Command::SetLanguage { tag } => {
                let settings = store.set_language(tag);
                resolver.broadcaster().notify(&settings);
                json!({"language": settings.language})
            }
            Command::SetCountMode { mode } => {
                let settings = store.set_count_mode((*mode).into());
                resolver.broadcaster().notify(&settings);
                json!({"countMode": settings.count_mode})
            }
        };
        Ok(output)
    }
}

/// Run one CLI command and print its result as JSON on stdout
pub fn run_with_cli(cli: &Cli) -> anyhow::Result<()> {
    init_logging(cli)?;
    tracing::debug!(version = %env!("CARGO_PKG_VERSION"), "Starting");

    let paths = AppPaths::resolve(cli.config_dir.clone(), cli.bundled_dir.clone());
    tracing::debug!(?paths, "Resolved paths");

    let confirmer: Box<dyn Confirmer> = if cli.yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(TerminalConfirm)
    };
    let engine = Engine::open(&paths).with_confirmer(confirmer);
    if !matches!(cli.command, Command::Seed) {
        engine.catalog().ensure_seeded();
    }

    let output = engine.execute(&cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn build_preset(name: &str, wpm: u32, description: Option<&str>) -> Preset {
    let preset = Preset::new(name, wpm);
    match description {
        Some(text) => preset.with_description(text),
        None => preset,
    }
}
