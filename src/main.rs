// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use medtranslate::api::{self, AppState, TranslateRequest};
use medtranslate::app_config::{self, Config};
use medtranslate::glossary::{builtin_glossary, load_glossary};
use medtranslate::providers::groq::Groq;
use medtranslate::server;
use medtranslate::translation::TranslationPipeline;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate one utterance and print the JSON result
    Translate {
        /// Target language code or locale tag (e.g. 'es', 'fr-FR')
        #[arg(short, long)]
        target_lang: String,

        /// Text to translate
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Serve the translation endpoint over HTTP
    Serve {
        /// Address to listen on, overriding the configuration
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Generate shell completions for medtranslate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// medtranslate - glossary-aware medical utterance translation
#[derive(Parser, Debug)]
#[command(name = "medtranslate")]
#[command(version)]
#[command(about = "Glossary-aware translation of clinical utterances")]
#[command(long_about = "medtranslate redacts patient identifiers, protects glossary terms with placeholders,
translates through a fallback chain of models and validates the result.

EXAMPLES:
    medtranslate translate -t es \"Take 500 mg twice daily\"
    medtranslate -m llama3-70b-8192 -m mixtral-8x7b-32768 translate -t fr \"chest pain\"
    medtranslate serve --bind 0.0.0.0:3000
    medtranslate completions bash > medtranslate.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Model to try, in order; repeat to build the fallback chain
    #[arg(short, long = "model", global = true)]
    models: Vec<String>,

    /// Glossary file, overriding the configuration
    #[arg(short, long, global = true)]
    glossary: Option<PathBuf>,

    /// Groq API key
    #[arg(long, global = true, env = "GROQ_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

// @struct: Custom logger implementation; filtering follows `log::max_level()`
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());
            let _ = writeln!(std::io::stderr(), "{}{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start at info; the configured level is applied once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "medtranslate", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    let state = Arc::new(build_state(&config, cli.api_key.as_deref())?);

    match cli.command {
        Commands::Translate { target_lang, text } => run_translate(state, text, target_lang).await,
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind_address.clone());
            server::serve(state, &bind).await
        }
        Commands::Completions { .. } => Ok(()),
    }
}

/// Load or create the configuration and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config)?;

    if !cli.models.is_empty() {
        config.translation.model_chain = cli.models.clone();
    }

    if let Some(path) = &cli.glossary {
        config.glossary.path = Some(path.clone());
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

/// Build the glossary, translator and pipeline shared by every request
fn build_state(config: &Config, api_key: Option<&str>) -> Result<AppState> {
    let glossary = match &config.glossary.path {
        Some(path) => load_glossary(path, &config.glossary.base_language)?,
        None => {
            info!("Using built-in glossary");
            builtin_glossary()
        }
    };

    let api_key = api_key
        .map(str::to_string)
        .filter(|key| !key.is_empty())
        .unwrap_or_else(|| config.translation.resolve_api_key());
    if api_key.is_empty() {
        warn!("No API key configured; set GROQ_API_KEY or translation.api_key");
    }

    let translator = Arc::new(Groq::from_config(&config.translation, api_key));
    let pipeline = TranslationPipeline::from_config(config, Arc::new(glossary), translator)?;

    info!(
        "Model chain: {} | supported languages: {}",
        pipeline.model_chain().join(" -> "),
        config.supported_languages.join(", ")
    );

    Ok(AppState::from_config(config, Arc::new(pipeline)))
}

/// Translate one utterance through the same handler the server uses
async fn run_translate(state: Arc<AppState>, text: String, target_lang: String) -> Result<()> {
    let request = TranslateRequest {
        text: Some(text),
        target_lang: Some(target_lang),
    };
    let body = serde_json::to_vec(&request).context("Failed to encode translation request")?;

    let reply = api::handle(state, "POST", &body).await;
    println!(
        "{}",
        serde_json::to_string_pretty(&reply.body).context("Failed to format translation result")?
    );

    if reply.status != 200 {
        return Err(anyhow!("Translation request failed with status {}", reply.status));
    }
    Ok(())
}
