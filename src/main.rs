// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use ytsubai::app_config::{self, Config, LlmProvider};
use ytsubai::app_controller::Controller;
use ytsubai::transform::TransformKind;

/// CLI Wrapper for LlmProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLlmProvider {
    #[value(name = "openai")]
    OpenAI,
    Anthropic,
    #[value(name = "lmstudio")]
    LMStudio,
}

impl From<CliLlmProvider> for LlmProvider {
    fn from(cli_provider: CliLlmProvider) -> Self {
        match cli_provider {
            CliLlmProvider::OpenAI => LlmProvider::OpenAI,
            CliLlmProvider::Anthropic => LlmProvider::Anthropic,
            CliLlmProvider::LMStudio => LlmProvider::LMStudio,
        }
    }
}

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

/// CLI Wrapper for TransformKind to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliTransformKind {
    Summarize,
    Organize,
    Translate,
}

impl From<CliTransformKind> for TransformKind {
    fn from(cli_kind: CliTransformKind) -> Self {
        match cli_kind {
            CliTransformKind::Summarize => TransformKind::Summarize,
            CliTransformKind::Organize => TransformKind::Organize,
            CliTransformKind::Translate => TransformKind::Translate,
        }
    }
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Directory export files are written to (defaults to the config value)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print only, do not write export files
    #[arg(long)]
    no_export: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch subtitles for a video and export them as TXT and CSV
    Fetch {
        /// YouTube watch URL
        #[arg(value_name = "URL")]
        url: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Fetch subtitles and run AI transformations on them
    Transform {
        /// YouTube watch URL
        #[arg(value_name = "URL")]
        url: String,

        /// Transformation to run (repeatable)
        #[arg(short, long = "kind", value_enum, required = true)]
        kinds: Vec<CliTransformKind>,

        /// Keep key concepts and jargon in English
        #[arg(long)]
        keep_jargon: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the subtitle tracks available for a video
    Tracks {
        /// YouTube watch URL
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Interactive session (default command)
    Interactive {
        /// Keep key concepts and jargon in English
        #[arg(long)]
        keep_jargon: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate shell completions for ytsubai
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// ytsubai - YouTube subtitles with AI summaries
///
/// Fetches the subtitles of a YouTube video through a language fallback chain
/// and turns them into Korean summaries, organized notes or translations.
#[derive(Parser, Debug)]
#[command(name = "ytsubai")]
#[command(version)]
#[command(about = "YouTube subtitle fetcher with AI summaries")]
#[command(long_about = "ytsubai fetches YouTube subtitles and summarizes, organizes or translates them into Korean using AI providers.

EXAMPLES:
    ytsubai                                              # Interactive session
    ytsubai fetch 'https://youtube.com/watch?v=abc123'   # Print and export subtitles
    ytsubai transform -k summarize -k translate URL      # Run two transformations
    ytsubai -p anthropic transform -k organize URL       # Use a specific provider
    ytsubai tracks URL                                   # List available tracks
    ytsubai completions bash > ytsubai.bash              # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically. API keys are read from OPENAI_API_KEY and
    ANTHROPIC_API_KEY when the config file leaves them empty.

SUPPORTED PROVIDERS:
    openai    - OpenAI API (requires API key)
    anthropic - Anthropic Claude API (requires API key)
    lmstudio  - LM Studio local server (OpenAI-compatible on http://localhost:1234/v1)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json", env = "YTSUBAI_CONFIG")]
    config: String,

    /// LLM provider to use
    #[arg(short, long, global = true, value_enum)]
    provider: Option<CliLlmProvider>,

    /// Model name to use
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌",
            Level::Warn => "🚧",
            Level::Info => " ",
            Level::Debug => "🔍",
            Level::Trace => "📋",
        }
    }

    // @returns: ANSI colour prefix for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // The logger filters nothing itself; the max level is adjusted once config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "ytsubai", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(to_level_filter(&config.log_level));

    match cli.command {
        Some(Commands::Fetch { url, output }) => {
            let controller = Controller::with_config(config, output.output_dir, output.force)?;
            controller.fetch(&url, !output.no_export).await?;
        }
        Some(Commands::Transform { url, kinds, keep_jargon, output }) => {
            let controller = Controller::with_config(config, output.output_dir, output.force)?;
            let transformer = controller.build_transformer(keep_jargon)?;

            let kinds: Vec<TransformKind> = kinds.into_iter().map(Into::into).collect();
            let outcomes = controller.transform(&transformer, &url, &kinds, !output.no_export).await?;

            let failed = outcomes.iter().filter(|(_, outcome)| !outcome.is_success()).count();
            if failed > 0 {
                anyhow::bail!("{} of {} transformations failed", failed, outcomes.len());
            }
        }
        Some(Commands::Tracks { url }) => {
            let controller = Controller::with_config(config, None, false)?;
            controller.tracks(&url).await?;
        }
        Some(Commands::Interactive { keep_jargon, output }) => {
            run_interactive(config, keep_jargon, output).await?;
        }
        None => {
            let output = OutputArgs { output_dir: None, no_export: false, force: false };
            run_interactive(config, false, output).await?;
        }
        Some(Commands::Completions { .. }) => {}
    }

    Ok(())
}

async fn run_interactive(config: Config, keep_jargon: bool, output: OutputArgs) -> Result<()> {
    let controller = Controller::with_config(config, output.output_dir, output.force)?;
    let transformer = match controller.build_transformer(keep_jargon) {
        Ok(transformer) => Some(transformer),
        Err(e) => {
            warn!("{:#}; transformations are disabled for this session", e);
            None
        }
    };

    if let Some(transformer) = &transformer {
        controller.check_provider(transformer).await;
    }

    let stdin = std::io::stdin();
    controller.interactive(transformer.as_ref(), stdin.lock()).await?;
    Ok(())
}

/// Load the config file, apply CLI overrides, fill keys from the environment and validate
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config)?;

    if let Some(provider) = &cli.provider {
        config.llm.provider = provider.clone().into();
    }
    if let Some(model) = &cli.model {
        config.llm.set_model(model.clone());
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    // After the provider override so the key lookup targets the provider in use
    config.apply_env(|name| std::env::var(name).ok());

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}
