// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use sion_tools::app_config::{self, Config, MalformedLayoutPolicy};
use sion_tools::errors::AppError;
use sion_tools::extraction::LayoutExtractor;
use sion_tools::scaling::{DocumentKind, ScaleFixer, ScaleRequest};

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
    /// Rescale an Ogre XML mesh or skeleton and optionally convert it to binary
    ScaleFix(ScaleFixArgs),

    /// Extract layout captions into a translation template
    LayoutPot(LayoutPotArgs),

    /// Generate shell completions for siontools
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ScaleFixArgs {
    /// Document type: mesh or skeleton
    #[arg(value_name = "TYPE")]
    document_type: String,

    /// Ogre XML file exported by the modeling tool
    #[arg(value_name = "SOURCE_XML")]
    source: PathBuf,

    /// Where to write the rescaled XML
    #[arg(value_name = "DEST_XML")]
    destination: PathBuf,

    /// Factor every coordinate is multiplied by
    #[arg(value_name = "SCALE", allow_negative_numbers = true)]
    scale: f64,

    /// Binary file produced by the converter
    #[arg(value_name = "DEST_BIN")]
    binary_destination: Option<PathBuf>,

    /// Converter executable, overrides the configuration (empty disables it)
    #[arg(long)]
    converter: Option<String>,
}

#[derive(Parser, Debug)]
struct LayoutPotArgs {
    /// Directory containing the .layout files
    #[arg(value_name = "LAYOUTS_DIR")]
    layouts_dir: PathBuf,

    /// Aggregate translation template to write
    #[arg(value_name = "OUTPUT_POT")]
    output: PathBuf,

    /// Delete the per-layout templates after merging
    #[arg(long)]
    clean: bool,

    /// Skip malformed layouts instead of aborting
    #[arg(long)]
    skip_malformed: bool,
}

/// sion-tools - asset pipeline utilities
///
/// Rescales Ogre XML exports and extracts translatable captions from MyGUI layouts.
#[derive(Parser, Debug)]
#[command(name = "siontools")]
#[command(version)]
#[command(about = "Asset pipeline utilities for Ogre meshes and MyGUI layouts")]
#[command(long_about = "siontools rescales Ogre XML exports and extracts translatable captions from MyGUI layouts.

EXAMPLES:
    siontools scale-fix mesh hero.mesh.xml out/hero.mesh.xml 0.01
    siontools scale-fix skeleton hero.skeleton.xml out/hero.skeleton.xml 0.01 out/hero.skeleton
    siontools layout-pot media/layouts sion.pot
    siontools --log-level debug layout-pot --clean media/layouts sion.pot
    siontools completions bash > siontools.bash

CONFIGURATION:
    Configuration is stored in siontools.json by default. You can specify a
    different config file with --config-path. If the config file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "siontools.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
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

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
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
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() {
    // The logger filters through log::max_level, which is lowered or raised once the config is known
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    // Usage errors exit with 1, help and version with 0
    let cli = match CommandLineOptions::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: CommandLineOptions) -> Result<()> {
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "siontools", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level((&level).into());
    }

    // Bad scale-fix arguments fail before the config file is touched
    let scale_request = match &cli.command {
        Commands::ScaleFix(args) => Some(build_scale_request(args)?),
        _ => None,
    };

    let mut config = Config::load_or_create(&cli.config_path)?;

    // Override config with CLI options if provided
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    match &cli.command {
        Commands::ScaleFix(args) => {
            if let Some(converter) = &args.converter {
                config.converter.path = converter.clone();
            }
        }
        Commands::LayoutPot(args) => {
            if args.clean {
                config.extractor.remove_intermediate_files = true;
            }
            if args.skip_malformed {
                config.extractor.on_malformed_layout = MalformedLayoutPolicy::Skip;
            }
        }
        Commands::Completions { .. } => {}
    }

    config.validate()
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;

    log::set_max_level((&config.log_level).into());

    match (cli.command, scale_request) {
        (Commands::ScaleFix(_), Some(request)) => run_scale_fix(request, &config),
        (Commands::LayoutPot(args), _) => run_layout_pot(args, &config),
        _ => Ok(()),
    }
}

// @returns: Validated scale fix job, without any file access
fn build_scale_request(args: &ScaleFixArgs) -> Result<ScaleRequest> {
    let kind: DocumentKind = args.document_type.parse()?;

    if !args.scale.is_finite() {
        return Err(AppError::Usage(format!("scale factor must be a finite number, got {}", args.scale)).into());
    }

    Ok(ScaleRequest {
        kind,
        source: args.source.clone(),
        destination: args.destination.clone(),
        scale: args.scale,
        binary_destination: args.binary_destination.clone(),
    })
}

fn run_scale_fix(request: ScaleRequest, config: &Config) -> Result<()> {
    info!("Ogre export scale fix");

    let report = ScaleFixer::new(&config.converter)
        .run(&request)
        .with_context(|| format!("Failed to scale {:?}", request.source))?;

    info!(
        "Success: {:?} ({} coordinates scaled{})",
        request.destination,
        report.scaled_triples,
        if report.converted { ", binary written" } else { "" }
    );

    Ok(())
}

fn run_layout_pot(args: LayoutPotArgs, config: &Config) -> Result<()> {
    info!("MyGUI layout - POT converter");

    let progress = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} layouts {msg}")
        .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{bar:40}] {pos}/{len} {msg}"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style.progress_chars("█▓▒░"));

    let report = LayoutExtractor::new(config.extractor.clone())
        .run(&args.layouts_dir, &args.output, &progress)
        .with_context(|| format!("Failed to extract captions from {:?}", args.layouts_dir))?;

    if !report.skipped.is_empty() {
        info!("Skipped {} malformed layout(s)", report.skipped.len());
    }

    info!(
        "Success: {:?} ({} captions from {} layouts)",
        args.output,
        report.captions,
        report.templates.len()
    );

    Ok(())
}
