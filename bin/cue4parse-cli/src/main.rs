//! CUE4Parse CLI - command line front end
//!
//! Reports native feature availability and drives the provider against a
//! game directory.

use anyhow::Result;
use clap::{Parser, Subcommand};
use cue4parse_common::{AesKey, Config, Error, ExportFormat, GameVersion};
use cue4parse_provider::{NativeFeature, Provider, available_features};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "cue4parse")]
#[command(about = "Inspect and export Unreal Engine assets through CUE4Parse")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "cue4parse.toml")]
    config: PathBuf,

    /// Directory containing the game's archive files
    #[arg(short, long)]
    directory: Option<String>,

    /// Unreal Engine version (e.g. GAME_UE5_3, UE4_27, 5.1)
    #[arg(short = 'g', long)]
    game_version: Option<GameVersion>,

    /// AES key as GUID:KEY, or a bare KEY for the main key (repeatable)
    #[arg(short = 'k', long = "aes-key")]
    aes_keys: Vec<AesKey>,

    /// Type mappings file (.usmap)
    #[arg(short, long)]
    mappings: Option<String>,

    /// Path to the CUE4Parse CLI executable
    #[arg(long, env = "CUE4PARSE_CLI")]
    executable: Option<PathBuf>,

    /// Log level
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show which native codecs are compiled in
    ///
    /// With a feature name, exits 0 when it is available and 1 otherwise.
    Features {
        /// Only report this feature (ACL, Oodle; any case)
        name: Option<NativeFeature>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List packages in the game directory
    List {
        /// Only show packages containing this text
        #[arg(short, long)]
        filter: Option<String>,
        /// Maximum number of packages to print
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show a package's exports
    Info {
        /// Package path
        package: String,
        /// Only show exports of this class
        #[arg(long)]
        class: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export an object
    Export {
        /// Object path (package path + object name)
        object: String,
        /// Output file; JSON goes to stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
        /// Output format: json, png, fbx, wav
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,
    },
}

/// Merge the config file with command line flags (flags take precedence)
fn build_config(args: &Args) -> Result<Config> {
    let mut config = Config::load_or_default(&args.config)?;

    if let Some(directory) = &args.directory {
        config.provider.directory_path.clone_from(directory);
    }
    if let Some(version) = args.game_version {
        config.provider.game_version = version;
    }
    config.provider.aes_keys.extend(args.aes_keys.iter().cloned());
    if let Some(mappings) = &args.mappings {
        config.provider.mappings_path = Some(mappings.clone());
    }
    if let Some(executable) = &args.executable {
        config.tool.executable.clone_from(executable);
    }
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    Ok(config)
}

fn print_features(out: &mut impl Write, name: Option<NativeFeature>, json: bool) -> Result<ExitCode> {
    let features = match name {
        Some(feature) => vec![feature.info()],
        None => available_features(),
    };

    if json {
        let value: serde_json::Value = features
            .iter()
            .map(|f| (f.name.to_string(), serde_json::Value::Bool(f.available)))
            .collect::<serde_json::Map<_, _>>()
            .into();
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        writeln!(out, "Native Features")?;
        writeln!(out, "===============")?;
        writeln!(out, "{:<10} {:<10} DESCRIPTION", "NAME", "AVAILABLE")?;
        writeln!(out, "{}", "-".repeat(80))?;
        for feature in &features {
            writeln!(
                out,
                "{:<10} {:<10} {}",
                feature.name,
                if feature.available { "yes" } else { "no" },
                feature.description
            )?;
        }
    }

    Ok(match name {
        Some(feature) if !feature.is_available() => ExitCode::from(1),
        _ => ExitCode::SUCCESS,
    })
}

fn run(command: Commands, config: &Config, out: &mut impl Write) -> Result<ExitCode> {
    let provider = Provider::from_config(config);
    debug!(
        directory = %config.provider.directory_path,
        version = %config.provider.game_version,
        keys = config.provider.aes_keys.len(),
        "provider configured"
    );

    match command {
        Commands::Features { name, json } => return print_features(out, name, json),
        Commands::List { filter, limit } => {
            let packages = provider.list_packages()?;
            let matching: Vec<&String> = packages
                .iter()
                .filter(|p| filter.as_deref().is_none_or(|f| p.contains(f)))
                .collect();
            for package in matching.iter().take(limit.unwrap_or(usize::MAX)) {
                writeln!(out, "{package}")?;
            }
            eprintln!("{} of {} packages", matching.len(), packages.len());
        }
        Commands::Info {
            package,
            class,
            json,
        } => {
            let mut info = provider.load_package(&package)?;
            if let Some(class) = class {
                let filtered: Vec<_> = info.exports_of_class(&class).cloned().collect();
                info.exports = filtered;
            }

            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&info)?)?;
            } else {
                writeln!(out, "Package: {}", info.name)?;
                writeln!(out, "{:<6} {:<40} {:<30} {:<6}", "INDEX", "NAME", "CLASS", "OUTER")?;
                writeln!(out, "{}", "-".repeat(85))?;
                for (index, export) in info.exports.iter().enumerate() {
                    writeln!(
                        out,
                        "{:<6} {:<40} {:<30} {:<6}",
                        index, export.name, export.class_name, export.outer_index
                    )?;
                }
            }
        }
        Commands::Export {
            object,
            output,
            format,
        } => match output {
            Some(output) => {
                provider.export_object(&object, &output, format.as_str())?;
                writeln!(out, "Exported {object} to {output}")?;
            }
            None if format == ExportFormat::Json => {
                let value = provider.export_object_json(&object)?;
                writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            }
            None => {
                return Err(
                    Error::configuration(format!("--output is required for {format} export")).into(),
                );
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<Error>().map_or(1, Error::exit_code)
}

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(exit_code(&e));
        }
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(args.command, &config, &mut std::io::stdout().lock()) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}
