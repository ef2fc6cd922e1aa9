//! recipe CLI: resolve the libbase build configuration for a target.

mod commands;
mod profile;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use recipe_core::RecipeError;
use tracing_subscriber::EnvFilter;

use profile::InputArgs;

#[derive(Parser)]
#[command(name = "recipe", version, about = "libbase build-configuration resolver")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List declared options and whether they apply to the target
    Options {
        #[command(flatten)]
        input: Input,
    },
    /// Resolve options, requirements and toolchain variables
    Resolve {
        #[command(flatten)]
        input: Input,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
        /// Locked dependency version to check, e.g. --pin libcurl=8.12.1
        #[arg(long = "pin", value_name = "NAME=VERSION")]
        pins: Vec<String>,
    },
    /// Resolve and write generator artifacts
    Generate {
        #[command(flatten)]
        input: Input,
        /// Root under which the build layout is created (default: current directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Show the effective settings
    Settings {
        #[command(flatten)]
        input: Input,
        /// Output format (text, toml)
        #[arg(long)]
        format: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
struct Input {
    /// Complete settings file used instead of host detection
    #[arg(long, value_name = "FILE")]
    settings_file: Option<PathBuf>,
    /// Profile file (default: nearest recipe.toml)
    #[arg(long)]
    profile: Option<PathBuf>,
    /// Settings assignment, e.g. -s os=Windows
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    settings: Vec<String>,
    /// Option override, e.g. -o module_wx=True
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    options: Vec<String>,
}

impl From<Input> for InputArgs {
    fn from(input: Input) -> Self {
        InputArgs {
            settings_file: input.settings_file,
            profile: input.profile,
            settings: input.settings,
            options: input.options,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(exit_code(&e));
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Map a failure to the process exit code of its category.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<RecipeError>()
        .map(|e| e.category().exit_code())
        .unwrap_or(1)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Options { input } => {
            let (settings, _) = profile::assemble(&cwd, &input.into())?;
            commands::options::run(&settings)
        }

        Commands::Resolve {
            input,
            format,
            pins,
        } => {
            let (settings, overrides) = profile::assemble(&cwd, &input.into())?;
            commands::resolve::run(&settings, &overrides, format.as_deref(), &pins)
        }

        Commands::Generate { input, output_dir } => {
            let (settings, overrides) = profile::assemble(&cwd, &input.into())?;
            let root = output_dir.unwrap_or_else(|| cwd.clone());
            commands::generate::run(&settings, &overrides, &root).map(|_| ())
        }

        Commands::Settings { input, format } => {
            let (settings, _) = profile::assemble(&cwd, &input.into())?;
            commands::settings::run(&settings, format.as_deref())
        }
    }
}
