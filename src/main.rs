//! cfn-tools: dependency graphs and structural diffs for CloudFormation templates.

use anyhow::{Context, Result};
use cfn_tools::{
    cli,
    config::{self, AppConfig, Validatable},
    pipeline::exit_codes,
    reports::{DiffFormat, GraphFormat},
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cfn-tools")]
#[command(version)]
#[command(about = "Dependency graph and structural diff tool for CloudFormation templates", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success (or changes without --fail-on-change)
    1  Changes detected with --fail-on-change
    3  Error occurred

EXAMPLES:
    # Show what each resource and output depends on
    cfn-tools tree template.yaml

    # Render the graph with GraphViz
    cfn-tools tree template.yaml -o dot | dot -Tsvg > graph.svg

    # CI check for template drift
    cfn-tools diff deployed.yaml template.yaml --fail-on-change")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `tree` subcommand
#[derive(Parser)]
struct TreeArgs {
    /// Path to the template
    template: PathBuf,

    /// Include entities without any dependencies or dependents
    #[arg(short, long)]
    all: bool,

    /// Show what uses each entity as well as what it depends on
    #[arg(short, long)]
    both: bool,

    /// Output format
    #[arg(short, long)]
    output: Option<GraphFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the old/baseline template
    old: PathBuf,

    /// Path to the new template
    new: PathBuf,

    /// Include unchanged entries in the output
    #[arg(short, long)]
    long: bool,

    /// Output format
    #[arg(short, long)]
    output: Option<DiffFormat>,

    /// Exit with code 1 if the templates differ
    #[arg(long)]
    fail_on_change: bool,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the dependencies between a template's parameters, resources and outputs
    Tree(TreeArgs),

    /// Compare two templates
    Diff(DiffArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .cfn-tools.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

/// Dispatch to command handlers, returning the exit code.
fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Tree(args) => {
            let overrides = AppConfig::builder()
                .no_color(cli.no_color)
                .quiet(cli.quiet)
                .output_file(args.output_file)
                .tree_all(args.all)
                .tree_both(args.both)
                .build();
            let mut config = load_config(cli.config.as_deref(), &overrides)?;
            if let Some(format) = args.output {
                config.tree.format = format;
            }
            cli::run_tree(&args.template, &config)
        }

        Commands::Diff(args) => {
            let overrides = AppConfig::builder()
                .no_color(cli.no_color)
                .quiet(cli.quiet)
                .output_file(args.output_file)
                .diff_long(args.long)
                .fail_on_change(args.fail_on_change)
                .build();
            let mut config = load_config(cli.config.as_deref(), &overrides)?;
            if let Some(format) = args.output {
                config.diff.format = format;
            }
            cli::run_diff(&args.old, &args.new, &config)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "cfn-tools", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to generate schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => run_config_action(action, cli.config.as_deref()),
    }
}

/// Load the config file, layer CLI overrides on top and validate the result.
fn load_config(path: Option<&std::path::Path>, overrides: &AppConfig) -> Result<AppConfig> {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(path, overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }
    Ok(config)
}

fn run_config_action(action: ConfigAction, explicit: Option<&std::path::Path>) -> Result<i32> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = config::load_or_default(explicit);
            match &loaded_from {
                Some(path) => eprintln!("# Loaded from: {}", path.display()),
                None => eprintln!("# No config file found; showing defaults"),
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            eprintln!("Config file search paths (in order):");
            for dir in config::search_dirs() {
                eprintln!("  {}", dir.display());
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in config::CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(explicit) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".cfn-tools.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            std::fs::write(&target, config::generate_example_config())
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(exit_codes::SUCCESS)
}
