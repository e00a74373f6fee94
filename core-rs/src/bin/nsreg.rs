//! nsreg - namespace registry CLI
//!
//! Resolves prefixes, qnames and URIs against the dataset registry

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use nsreg_core::{
    FetchOutcome, Registry, RegistryConfig, RegistryEntry, RegistryError, UnregisteredAction, UriScheme,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nsreg")]
#[command(version)]
#[command(about = "Namespace registry: prefix and URI resolution", long_about = None)]
struct Cli {
    /// YAML settings file
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,
    /// Directory for the cached registry
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,
    /// Remote registry URL (http(s):// or file://)
    #[arg(long, global = true)]
    remote_url: Option<String>,
    /// Days before the cached registry is refreshed (0: never)
    #[arg(long, global = true)]
    cache_days: Option<u32>,
    /// What to do with prefixes missing from the registry
    #[arg(long, global = true)]
    action: Option<ActionArg>,
    /// Comma-separated URI scheme priority (original,bio2rdf,identifiers.org)
    #[arg(long, global = true, value_delimiter = ',')]
    scheme_priority: Option<Vec<String>>,
    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh the cached registry
    Fetch {
        /// Download even when the cache is fresh
        #[arg(long)]
        force: bool,
    },
    /// Resolve prefixes to their canonical form
    Prefix {
        prefixes: Vec<String>,
    },
    /// Rewrite qnames with canonical prefixes
    Map {
        qnames: Vec<String>,
        /// Prefix/identifier delimiter
        #[arg(long, short = 'd', default_value = ":")]
        delimiter: String,
    },
    /// Build fully-qualified URIs for qnames
    Uri {
        qnames: Vec<String>,
        /// Force a scheme instead of the priority order
        #[arg(long, short = 's')]
        scheme: Option<String>,
    },
    /// Show the registry entry for a prefix
    Entry {
        prefix: String,
        #[arg(long, default_value = "yaml")]
        format: OutputFormat,
    },
    /// List registered namespaces
    List {
        /// Include the derived _vocabulary and _resource namespaces
        #[arg(long)]
        all: bool,
    },
    /// Print the effective settings
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum ActionArg {
    Continue,
    Die,
    Fail,
}

impl From<ActionArg> for UnregisteredAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Continue => UnregisteredAction::Continue,
            ActionArg::Die => UnregisteredAction::Die,
            ActionArg::Fail => UnregisteredAction::Fail,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("NSREG_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<RegistryConfig> {
    let mut config = match &cli.config {
        Some(path) => RegistryConfig::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => RegistryConfig::default(),
    };
    config.apply_env()?;

    if let Some(dir) = &cli.cache_dir {
        config.set_local_dir(dir.clone())?;
    }
    if let Some(url) = &cli.remote_url {
        config.set_remote_url(url)?;
    }
    if let Some(days) = cli.cache_days {
        config.cache_time_days = days;
    }
    if let Some(action) = cli.action {
        config.unregistered_ns_action = action.into();
    }
    if let Some(names) = &cli.scheme_priority {
        config.set_scheme_priority_names(names.as_slice())?;
    }

    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let registry = Registry::new(config);

    match cli.command {
        Commands::Fetch { force } => {
            if force {
                let bytes = registry.download()?;
                println!("{} Downloaded {} bytes to {}", "✓".green(), bytes, registry.local_registry_path().display());
            } else {
                match registry.refresh()? {
                    FetchOutcome::Downloaded { bytes, .. } => println!(
                        "{} Downloaded {} bytes to {}",
                        "✓".green(),
                        bytes,
                        registry.local_registry_path().display()
                    ),
                    FetchOutcome::Skipped(freshness) => println!(
                        "{} Kept {} ({:?})",
                        "✓".green(),
                        registry.local_registry_path().display(),
                        freshness
                    ),
                }
            }
        }

        Commands::Prefix { prefixes } => {
            for prefix in prefixes {
                match registry.preferred_prefix(&prefix)? {
                    Some(preferred) => println!("{}\t{}", prefix, preferred),
                    None => println!("{}\t{}", prefix, "-".red()),
                }
            }
        }

        Commands::Map { qnames, delimiter } => {
            for qname in qnames {
                println!("{}\t{}", qname, registry.map_qname_with(&qname, &delimiter)?);
            }
        }

        Commands::Uri { qnames, scheme } => {
            let scheme = scheme.map(|s| s.parse::<UriScheme>()).transpose()?;
            for qname in qnames {
                match registry.fq_uri(&qname, scheme)? {
                    Some(uri) => println!("{}\t{}", qname, uri),
                    None => println!("{}\t{}", qname, "-".red()),
                }
            }
        }

        Commands::Entry { prefix, format } => {
            let entry = registry.entry(&prefix)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entry)?),
                OutputFormat::Yaml => print!("{}", serde_yaml::to_string(entry)?),
            }
        }

        Commands::List { all } => {
            let index = registry.initialize()?;
            let entries: Box<dyn Iterator<Item = &RegistryEntry> + '_> = if all {
                Box::new(index.entries())
            } else {
                Box::new(index.datasets())
            };
            for entry in entries {
                println!(
                    "{}\t{}\t{}",
                    entry.prefix.as_str().bold(),
                    entry.title().unwrap_or("-"),
                    entry.homepage().unwrap_or("-")
                );
            }
        }

        Commands::Config => {
            print!("{}", serde_yaml::to_string(registry.config())?);
        }
    }

    registry.print_no_match_list(&mut std::io::stderr())?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<RegistryError>() {
                Some(RegistryError::UnresolvedNamespace(prefix)) => {
                    eprintln!("{} Unable to map {}; unregistered namespace action is 'die'", "✗".red(), prefix);
                }
                Some(registry_err) if registry_err.is_fatal() => {
                    eprintln!("{} {}", "✗".red(), registry_err);
                    eprintln!("  {}", "Registry unavailable: check --remote-url and --cache-dir".yellow());
                }
                _ => eprintln!("{} {:#}", "✗".red(), err),
            }
            ExitCode::FAILURE
        }
    }
}
