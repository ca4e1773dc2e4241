use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use docs_query::config::{default_config_path, find_config_file, load_config, Config};
use docs_query::query::{DocumentsQuery, QueryParameters};
use docs_query::utils::validate_feed_uri;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// docs-query - Compose request URIs for document-storage feeds
#[derive(Parser, Debug)]
#[command(name = "docs-query")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compose request URIs for document-storage feeds", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (plain if TTY, JSON otherwise)
    Auto,
    /// Table of the rendered parameters
    Table,
    /// JSON format (machine-readable)
    Json,
    /// The bare URI
    Plain,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compose a documents feed query URI
    #[command(alias = "u")]
    Uri(UriArgs),

    /// Manage the configuration file
    Config {
        /// Subcommand
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args, Debug, Default)]
struct UriArgs {
    /// Feed base URI (default: from configuration)
    #[arg(long)]
    feed: Option<String>,

    /// Free-text search term
    #[arg(long)]
    q: Option<String>,

    /// Author filter
    #[arg(long)]
    author: Option<String>,

    /// Category path (e.g. "document/starred")
    #[arg(long)]
    category: Option<String>,

    /// One-based index of the first result
    #[arg(long)]
    start_index: Option<u32>,

    /// Maximum number of results
    #[arg(long)]
    max_results: Option<u32>,

    /// Fetch a single entry; collection filters are ignored
    #[arg(long)]
    entry_id: Option<String>,

    /// Folder to search in
    #[arg(long)]
    folder: Option<String>,

    /// Title or title fragment
    #[arg(long)]
    title: Option<String>,

    /// Match the title exactly
    #[arg(long, requires = "title")]
    exact_title: bool,

    /// Include deleted documents
    #[arg(long, overrides_with = "no_show_deleted")]
    show_deleted: bool,

    /// Exclude deleted documents, even if the configuration includes them
    #[arg(long, overrides_with = "show_deleted")]
    no_show_deleted: bool,

    /// Include folders
    #[arg(long, overrides_with = "no_show_folders")]
    show_folders: bool,

    /// Exclude folders, even if the configuration includes them
    #[arg(long, overrides_with = "show_folders")]
    no_show_folders: bool,

    /// Collaborator e-mail address (repeatable, order preserved)
    #[arg(long = "writer", value_name = "ADDRESS")]
    writers: Vec<String>,

    /// Reader e-mail address (repeatable, order preserved)
    #[arg(long = "reader", value_name = "ADDRESS")]
    readers: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Where to write (default: per-user config directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let config_path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => find_config_file(),
    };
    let config = load_config(config_path.as_deref()).context("failed to load configuration")?;

    // Initialize tracing; the config level only applies without -v/-q
    let filter = log_filter(
        std::env::var("RUST_LOG").ok(),
        cli.verbose,
        cli.quiet,
        &config.logging.level,
    );

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    match cli.command {
        Some(Commands::Uri(args)) => {
            let feed = resolve_feed(args.feed.as_deref(), &config)?;
            let query = build_query(&args, &config)?;
            let uri = query.compose_uri(&feed);
            output_uri(&uri, &query, cli.output)?;
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Init { path, force } => {
                let path = match path.or_else(default_config_path) {
                    Some(path) => path,
                    None => bail!("no configuration directory available; pass --path"),
                };
                if path.exists() && !force {
                    bail!("{} already exists (use --force to overwrite)", path.display());
                }
                Config::default().save(&path)?;
                if !cli.quiet {
                    println!("Wrote {}", path.display());
                }
            }
            ConfigCommands::Show => {
                print!("{}", config.to_toml()?);
            }
        },
        None => {
            let feed = resolve_feed(None, &config)?;
            let query = build_query(&UriArgs::default(), &config)?;
            println!("{}", query.compose_uri(&feed));
        }
    }

    Ok(())
}

/// Pick the tracing filter: `RUST_LOG`, then `-q`/`-v`, then the config level
fn log_filter(rust_log: Option<String>, verbose: u8, quiet: bool, config_level: &str) -> String {
    if let Some(filter) = rust_log.filter(|f| !f.is_empty()) {
        return filter;
    }

    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };

    format!("docs_query={}", level)
}

/// Feed URI from the command line, else from configuration, validated either way
fn resolve_feed(cli_feed: Option<&str>, config: &Config) -> Result<String> {
    let feed = cli_feed.unwrap_or(&config.feed.base_uri);
    validate_feed_uri(feed).with_context(|| format!("invalid feed URI {:?}", feed))
}

/// An explicit `--flag`/`--no-flag` wins over the configured default
fn flag_or_default(on: bool, off: bool, default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        default
    }
}

/// Apply configuration defaults, then command-line filters
fn build_query(args: &UriArgs, config: &Config) -> Result<DocumentsQuery> {
    let mut query = DocumentsQuery::new(args.q.as_deref());

    let base = query.base_mut();
    base.set_author(args.author.as_deref());
    base.set_categories(args.category.as_deref());
    base.set_entry_id(args.entry_id.as_deref());
    if let Some(start_index) = args.start_index {
        base.set_start_index(start_index);
    }
    if let Some(max_results) = args.max_results.or(config.defaults.max_results) {
        base.set_max_results(max_results);
    }

    query.set_folder_id(args.folder.as_deref());
    query.set_title(args.title.as_deref(), args.exact_title);
    query.set_show_deleted(flag_or_default(
        args.show_deleted,
        args.no_show_deleted,
        config.defaults.show_deleted,
    ));
    query.set_show_folders(flag_or_default(
        args.show_folders,
        args.no_show_folders,
        config.defaults.show_folders,
    ));

    for address in &args.writers {
        query
            .add_collaborator(address)
            .with_context(|| format!("invalid --writer {:?}", address))?;
    }
    for address in &args.readers {
        query
            .add_reader(address)
            .with_context(|| format!("invalid --reader {:?}", address))?;
    }

    Ok(query)
}

fn output_uri(uri: &str, query: &DocumentsQuery, format: OutputFormat) -> Result<()> {
    let actual_format = if format == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Plain
        } else {
            OutputFormat::Json
        }
    } else {
        format
    };

    match actual_format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "uri": uri, "query": query });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", uri);
        }
        OutputFormat::Table => {
            use comfy_table::{Attribute, Cell, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["Parameter", "Value"]);

            let (path, params) = uri.split_once('?').unwrap_or((uri, ""));
            table.add_row(vec![
                Cell::new("(path)").add_attribute(Attribute::Bold),
                Cell::new(path),
            ]);
            for pair in params.split('&').filter(|p| !p.is_empty()) {
                let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
                let value = urlencoding::decode(value)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| value.to_string());
                table.add_row(vec![
                    Cell::new(name).add_attribute(Attribute::Bold),
                    Cell::new(value),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Auto => unreachable!(),
    }

    Ok(())
}
