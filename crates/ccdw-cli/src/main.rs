use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ccdw_client::WarehouseClient;
use ccdw_core::{Config, Frame};
use ccdw_query::{build_query, ColumnSpec, DebugLevel, QueryRequest, Version};

/// ccdw - query client for the CCDW Colleague data warehouse
#[derive(Parser)]
#[command(name = "ccdw")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ccdw.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SQL generated for a query without executing it
    Sql {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Run a query and print the result
    Query {
        #[command(flatten)]
        query: QueryArgs,

        /// Emit the result as JSON instead of delimited text
        #[arg(long)]
        json: bool,
    },

    /// Check that the warehouse connection works
    Ping,

    /// Print the configured institution identifiers
    Info,
}

#[derive(Args)]
struct QueryArgs {
    /// Colleague file (table) to read
    file: String,

    /// Columns to select (comma separated; all columns when omitted)
    #[arg(long, value_delimiter = ',')]
    cols: Vec<String>,

    /// Filter expression (==, !=, [lists], AND/OR; column names unbracketed)
    #[arg(long = "where", default_value = "")]
    filter: String,

    /// Schema to read from
    #[arg(long, default_value = "history")]
    schema: String,

    /// Record versions: current, history or all
    #[arg(long, default_value = "current")]
    version: String,

    /// Separator substituted for '.' in returned column names
    #[arg(long, default_value = ".")]
    sep: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if cli.verbose {
        eprintln!(
            "{} {}/{}",
            "Warehouse:".cyan(),
            config.sql.server,
            config.sql.db
        );
    }

    match &cli.command {
        Commands::Sql { query } => sql_command(&config, query),
        Commands::Query { query, json } => query_command(&config, query, *json, cli.verbose),
        Commands::Ping => ping_command(&config),
        Commands::Info => info_command(&config),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(path) = &cli.config {
        Ok(Config::from_file(path)?)
    } else if Path::new("ccdw.toml").exists() {
        Ok(Config::from_file(Path::new("ccdw.toml"))?)
    } else {
        Err(anyhow::anyhow!(
            "No ccdw.toml found. Pass --config or create one in the working directory."
        ))
    }
}

fn parse_version(value: &str) -> Result<Version> {
    match value {
        "current" => Ok(Version::Current),
        "history" => Ok(Version::History),
        "all" => Ok(Version::All),
        other => Err(anyhow::anyhow!(
            "Unknown version '{other}'. Expected current, history or all."
        )),
    }
}

fn build_request(args: &QueryArgs, verbose: bool) -> Result<QueryRequest> {
    let columns = if args.cols.is_empty() {
        ColumnSpec::All
    } else {
        ColumnSpec::columns(args.cols.iter().cloned())
    };

    let debug = if verbose {
        DebugLevel::Query
    } else {
        DebugLevel::Off
    };

    Ok(QueryRequest::new(args.file.as_str())
        .with_columns(columns)
        .with_filter(args.filter.as_str())
        .with_schema(args.schema.as_str())
        .with_version(parse_version(&args.version)?)
        .with_separator(args.sep.as_str())
        .with_debug(debug))
}

/// Sql command - show the generated statement without connecting
fn sql_command(config: &Config, args: &QueryArgs) -> Result<()> {
    let request = build_request(args, false)?;
    println!("{}", build_query(&request, &config.sql.schema_history));
    Ok(())
}

/// Query command - fetch and print rows
fn query_command(config: &Config, args: &QueryArgs, json: bool, verbose: bool) -> Result<()> {
    let request = build_request(args, verbose)?;
    let client = WarehouseClient::connect(config.clone())?;

    if verbose {
        eprintln!("{} {}", "Fetching".cyan(), args.file);
    }

    let frame = client.fetch(&request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&frame)?);
    } else {
        print_frame(&frame);
    }

    if verbose {
        eprintln!("{} {} row(s)", "Fetched".green(), frame.row_count());
    }

    Ok(())
}

/// Ping command - verify the connection
fn ping_command(config: &Config) -> Result<()> {
    let client = WarehouseClient::connect(config.clone())?;
    client.ping()?;
    println!("{}", "Warehouse connection OK".green());
    Ok(())
}

/// Info command - show institution identifiers
fn info_command(config: &Config) -> Result<()> {
    println!("Institution ID: {}", config.school.instid);
    println!("IPEDS ID:       {}", config.school.ipeds);
    Ok(())
}

fn print_frame(frame: &Frame) {
    println!("{}", frame.columns.join("\t"));
    for row in &frame.rows {
        let cells: Vec<&str> = row
            .iter()
            .map(|cell| cell.as_deref().unwrap_or("NULL"))
            .collect();
        println!("{}", cells.join("\t"));
    }
}
