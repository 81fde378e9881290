//! Notion Leaves CLI tool
//!
//! A command-line tool showing who is on leave today and who is off next.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::process;
use tracing_subscriber::EnvFilter;

use notion_leaves::config::{NotionConfig, DEFAULT_BASE_URL};
use notion_leaves::date::{
    format_date, is_date_in_range, parse_date_expression, resolve_date, today,
};
use notion_leaves::notion::NotionClient;
use notion_leaves::render::{detail_markdown, render_board};
use notion_leaves::{load_board, Error, LeaveBoard};

/// Notion Leaves - Employees on leave today and upcoming leaves
#[derive(Parser)]
#[command(name = "notion-leaves")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Who is off today, and who is off next
    notion-leaves board

    # The board as it will look next Monday, as JSON
    notion-leaves board --as-of monday --json

    # Details of one leave request
    notion-leaves detail 1a2b3c4d-0000-0000-0000-000000000000

    # Credentials can also come from NOTION_API_KEY / NOTION_DATABASE_ID or a .env file
    notion-leaves --api-key secret_xxx --database-id abc123 board")]
struct Cli {
    #[command(flatten)]
    notion: NotionArgs,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct NotionArgs {
    /// Notion integration token
    #[arg(long, env = "NOTION_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Id of the leave database
    #[arg(long, env = "NOTION_DATABASE_ID", global = true)]
    database_id: Option<String>,

    /// Notion API base URL
    #[arg(long, env = "NOTION_API_URL", global = true, default_value = DEFAULT_BASE_URL)]
    api_url: String,
}

impl NotionArgs {
    fn to_config(&self) -> Result<NotionConfig> {
        let config = NotionConfig::new(
            self.api_key.clone().unwrap_or_default(),
            self.database_id.clone().unwrap_or_default(),
        )
        .context("set --api-key/--database-id or NOTION_API_KEY/NOTION_DATABASE_ID")?;

        Ok(config.with_base_url(&self.api_url))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show employees on leave today and upcoming leaves
    Board {
        /// Day to build the board for (e.g., "today", "friday", "2026-01-14")
        #[arg(long, default_value = "today")]
        as_of: String,

        /// Print the board as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the details of one listed leave record
    Detail {
        /// Notion page id of the record
        id: String,

        /// Day to build the board for (e.g., "today", "friday", "2026-01-14")
        #[arg(long, default_value = "today")]
        as_of: String,
    },

    /// Check whether a date falls within a leave period (inclusive)
    Range {
        /// Date to check
        check: String,
        /// First day of the period
        start: String,
        /// Last day of the period
        end: String,
    },

    /// Format a date the way the board shows it
    Format {
        /// Date to format (e.g., "2024-01-05")
        date: String,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Board { as_of, json } => cmd_board(&cli.notion, &as_of, json),
        Commands::Detail { id, as_of } => cmd_detail(&cli.notion, &id, &as_of),
        Commands::Range { check, start, end } => {
            println!("{}", is_date_in_range(&check, &start, &end));
            Ok(())
        }
        Commands::Format { date } => {
            println!("{}", format_date(&date));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Log to stderr; warnings by default so fetch failures stay visible
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Fetch records and partition them for the as-of day
fn fetch_board(notion: &NotionArgs, as_of: &str) -> Result<LeaveBoard> {
    let expr = parse_date_expression(as_of)?;
    let day = resolve_date(&expr, today())?;

    let client = NotionClient::new(notion.to_config()?)?;
    Ok(load_board(&client, day))
}

fn cmd_board(notion: &NotionArgs, as_of: &str, json: bool) -> Result<()> {
    let board = fetch_board(notion, as_of)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        print!("{}", render_board(&board));
    }

    Ok(())
}

fn cmd_detail(notion: &NotionArgs, id: &str, as_of: &str) -> Result<()> {
    let board = fetch_board(notion, as_of)?;

    let record = board
        .find(id)
        .ok_or_else(|| Error::RecordNotFound(id.to_string()))?;
    print!("{}", detail_markdown(record));

    Ok(())
}
