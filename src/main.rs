use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, error};

use expense_tracker::cli::{
    handle_add_command, handle_categories_command, handle_config_command, handle_list_command,
    handle_summary_command, AddArgs, ConfigArgs, RunContext, RunOverrides,
};
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Track expenses against a monthly budget",
    long_about = "Records one expense at a time into a plain text file and shows \
                  how this month's spending compares with your budget, including \
                  how much you can still spend per day."
)]
struct Cli {
    /// Budget to summarize against for this run (overrides the saved budget)
    #[arg(long, global = true, env = "EXPENSE_TRACKER_BUDGET")]
    budget: Option<String>,

    /// Record store to use for this run
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Date to compute the daily budget from (YYYY-MM-DD, default today)
    #[arg(long, global = true, value_name = "DATE")]
    date: Option<String>,

    /// Show debug logging on the console
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an expense, then show the budget summary (default)
    Add(AddArgs),

    /// Show the budget summary without recording anything
    #[command(alias = "report")]
    Summary,

    /// List every recorded expense
    #[command(alias = "ls")]
    List,

    /// List the expense categories
    Categories,

    /// Show or change settings
    Config(ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let paths = match ExpensePaths::new() {
        Ok(paths) => paths,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    // Keeps the log file writer alive until exit
    let _log_guard = match init_logging(&paths, cli.verbose) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match run(cli, &paths) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Unexpected error occurred: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, paths: &ExpensePaths) -> Result<()> {
    let mut settings = Settings::load_or_create(paths)?;
    debug!(base_dir = %paths.base_dir().display(), "Program started");

    let overrides = RunOverrides {
        budget: cli.budget,
        store: cli.store,
        date: cli.date,
    };

    match cli.command.unwrap_or_else(|| Commands::Add(AddArgs::default())) {
        Commands::Add(args) => {
            let ctx = RunContext::resolve(paths, &settings, &overrides)?;
            handle_add_command(&ctx, args)?;
        }
        Commands::Summary => {
            let ctx = RunContext::resolve(paths, &settings, &overrides)?;
            handle_summary_command(&ctx)?;
        }
        Commands::List => {
            let ctx = RunContext::resolve(paths, &settings, &overrides)?;
            handle_list_command(&ctx)?;
        }
        Commands::Categories => handle_categories_command()?,
        Commands::Config(args) => handle_config_command(paths, &mut settings, args)?,
    }

    Ok(())
}
