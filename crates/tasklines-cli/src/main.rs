use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tasklines_core::{Config, TimeUnit};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tasklines", version, about = "Markdown checklist task CLI")]
pub(crate) struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set the status of the task on a line
    Status {
        /// Markdown file
        file: PathBuf,
        /// 1-based line number
        line: usize,
        /// Status indicator, e.g. "x" or "/"
        indicator: char,
    },
    /// Move the task on a line to its next status
    Toggle {
        file: PathBuf,
        line: usize,
    },
    /// Mark the task on a line as done
    Done {
        file: PathBuf,
        line: usize,
    },
    /// Move the task's due, scheduled or start date forward
    Postpone {
        file: PathBuf,
        line: usize,
        /// How many units to move by
        #[arg(long, default_value_t = 1)]
        amount: u32,
        /// days, weeks or months
        #[arg(long, default_value = "days")]
        unit: TimeUnit,
        /// Count from today instead of from the current date
        #[arg(long)]
        fixed: bool,
    },
    /// List the tasks in a file
    List {
        file: PathBuf,
        /// Query instruction, e.g. "not done" or "sort by status"; repeatable
        #[arg(long = "query", short = 'q')]
        queries: Vec<String>,
        /// Print tasks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completion scripts
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(verbose: bool, config: &Config) {
    let filter = if verbose {
        EnvFilter::new("tasklines=debug,tasklines_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(cli.verbose, &config);

    let ctx = commands::Context::new(config, cli.today);
    let result = match cli.command {
        Commands::Status {
            file,
            line,
            indicator,
        } => commands::status::set(&ctx, &file, line, indicator),
        Commands::Toggle { file, line } => commands::status::toggle(&ctx, &file, line),
        Commands::Done { file, line } => commands::status::done(&ctx, &file, line),
        Commands::Postpone {
            file,
            line,
            amount,
            unit,
            fixed,
        } => commands::postpone::run(&ctx, &file, line, amount, unit, fixed),
        Commands::List {
            file,
            queries,
            json,
        } => commands::list::run(&ctx, &file, &queries, json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            commands::completions::run(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
