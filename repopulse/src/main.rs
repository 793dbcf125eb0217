// repopulse/src/main.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "repopulse")]
#[command(about = "Git Repository Health Reports with Declarative Warning Rules", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 📊 Runs the full analysis (collect -> derive -> rules -> insights -> report)
    Report {
        /// Repository directory to analyze
        #[arg(long, default_value = ".")]
        repo_dir: PathBuf,

        /// Skip the language-model insight section
        #[arg(long, default_value = "false")]
        no_insights: bool,
    },

    /// 🧮 Collects raw + derived metrics and prints them
    Metrics {
        /// Repository directory to analyze
        #[arg(long, default_value = ".")]
        repo_dir: PathBuf,

        /// Print as JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// 📏 Lists the effective warning rule catalog (built-ins + rules.yml)
    Rules {
        /// Repository directory whose configuration applies
        #[arg(long, default_value = ".")]
        repo_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `metrics --json` stdout stays machine-readable
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            repo_dir,
            no_insights,
        } => commands::report::execute(repo_dir, no_insights).await?,

        Commands::Metrics { repo_dir, json } => commands::metrics::execute(repo_dir, json).await?,

        Commands::Rules { repo_dir } => commands::rules::execute(repo_dir)?,
    }

    Ok(())
}
