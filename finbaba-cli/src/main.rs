use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use finbaba_core::classify;
use finbaba_finance::FinancialSummary;
use finbaba_ingest::{ingest, ingest_path, Ingested, StatementFormat};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod server;
mod state;

#[derive(Parser, Debug)]
#[command(name = "finbaba", version, about = "Bank statement ingestion and summaries")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest a statement file and print its summary
    Summarize {
        /// Statement file (csv, xlsx, xls, pdf, txt)
        file: PathBuf,

        /// Override format detection (csv, spreadsheet, pdf, text)
        #[arg(long)]
        format: Option<StatementFormat>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the category each description is filed under
    Classify {
        #[arg(required = true)]
        descriptions: Vec<String>,
    },

    /// Run the HTTP API and dashboard
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,

        /// Directory with the dashboard's static files
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Manage ~/.finbaba/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Command::Summarize { file, format, json } => summarize(file, format, json)?,

        Command::Classify { descriptions } => {
            for d in &descriptions {
                println!("{:<18} {}", classify(d).name(), d);
            }
        }

        Command::Serve {
            host,
            port,
            static_dir,
        } => {
            let mut server = config::load_config()?.server;
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            if static_dir.is_some() {
                server.static_dir = static_dir;
            }
            server::serve(&server).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn summarize(file: PathBuf, format: Option<StatementFormat>, json: bool) -> Result<()> {
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }

    let ingested = match format {
        Some(format) => {
            let bytes =
                std::fs::read(&file).with_context(|| format!("read {}", file.display()))?;
            ingest(&bytes, format)
        }
        None => ingest_path(&file),
    }
    .with_context(|| format!("ingesting {}", file.display()))?;

    info!(
        "Parsed {} transactions from {}",
        ingested.transactions.len(),
        file.display()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&ingested)?);
    } else {
        print_summary(&ingested);
    }
    Ok(())
}

fn print_summary(ingested: &Ingested) {
    let s: &FinancialSummary = &ingested.summary;

    println!("Transactions: {}", ingested.transactions.len());
    println!("Income:       ${:.2}", s.monthly_income);
    println!("Spending:     ${:.2}", s.monthly_spending);
    println!("Balance:      ${:.2}\n", s.total_balance);

    println!("## Categories\n");
    for (category, total) in &s.category_totals {
        if *total > 0.0 {
            println!("- {:<18} ${:.2}", category.name(), total);
        }
    }

    println!("\n## Trend\n");
    for t in &s.monthly_trend {
        println!(
            "- {}  income=${:.2}  spending=${:.2}",
            t.month, t.income, t.spending
        );
    }

    println!("\n## Insights\n");
    for insight in &s.insights {
        println!("- {}", insight.message);
    }
}
