//! QFlow CLI - Command-line interface for the QFlow patient queue
//! Front desk operations over the HTTP API

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use qflow_sdk::{Patient, QflowClient, RegisterPatientRequest, Token};
use tabled::{Table, Tabled};

const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Parser)]
#[command(name = "qflow")]
#[command(about = "QFlow patient queue CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API server URL
    #[arg(long, env = "QFLOW_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Patient registry
    #[command(subcommand)]
    Patient(PatientCommand),

    /// Ticket queue
    #[command(subcommand)]
    Token(TokenCommand),

    /// Show server and queue status
    Status,
}

#[derive(Subcommand)]
enum PatientCommand {
    /// Register a new patient
    Register(RegisterArgs),

    /// Show a patient by ID
    Get {
        /// Patient ID
        id: i64,
    },
}

#[derive(Args)]
struct RegisterArgs {
    #[arg(short, long)]
    name: String,

    #[arg(short, long, default_value = "")]
    address: String,

    #[arg(long, default_value = "0")]
    age: i32,

    #[arg(short, long, default_value = "")]
    contact: String,
}

#[derive(Subcommand)]
enum TokenCommand {
    /// Issue the next ticket
    Issue {
        /// Name to print on the ticket
        user_name: String,
    },

    /// List tickets
    List {
        /// Only tickets still waiting
        #[arg(long, conflicts_with = "served")]
        waiting: bool,

        /// Only tickets already served
        #[arg(long)]
        served: bool,
    },

    /// Mark a ticket as served
    Serve {
        /// Token ID (not the T-number)
        id: i64,
    },
}

#[derive(Tabled)]
struct PatientRow {
    id: i64,
    name: String,
    address: String,
    age: i32,
    contact: String,
}

impl From<Patient> for PatientRow {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            name: p.name,
            address: p.address,
            age: p.age,
            contact: p.contact_number,
        }
    }
}

#[derive(Tabled)]
struct TokenRow {
    id: i64,
    ticket: String,
    name: String,
    status: String,
    issued: String,
}

impl From<Token> for TokenRow {
    fn from(t: Token) -> Self {
        let status = if t.is_served { "served" } else { "waiting" };
        Self {
            id: t.id,
            ticket: t.token_number,
            name: t.user_name,
            status: status.to_string(),
            issued: t.date_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

fn served_filter(waiting: bool, served: bool) -> Option<bool> {
    match (waiting, served) {
        (true, _) => Some(false),
        (_, true) => Some(true),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = QflowClient::new(&cli.api_url).context("Invalid API URL")?;

    match cli.command {
        Commands::Patient(PatientCommand::Register(args)) => {
            let patient = client
                .register_patient(&RegisterPatientRequest {
                    name: args.name,
                    address: args.address,
                    age: args.age,
                    contact_number: args.contact,
                })
                .await
                .context("Failed to register patient")?;

            println!("{}", "✓ Patient registered".green().bold());
            println!();
            println!("{}", Table::new(vec![PatientRow::from(patient)]));
        }

        Commands::Patient(PatientCommand::Get { id }) => {
            let patient = client.get_patient(id).await?;
            println!("{}", Table::new(vec![PatientRow::from(patient)]));
        }

        Commands::Token(TokenCommand::Issue { user_name }) => {
            let token = client
                .issue_token(user_name)
                .await
                .context("Failed to issue token")?;

            println!(
                "{}",
                format!("✓ Ticket {} issued", token.token_number)
                    .green()
                    .bold()
            );
            println!();
            println!("{}", Table::new(vec![TokenRow::from(token)]));
        }

        Commands::Token(TokenCommand::List { waiting, served }) => {
            let tokens = client.list_tokens(served_filter(waiting, served)).await?;

            if tokens.is_empty() {
                println!("{}", "No tickets".yellow());
            } else {
                let rows: Vec<TokenRow> = tokens.into_iter().map(TokenRow::from).collect();
                println!("{}", Table::new(rows));
            }
        }

        Commands::Token(TokenCommand::Serve { id }) => {
            let token = client.serve_token(id).await?;
            println!(
                "{}",
                format!("✓ Ticket {} served", token.token_number)
                    .green()
                    .bold()
            );
        }

        Commands::Status => {
            println!("{}", "Queue Status".cyan().bold());
            println!();
            println!("  {} {}", "API URL:".bold(), cli.api_url);

            match client.health().await {
                Ok(health) => {
                    println!("  {} {}", "Status:".bold(), "ONLINE".green());
                    println!("  {} {}", "Version:".bold(), health.version);
                }
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "ERROR".red());
                    println!("  {} {}", "Error:".bold(), e);
                    return Ok(());
                }
            }

            let stats = client.queue_stats().await?;
            println!();
            println!("  {} {}", "Waiting:".bold(), stats.waiting);
            println!("  {} {}", "Served:".bold(), stats.served);
            println!("  {} {}", "Total:".bold(), stats.total);
            println!("  {} {}", "Next Ticket:".bold(), stats.next_token_number);
        }
    }

    Ok(())
}
