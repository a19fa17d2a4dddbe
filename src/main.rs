//! # order-intake
//!
//! Reads one or more order emails, extracts each into a structured order, admits it into the
//! session ledger and prints the notification, then prints the session's order history.
//!
//! Each file argument is one email. With no arguments, standard input is read as a single
//! email.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ledger_framework::tracing::setup_tracing;
use ledger_framework::{ListOrder, UnkeyedPolicy};
use order_intake::config::{
    IntakeConfig, API_BASE_ENV_VAR, DEFAULT_RECIPIENT, DEFAULT_TIMEOUT_SECS, MODEL_ENV_VAR,
    RECIPIENT_ENV_VAR, TIMEOUT_ENV_VAR, UNKEYED_ENV_VAR,
};
use order_intake::error::IntakeError;
use order_intake::extraction::gemini::{AUTH_ENV_VAR, DEFAULT_API_BASE};
use order_intake::extraction::DEFAULT_MODEL;
use order_intake::ledger::{OrderError, DEFAULT_BUFFER};
use order_intake::lifecycle::IntakeSystem;
use order_intake::report;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::{error, info, info_span, Instrument};

/// Output format for the order history
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Notices and tables for people
    #[default]
    Table,
    /// The history as a JSON array
    Json,
}

/// Extract orders from emails into a deduplicating session ledger
#[derive(Parser)]
#[command(name = "order-intake")]
#[command(version)]
struct Cli {
    /// Email files to process, one email per file (reads stdin when omitted)
    emails: Vec<PathBuf>,

    /// Gemini API key
    #[arg(long, env = AUTH_ENV_VAR, hide_env_values = true)]
    api_key: Option<String>,

    /// Model used for extraction
    #[arg(long, env = MODEL_ENV_VAR, default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the Generative Language API
    #[arg(long, env = API_BASE_ENV_VAR, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Model request timeout in seconds
    #[arg(long, env = TIMEOUT_ENV_VAR, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Address shown as the (simulated) notification recipient
    #[arg(long, env = RECIPIENT_ENV_VAR, default_value = DEFAULT_RECIPIENT)]
    recipient: String,

    /// Handling of orders without an order ID (single-slot, always-admit)
    #[arg(long, env = UNKEYED_ENV_VAR, default_value = "single-slot")]
    unkeyed: UnkeyedPolicy,

    /// History order (insertion, reverse)
    #[arg(long, default_value = "reverse")]
    order: ListOrder,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

impl Cli {
    fn config(&self) -> IntakeConfig {
        IntakeConfig {
            api_key: self.api_key.clone().unwrap_or_default(),
            model: self.model.clone(),
            api_base_url: self.api_base.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            recipient: self.recipient.clone(),
            ledger_buffer: DEFAULT_BUFFER,
            unkeyed_policy: self.unkeyed,
        }
    }
}

/// One email to process, labelled for messages.
struct Email {
    label: String,
    body: String,
}

async fn read_emails(paths: &[PathBuf]) -> Result<Vec<Email>> {
    if paths.is_empty() {
        let mut body = String::new();
        tokio::io::stdin()
            .read_to_string(&mut body)
            .await
            .context("Failed to read email from stdin")?;
        return Ok(vec![Email {
            label: "<stdin>".to_string(),
            body,
        }]);
    }

    let mut emails = Vec::with_capacity(paths.len());
    for path in paths {
        let body = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        emails.push(Email {
            label: path.display().to_string(),
            body,
        });
    }
    Ok(emails)
}

/// Processes one email and prints its outcome. Returns false on a hard failure.
async fn process(
    system: &IntakeSystem,
    email: &Email,
    recipient: &str,
    format: OutputFormat,
) -> bool {
    match system.process_email(&email.body).await {
        Ok(entry) => {
            if let OutputFormat::Table = format {
                println!("{}", report::extracted_data(&entry.raw_candidate));
                println!("{}", report::saved_message(&entry));
                println!();
                println!("{}", report::notification_message(&entry, recipient));
                println!("Item Details");
                println!("{}", report::items_table(&entry.items));
                println!();
            }
            true
        }
        Err(IntakeError::Order(OrderError::DuplicateOrderId { order_id })) => {
            let notice = report::duplicate_notice(order_id.as_deref());
            match format {
                OutputFormat::Table => println!("{notice}"),
                // stdout carries only the JSON history
                OutputFormat::Json => eprintln!("{}: {notice}", email.label),
            }
            true
        }
        Err(e) => {
            error!(email = %email.label, error = %e, "Email not processed");
            eprintln!("{}: {}", email.label, e);
            false
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing();

    let config = cli.config();
    let system = IntakeSystem::from_config(&config)?;
    let emails = read_emails(&cli.emails).await?;

    let mut failed = 0usize;
    for email in &emails {
        let span = info_span!("email", source = %email.label);
        if !process(&system, email, &config.recipient, cli.output)
            .instrument(span)
            .await
        {
            failed += 1;
        }
    }

    let history = system.list_entries(cli.order).await?;
    match cli.output {
        OutputFormat::Table => {
            println!("Order History Saved in Session");
            println!("{}", report::history_table(&history));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
    }

    let stats = system.stats().await?;
    info!(
        admitted = stats.admitted,
        rejected = stats.rejected,
        failed,
        "Session complete"
    );
    system.shutdown().await?;

    if failed > 0 {
        anyhow::bail!("{failed} of {} emails could not be processed", emails.len());
    }
    Ok(())
}
