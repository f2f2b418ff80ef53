//! Command dispatch: the thin view over the client's published state.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use odoo::{Client, ClientConfig, Config, ConnectionStatus, LoadSummary, ModuleConfig, OutcomeKind};

use crate::cli::{Cli, Command};

pub async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config {
        client: ClientConfig::default()
            .with_server_url(cli.url.clone())
            .with_database(cli.database.clone()),
        modules: ModuleConfig::default(),
    };
    let client = Client::new(config)?;

    connect(&client, &cli).await?;

    match &cli.command {
        Command::Status => {}
        Command::Load => {
            let summary = client.load_required_modules().await;
            print_summary(&summary);
        }
        Command::Check { module } => {
            let status = client.check_module_status(module).await;
            let label = if status.installed {
                status.state.to_string().green()
            } else {
                status.state.to_string().yellow()
            };
            match &status.version {
                Some(version) => println!("{} {} ({version})", status.name.bold(), label),
                None => println!("{} {}", status.name.bold(), label),
            }
            if let Some(error) = &status.error {
                println!("  {}", error.red());
            }
        }
    }

    print_status(&client);
    client.disconnect().await;
    Ok(())
}

async fn connect(client: &Arc<Client>, cli: &Cli) -> Result<()> {
    if cli.username.is_empty() || cli.password.is_empty() {
        anyhow::bail!("username and password are required (set ODOO_PASSWORD or pass --password)");
    }

    match client.connect(&cli.username, &cli.password).await {
        Ok(identity) => {
            println!(
                "{} as {} (uid {})",
                "connected".green().bold(),
                identity.display_name,
                identity.uid
            );
            Ok(())
        }
        Err(failure) => {
            // Cancel the background retry; a one-shot CLI run has no use
            // for a reconnect that would outlive this command.
            client.disconnect().await;
            anyhow::bail!(
                "connect failed after {} attempt(s): {}",
                failure.retry_count.max(1),
                failure.error
            );
        }
    }
}

fn print_summary(summary: &LoadSummary) {
    for result in &summary.results {
        let (mark, label) = match result.outcome {
            OutcomeKind::Loaded => ("ok".green(), result.status.state.to_string().green()),
            OutcomeKind::NotInstalled => {
                ("--".yellow(), result.status.state.to_string().yellow())
            }
            OutcomeKind::Error => ("!!".red(), result.status.state.to_string().red()),
        };
        match &result.status.version {
            Some(version) => println!("  {mark} {} {label} ({version})", result.module.bold()),
            None => println!("  {mark} {} {label}", result.module.bold()),
        }
    }
    println!(
        "{} loaded, {} not installed, {} failed (of {})",
        summary.loaded.to_string().green(),
        summary.not_installed.to_string().yellow(),
        summary.failed.to_string().red(),
        summary.total
    );
}

fn print_status(client: &Arc<Client>) {
    let snapshot = client.snapshot();
    let status = match snapshot.status {
        ConnectionStatus::Connected => snapshot.status.to_string().green(),
        ConnectionStatus::Connecting => snapshot.status.to_string().yellow(),
        ConnectionStatus::Error => snapshot.status.to_string().red(),
        ConnectionStatus::Disconnected => snapshot.status.to_string().normal(),
    };
    println!("status: {status}");
    if !snapshot.verified_modules.is_empty() {
        println!("verified: {}", snapshot.verified_modules.join(", "));
    }
    if let Some(error) = &snapshot.last_error {
        println!("last error: {}", error.red());
    }
}
