use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, search::meets_min_length, CheckboxGroup, FormSession, GithubUserSearch,
    SearchDisplay, ViewChange, ViewSnapshot,
};
use shared::protocol::Intent;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// Override the user-search endpoint from settings.
    #[arg(long)]
    endpoint: Option<String>,
    /// Request timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Print the resulting view state as JSON.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up GitHub users matching a term.
    Search { term: String },
    /// Apply checkbox intents to the seeded list and print it.
    Checkboxes {
        #[arg(long = "toggle")]
        toggles: Vec<String>,
        #[arg(long)]
        all: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings().context("failed to load search settings")?;
    if let Some(endpoint) = &cli.endpoint {
        settings = settings
            .with_endpoint(endpoint)
            .context("invalid --endpoint")?;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        settings.request_timeout = Duration::from_millis(timeout_ms.max(1));
    }

    let api = GithubUserSearch::new(&settings).context("failed to build http client")?;
    let session = FormSession::new(Arc::new(api), settings.request_timeout);

    match cli.command {
        Command::Search { term } => {
            let mut events = session.subscribe();
            session.dispatch(Intent::SetQuery { term: term.clone() }).await;
            if meets_min_length(&term) {
                // One extra second past the request timeout for the session to settle.
                let wait = settings.request_timeout + Duration::from_secs(1);
                tokio::time::timeout(wait, async {
                    while let Ok(event) = events.recv().await {
                        if event.change == ViewChange::SearchSettled {
                            break;
                        }
                    }
                })
                .await
                .context("lookup did not settle")?;
            } else {
                tracing::info!(term = %term, "query too short; no lookup issued");
            }
            let snapshot = session.snapshot().await;
            print_snapshot(&snapshot, cli.json, false)?;
        }
        Command::Checkboxes { toggles, all } => {
            if let Some(value) = all {
                session.dispatch(Intent::SetAllChecked { value }).await;
            }
            for label in toggles {
                session.dispatch(Intent::ToggleItem { label }).await;
            }
            let snapshot = session.snapshot().await;
            print_snapshot(&snapshot, cli.json, true)?;
        }
    }

    Ok(())
}

fn print_snapshot(snapshot: &ViewSnapshot, json: bool, checkboxes: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    if checkboxes {
        print_checkboxes(&snapshot.checkboxes);
        return Ok(());
    }

    match snapshot.search.display() {
        SearchDisplay::Results(users) if users.is_empty() => println!("no users found"),
        SearchDisplay::Results(users) => {
            for user in users {
                println!("{:>10}  {:<24} {}", user.id.0, user.login, user.profile_url());
            }
        }
        SearchDisplay::Message(message) => println!("{message}"),
    }
    Ok(())
}

fn print_checkboxes(group: &CheckboxGroup) {
    let mark = |checked: bool| if checked { "[x]" } else { "[ ]" };
    println!("{} {}", mark(group.all_selected()), group.bulk_label());
    for item in group.items() {
        println!("  {} {}", mark(item.checked), item.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_checkbox_intents() {
        let cli = Cli::try_parse_from([
            "desktop",
            "checkboxes",
            "--all",
            "true",
            "--toggle",
            "item2",
            "--toggle",
            "item4",
        ])
        .expect("parse");
        match cli.command {
            Command::Checkboxes { toggles, all } => {
                assert_eq!(toggles, vec!["item2".to_string(), "item4".to_string()]);
                assert_eq!(all, Some(true));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_search_with_overrides() {
        let cli = Cli::try_parse_from([
            "desktop",
            "--endpoint",
            "http://127.0.0.1:9000/search/users",
            "--json",
            "search",
            "octocat",
        ])
        .expect("parse");
        assert!(cli.json);
        assert_eq!(
            cli.endpoint.as_deref(),
            Some("http://127.0.0.1:9000/search/users")
        );
        assert!(matches!(cli.command, Command::Search { term } if term == "octocat"));
    }
}
