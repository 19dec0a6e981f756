#![allow(clippy::expect_used, clippy::print_stdout)]
//! Example: open a session and dump the newest page of the inbox.
//!
//! ## Running
//!
//! ```bash
//! export MAILPANE_SETTINGS="providers.json"
//! export MAILPANE_EMAIL="you@example.com"
//! export MAILPANE_PASSWORD="app-password"
//! cargo run --package mailpane-core --example inbox_dump
//! ```

use std::env;

use mailpane_core::{Engine, EngineEvent, SessionConfig, SettingsResolver, event_channel, session};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings_path =
        env::var("MAILPANE_SETTINGS").expect("MAILPANE_SETTINGS environment variable not set");
    let email = env::var("MAILPANE_EMAIL").expect("MAILPANE_EMAIL environment variable not set");
    let password =
        env::var("MAILPANE_PASSWORD").expect("MAILPANE_PASSWORD environment variable not set");

    let resolver = SettingsResolver::from_file(&settings_path)?;
    let (events, mut rx) = event_channel();

    let source = session::open(
        &resolver,
        &email,
        &password,
        &SessionConfig::default(),
        &events,
    )
    .await?;

    let engine = Engine::new(source, events);
    engine.refresh().await?;
    engine.shutdown().await;
    drop(engine);

    while let Some(event) = rx.recv().await {
        match event {
            EngineEvent::Status(text) => println!("[status] {text}"),
            EngineEvent::MailboxLoaded { total, page_count } => {
                println!("{total} messages across {page_count} pages");
            }
            EngineEvent::Page(view) => {
                println!("--- page {} of {} ---", view.page + 1, view.page_count);
                for row in &view.rows {
                    println!("{:>6}  {:<20}  {:<40}  {}", row.id, row.date, row.subject, row.from);
                }
            }
            _ => {}
        }
    }

    Ok(())
}
