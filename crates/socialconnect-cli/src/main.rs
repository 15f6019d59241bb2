mod config;
mod shell;

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use socialconnect_core::{DemoVerifier, Dispatcher, Hub};

use crate::config::Config;
use crate::shell::{Outcome, drain_toasts, execute, parse, prompt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs to stderr, shell output to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "socialconnect=info,socialconnect_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let dispatcher = Dispatcher::with_capacity(config.event_capacity);
    let verifier = DemoVerifier::with_default_bio(config.default_bio.clone());
    let mut hub = if config.seed_demo {
        Hub::with_demo_feed(verifier, dispatcher, chrono::Utc::now())?
    } else {
        Hub::new(verifier, dispatcher)
    };
    let mut toasts = hub.subscribe();

    println!("SocialConnect");
    println!("Connect, Share, Inspire. Type \"help\" for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", prompt(hub.session()));
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        let outcome = execute(&mut hub, command, chrono::Utc::now())?;
        for toast in drain_toasts(&mut toasts) {
            println!("{}", toast);
        }
        match outcome {
            Outcome::Continue(output) => {
                for line in output {
                    println!("{}", line);
                }
            }
            Outcome::Quit => break,
        }
    }

    println!();
    Ok(())
}
