//! Interactive console loop over the same core as the HTTP server
//!
//! Reads one question per line; `quit`, `exit`, or `q` ends the loop.

use std::io::{BufRead, Write};

use doc_rag::{config::RagConfig, server::state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_rag=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RagConfig::load(None)?;
    let state = AppState::new(config).await?;

    println!("Ready!");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut line = String::new();

    loop {
        print!("\nYour question: ");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let question = line.trim();
        if matches!(question.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }
        if question.is_empty() {
            continue;
        }

        println!("\nQuestion: {}", question);
        match state.ask(question).await {
            Ok(response) => println!("Answer: {}", response.answer),
            Err(e) => println!("Error: {}", e),
        }
    }

    Ok(())
}
