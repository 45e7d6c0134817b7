//! Interactive command loop.
//!
//! Reads commands from stdin, one per line, and prints the router's reply.
//!
//! Run with: cargo run -p orchestrator --example interactive
//!
//! Configuration via .env file or environment variables:
//!   TOOLKIT_API_URL    - Toolkit service URL (default: http://localhost:8000)
//!   HF_API_KEY         - Key for the zero-shot classifier
//!   CHATGPT_API_KEY    - Enables the ChatGPT backend
//!   CLAUDE_API_KEY     - Enables the Claude backend
//!   GEMINI_API_KEY     - Enables the Gemini backend
//!   LLAMA_API_KEY      - Hugging Face token, enables the LLaMA backend
//!   ROUTER_POLICY      - `explicit` (default) or `topic`
//!   ROUTER_BACKEND     - Backend selected at startup (optional)

use orchestrator::Orchestrator;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("orchestrator=info".parse()?)
                .add_directive("vendor_brain=info".parse()?)
                .add_directive("toolkit_client=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let orchestrator = Orchestrator::from_env()?;
    let mut session = orchestrator.new_session();

    if let Ok(backend) = std::env::var("ROUTER_BACKEND") {
        if !session.select_backend(&backend, None) {
            eprintln!("Ignoring unknown ROUTER_BACKEND `{}`", backend);
        }
    }

    info!(policy = ?orchestrator.config().policy, "Router ready");
    println!("Type a command, \"help\" for examples, or \"exit\" to quit.");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if command.eq_ignore_ascii_case("exit") || command.eq_ignore_ascii_case("quit") {
            break;
        }

        let reply = orchestrator.process_command(&mut session, command).await;
        println!("{}\n", reply);
    }

    Ok(())
}
