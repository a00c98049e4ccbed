//! clippy-chat - talk to Clippy from the terminal

mod commands;
mod config;
mod keys;
mod render;

use clap::Parser;
use clippy_core::{ChatService, ConversationEvent, HttpTransport};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::commands::CommandResult;
use crate::render::EventRenderer;

/// clippy-chat - Clippy, revived, in your terminal
#[derive(Parser, Debug)]
#[command(name = "clippy-chat")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Send a single message and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Chat-completions endpoint (overrides the config file)
    #[arg(long)]
    endpoint: Option<String>,

    /// Token budget per reply (overrides the config file)
    #[arg(long)]
    tokens: Option<u32>,

    /// Store an API key and exit
    #[arg(long, value_name = "KEY")]
    set_key: Option<String>,

    /// Delete the stored API key and exit
    #[arg(long)]
    forget_key: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup tracing
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("clippy_core=debug,clippy_ai=debug,clippy_cli=debug")
            .with_writer(io::stderr)
            .init();
    }

    if args.init_config {
        let path = config::Config::init()?;
        println!("Config file created at: {}", path.display());
        println!("\nExample config:\n{}", config::example_config());
        return Ok(());
    }

    let mut cfg = config::Config::load();
    let key_store = keys::FileKeyStore::default_location();

    if let Some(key) = args.set_key {
        key_store.save(&key)?;
        cfg.has_key = true;
        cfg.save()?;
        println!("API key saved to {}", key_store.path().display());
        return Ok(());
    }

    if args.forget_key {
        key_store.remove()?;
        cfg.has_key = false;
        cfg.save()?;
        println!("API key removed.");
        return Ok(());
    }

    // CLI flags take precedence over the config file
    if args.endpoint.is_some() {
        cfg.api_endpoint = args.endpoint;
    }
    if args.tokens.is_some() {
        cfg.tokens = args.tokens;
    }

    let service = Arc::new(ChatService::new(
        Arc::new(cfg),
        Arc::new(key_store),
        Arc::new(HttpTransport::new()),
    ));

    let mut renderer = EventRenderer::new();
    for message in service.messages() {
        if let Some(line) = renderer.render(&ConversationEvent::Appended { message }) {
            println!("{}", line);
        }
    }
    let mut receiver = service.subscribe();

    if let Some(command) = args.command {
        let outcome = service.send(command).await;
        print_events(&mut receiver, &mut renderer);
        tracing::debug!(?outcome, "One-shot message finished");
        return Ok(());
    }

    run_interactive(&service, &mut receiver, &mut renderer).await
}

async fn run_interactive(
    service: &Arc<ChatService>,
    receiver: &mut broadcast::Receiver<ConversationEvent>,
    renderer: &mut EventRenderer,
) -> anyhow::Result<()> {
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(result) = commands::execute_command(input) {
            match result {
                CommandResult::Reset => service.reset(),
                CommandResult::History => {
                    for message in service.messages() {
                        println!("{}", render::render_message(&message));
                    }
                }
                CommandResult::Message(msg) => println!("{}", msg),
                CommandResult::Exit => break,
                CommandResult::Unknown(cmd) => {
                    println!("Unknown command: /{}", cmd);
                    println!("Type /help for available commands.");
                }
            }
            print_events(receiver, renderer);
            continue;
        }

        service.send(input).await;
        print_events(receiver, renderer);
    }

    Ok(())
}

/// Print everything the conversation emitted since the last call
fn print_events(
    receiver: &mut broadcast::Receiver<ConversationEvent>,
    renderer: &mut EventRenderer,
) {
    loop {
        match receiver.try_recv() {
            Ok(event) => {
                if let Some(line) = renderer.render(&event) {
                    println!("{}", line);
                }
            }
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!("Missed {} conversation events", skipped);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
}
