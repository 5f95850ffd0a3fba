//! Party Board
//!
//! Terminal board for organizing who brings which dish. Drag couples into
//! categories, name dishes, and watch the board sync with the backend.
//!
//! Run with: cargo run --bin party-board -- [--offline] [--api-url URL]

use anyhow::Context;
use clap::Parser;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use party_board::console::HELP;
use party_board::{
    logging, render, Backend, Board, BoardSession, Command, Config, Console, ConsoleError,
    HttpBackend, MemoryBackend, Reply,
};

#[derive(Parser)]
#[command(name = "party-board")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Drag-and-drop dish organizer for parties")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend REST API URL, including the /api prefix
    #[arg(long)]
    api_url: Option<String>,

    /// Use a throwaway in-memory backend instead of the REST API
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(url) = args.api_url {
        config.client.api_url = url;
    }
    logging::init(&config.logging);

    tracing::info!("Starting party board v{}", env!("CARGO_PKG_VERSION"));

    let backend: Arc<dyn Backend> = if args.offline {
        tracing::info!("Running offline with an in-memory backend");
        Arc::new(MemoryBackend::with_default_categories(
            config.server.default_capacity,
        ))
    } else {
        tracing::info!(api_url = %config.client.api_url, "Using REST backend");
        Arc::new(HttpBackend::new(config.client.http()).context("Failed to build HTTP client")?)
    };

    let console = Console::new(BoardSession::new(backend, config.client.session()));
    run(&console).await?;

    console.session().shutdown();
    tracing::info!("Party board stopped");
    Ok(())
}

async fn run(console: &Console) -> anyhow::Result<()> {
    let session = console.session();
    let mut updates = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    draw(&session.snapshot(), console);
    session.check_health().await;
    let mut shown = session.snapshot();
    draw(&shown, console);

    loop {
        prompt();

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };

                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(ConsoleError::Empty) => continue,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };

                let reply = console.execute(command).await;
                shown = session.snapshot();
                updates.borrow_and_update();

                match reply {
                    Ok(Reply::Quit) => break,
                    Ok(Reply::Help) => println!("{}", HELP),
                    Ok(Reply::Redraw) => draw(&shown, console),
                    Ok(Reply::Message(message)) => {
                        draw(&shown, console);
                        println!("{}", message);
                    }
                    Err(e) => {
                        draw(&shown, console);
                        println!("{}", e);
                    }
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                // Background refreshes only redraw when something visible moved
                let board = updates.borrow_and_update().clone();
                if visibly_changed(&shown, &board) {
                    draw(&board, console);
                }
                shown = board;
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    Ok(())
}

fn visibly_changed(before: &Board, after: &Board) -> bool {
    before.backend_ready() != after.backend_ready()
        || before.categories() != after.categories()
        || before.error() != after.error()
}

fn draw(board: &Board, console: &Console) {
    let mut stdout = std::io::stdout();
    if stdout.is_terminal() {
        // Clear screen, cursor home
        print!("\x1b[2J\x1b[H");
    }
    println!("{}", render::screen(board, console.session().placeholders()));
    let _ = stdout.flush();
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
