//! clipshelf command-line entry point.
//!
//! Three modes: `history` prints the saved entries, `pick` opens the
//! interactive picker, and `watch` (the default) runs the background
//! poller until the process is terminated.

mod clipboard;

use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clipshelf::picker::Picker;
use clipshelf::poller::Poller;
use clipshelf::Config;

use crate::clipboard::SystemClipboard;

#[derive(Parser)]
#[command(name = "clipshelf", version, about = "Terminal clipboard history manager")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the saved history, newest first
    History,
    /// Search, preview and re-copy a past entry
    Pick,
    /// Watch the clipboard and record new values (default)
    Watch,
}

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::load();
    let store = config.store();

    match Cli::parse().command.unwrap_or(Command::Watch) {
        Command::History => {
            for (index, entry) in store.list_history().iter().enumerate() {
                println!(
                    "{:>4}  {}  [x{} {}]",
                    index,
                    entry.value.replace('\n', " "),
                    entry.count,
                    entry.age_label()
                );
            }
        }
        Command::Pick => {
            let mut clipboard = SystemClipboard::new()?;
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            Picker::new(&store, &mut clipboard)
                .with_display_cap(config.display_cap)
                .run(&mut input, &mut output)?;
        }
        Command::Watch => {
            let clipboard = SystemClipboard::new()?;
            log::info!(
                "watching clipboard every {}ms, history at {}",
                config.poll_interval_ms,
                store.path().display()
            );
            Poller::new(store, clipboard)
                .with_interval(config.poll_interval())
                .run();
        }
    }
    Ok(())
}
