//! Picker - choose one line in the terminal
//!
//! Shows the given items (or the lines of stdin) in a [`tui_listbox::List`]
//! and prints the activated item to stdout on exit.
//!
//! Host loop:
//! 1. Raw crossterm events arrive from the poller task
//! 2. `FrameCollector` folds them into one `FrameInput` per frame
//! 3. The list renders into an off-screen buffer as tall as its content
//! 4. `ScrollIntoView` requests move the `ScrollView`, which blits the
//!    visible rows into the terminal frame
//!
//! # Usage
//!
//! ```sh
//! picker red green blue
//! ls | picker --theme theme.json --keys keys.json --log picker.log
//! ```

mod app;

use std::fs::{self, File};
use std::io::{self, BufRead, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use clap::Parser;
use crossterm::{
    event::{
        DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
        EnableFocusChange, EnableMouseCapture,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use tui_listbox::{default_keybindings, List, ListCommand};
use tui_listbox_core::{spawn_event_poller, Keybindings, PollerConfig, RawEvent, Theme};

use crate::app::Picker;

/// Pick one line from a list
#[derive(Parser, Debug)]
#[command(name = "picker")]
#[command(about = "Choose one item in a terminal list and print it")]
struct Args {
    /// Items to choose from; read from stdin lines when omitted
    items: Vec<String>,

    /// Theme JSON file (`{"colors": {...}, "fonts": {...}}`)
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Keybindings JSON file (`{"select_next": ["down", "j"]}`)
    #[arg(long)]
    keys: Option<PathBuf>,

    /// Write debug logs to this file
    #[arg(long)]
    log: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_deref())?;

    let list = build_list(&args)?;
    tracing::info!(items = list.len(), "starting picker");

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, Picker::new(list)).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    if let Some(label) = result? {
        println!("{label}");
    }
    Ok(())
}

fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn invalid_data(path: &Path, err: impl std::fmt::Display) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("{}: {err}", path.display()),
    )
}

fn build_list(args: &Args) -> io::Result<List> {
    let theme = match &args.theme {
        Some(path) => Theme::from_json(&fs::read_to_string(path)?)
            .map_err(|err| invalid_data(path, err))?,
        None => Theme::default(),
    };

    let keybindings = match &args.keys {
        Some(path) => {
            let user = Keybindings::<ListCommand>::from_json(&fs::read_to_string(path)?)
                .map_err(|err| invalid_data(path, err))?;
            Keybindings::merge(default_keybindings(), user)
        }
        None => default_keybindings(),
    };

    let items = if args.items.is_empty() {
        read_stdin_items()?
    } else {
        args.items.clone()
    };

    let mut list = List::new(Arc::new(theme)).with_keybindings(keybindings);
    for item in items {
        list.add_item(item);
    }
    Ok(list)
}

fn read_stdin_items() -> io::Result<Vec<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(Vec::new());
    }
    stdin
        .lock()
        .lines()
        .filter(|line| !line.as_ref().is_ok_and(|l| l.trim().is_empty()))
        .collect()
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: Picker,
) -> io::Result<Option<String>> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(event_tx, PollerConfig::default(), cancel_token.clone());

    loop {
        if app.needs_render() {
            terminal.draw(|frame| {
                let area = frame.area();
                app.draw(frame.buffer_mut(), area, Instant::now());
            })?;
            // a redraw request is served without waiting for input
            if app.needs_render() && !app.should_quit() {
                continue;
            }
        }

        if app.should_quit() {
            break;
        }

        let Some(raw) = event_rx.recv().await else {
            break;
        };
        app.handle_event(raw, Instant::now());
        while let Ok(raw) = event_rx.try_recv() {
            app.handle_event(raw, Instant::now());
        }
    }

    cancel_token.cancel();
    Ok(app.chosen())
}
