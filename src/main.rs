mod app;
mod data;
mod model;
mod ui;

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use data::{DataClient, FetchResult};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Endpoint serving the game list
    #[arg(long, default_value = data::DEFAULT_URL)]
    url: String,

    /// Where diagnostic logs are written
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_target(false)
        .with_ansi(false)
        .compact();
    tracing_subscriber::fmt()
        .event_format(format)
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// One activation: exactly one fetch, reported back over the channel.
fn activate(app: &mut App, client: &Arc<DataClient>, tx: &mpsc::Sender<FetchResult>) {
    app.begin_fetch();
    let client = Arc::clone(client);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.fetch_games().await;
        let _ = tx.send(result).await;
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_file = args
        .log_file
        .unwrap_or_else(|| std::env::temp_dir().join("unc-hoops-tui.log"));
    init_logging(&log_file)?;
    let client = Arc::new(DataClient::new(args.url));
    info!(url = %client.url(), "Starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let (tx, mut rx) = mpsc::channel::<FetchResult>(16);

    activate(&mut app, &client, &tx);

    let res = run_app(&mut terminal, &mut app, &client, &tx, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &Arc<DataClient>,
    tx: &mpsc::Sender<FetchResult>,
    rx: &mut mpsc::Receiver<FetchResult>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('r') => activate(app, client, tx),
                    KeyCode::Down => app.next(),
                    KeyCode::Up => app.previous(),
                    KeyCode::Char(c) => app.on_key(c),
                    _ => {}
                }
            }
        }

        while let Ok(result) = rx.try_recv() {
            app.apply_fetch(result);
        }

        if app.should_quit {
            info!("Quitting");
            return Ok(());
        }
    }
}
