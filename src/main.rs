use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::{mpsc, Semaphore};
use tracing::{error, info, warn};

use gatefold::access::JsonRpcChain;
use gatefold::app::cli::Args;
use gatefold::app::config::AppConfig;
use gatefold::app::events::AppEvent;
use gatefold::app::session::{self, Services};
use gatefold::app::{inputs, App};
use gatefold::fetch::HttpFetcher;
use gatefold::gallery::download::Downloader;
use gatefold::preview::PreviewLoader;
use gatefold::storage::{PhotoSourceAdapter, SupabaseStorage};
use gatefold::{logging, ui};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    let args = Args::parse();

    if args.generate_config {
        print!("{}", AppConfig::default().to_toml_string()?);
        return Ok(());
    }

    // 1. Config: file, then environment, then flags 🔧
    let config_path = args.config.clone().unwrap_or_else(AppConfig::get_config_path);
    let mut config = AppConfig::load_from(&config_path)?;
    config.apply_env(|name| std::env::var(name).ok());
    if let Some(view) = args.view {
        config.gallery.view_mode = view;
    }
    if let Some(ref dir) = args.download_dir {
        config.gallery.download_dir = Some(dir.clone());
    }
    let startup_address = args.address.clone().or_else(|| config.access.wallet_address.clone());

    // Without storage there is nothing to show
    let credentials = config.storage_credentials()?;

    let _log_guard = logging::init(args.log_level)?;
    info!(config = %config_path.display(), "starting gatefold");

    // 2. Clients (one shared HTTP pool, timeouts set per request)
    let request_timeout = config.request_timeout();
    let client = reqwest::Client::builder()
        .user_agent(concat!("gatefold/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(request_timeout)
        .build()
        .context("could not build HTTP client")?;

    let chain = Arc::new(
        JsonRpcChain::new(client.clone(), &config.chain.rpc_url, &config.chain.contract)
            .with_timeout(request_timeout),
    );
    let store = Arc::new(
        SupabaseStorage::new(
            client.clone(),
            &credentials.url,
            &config.storage.bucket,
            &credentials.key,
        )?
        .with_timeout(request_timeout),
    );
    let photos = Arc::new(PhotoSourceAdapter::new(
        store,
        &config.storage.prefix,
        config.storage.page_limit,
    ));
    let preview_fetcher = Arc::new(HttpFetcher::new(client.clone()).with_timeout(Some(request_timeout)));
    // Originals can be large; only the download limit applies to them
    let download_fetcher = Arc::new(HttpFetcher::new(client).with_timeout(config.download_timeout()));
    let download_dir = config.download_dir();
    info!(
        dir = %download_dir.display(),
        timeout = ?download_fetcher.timeout(),
        "downloads go here"
    );

    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let services = Services {
        chain,
        photos,
        downloader: Arc::new(Downloader::new(download_fetcher, download_dir)),
        previews: Arc::new(PreviewLoader::new(preview_fetcher, config.gallery.preview_max_dim)),
        preview_permits: Arc::new(Semaphore::new(config.gallery.max_concurrent_previews.max(1))),
        events: tx.clone(),
    };

    let mut app = App::new(&config, ui::theme::load_current_theme());
    if let Some(address) = startup_address {
        if let Err(e) = session::connect(&mut app, &services, &address) {
            warn!(error = %e, "ignoring startup address");
            app.show_toast(&format!("❌ {}", e));
        }
    }

    // 3. Terminal
    let mut terminal = setup_terminal()?;

    // Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // Tick Task ⚡ (toasts, loading overlays)
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });
    drop(tx);

    let result = run(&mut terminal, &mut app, &services, &mut rx).await;
    restore_terminal(&mut terminal)?;
    if let Err(ref e) = result {
        error!(error = %e, "exiting on error");
    }
    info!("bye");
    result
}

async fn run(
    terminal: &mut Tui,
    app: &mut App,
    services: &Services,
    rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    while app.is_running {
        terminal.draw(|f| ui::ui(f, app))?;
        // Tiles drawn this frame decide which previews to fetch
        session::request_previews(app, services);

        let Some(event) = rx.recv().await else {
            break;
        };
        match event {
            AppEvent::Input(Event::Key(key)) => inputs::handle_key(key, app, services),
            AppEvent::Input(Event::Mouse(mouse)) => inputs::handle_mouse(mouse, app, services),
            AppEvent::Input(_) => {}
            other => session::handle_app_event(app, services, other),
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
