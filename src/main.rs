use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

use pathcomplete::config::{self, Config};
use pathcomplete::{HttpPathApi, PathApi, PathCache, TomlFileCache};

mod app;

use app::App;

/// Folder-path entry with remote autocompletion and validation
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Base URL of the path API (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Config file to use instead of ~/.config/pathcomplete/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// File that remembers the last value of each field
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = load_config(&args)?;
    let api: Arc<dyn PathApi> = Arc::new(HttpPathApi::from_config(&config.api)?);
    let cache = open_cache(&config);
    let (runtime, shutdown) = spawn_runtime()?;

    let terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;

    let app = App::new(&config, api, cache, runtime, Instant::now());
    let result = run(terminal, app);

    execute!(stdout(), DisableMouseCapture)?;
    ratatui::restore();
    let _ = shutdown.send(());

    result
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    // The terminal is in raw mode, so logs only ever go to a file
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("pathcomplete=debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => config::load_config_from_path(path)?,
        None => config::load_config()?,
    };
    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(cache) = &args.cache {
        config.cache.path = Some(cache.clone());
    }
    Ok(config)
}

/// A broken cache file costs the remembered values, not the session
fn open_cache(config: &Config) -> Option<Arc<dyn PathCache>> {
    let path = config.cache_path()?;
    match TomlFileCache::open(&path) {
        Ok(cache) => Some(Arc::new(cache)),
        Err(e) => {
            log::warn!("Ignoring cache at {}: {}", path.display(), e);
            None
        }
    }
}

/// Run a current-thread runtime on its own thread until `shutdown` fires.
/// Fields spawn their requests onto the returned handle.
fn spawn_runtime() -> Result<(Handle, oneshot::Sender<()>)> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let handle = runtime.handle().clone();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    std::thread::spawn(move || {
        runtime.block_on(async {
            let _ = shutdown_rx.await;
        });
        log::debug!("Request runtime shutting down");
    });

    Ok((handle, shutdown_tx))
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        let now = Instant::now();
        app.tick(now);

        terminal.draw(|frame| app.render(frame))?;

        if app.should_quit() {
            break;
        }

        if event::poll(app.poll_timeout(now))? {
            let event = event::read()?;
            app.handle_event(event, Instant::now());
        }
    }

    Ok(())
}
