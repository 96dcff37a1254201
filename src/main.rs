use std::process;
use std::sync::Mutex;

use iced::Size;
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

use filterbar::app::{self, State};
use filterbar::config::{self, Config};
use filterbar::router::MemoryRouter;

static BOOT_PARAMS: Mutex<Option<(Config, MemoryRouter, Handle)>> = Mutex::new(None);

fn boot() -> (State, iced::Task<app::Message>) {
    let params = BOOT_PARAMS
        .lock()
        .unwrap()
        .take()
        .expect("boot() called more than once");
    State::new(params.0, params.1, params.2)
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::load();

    // First argument overrides the configured start location
    let start_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.start_url.clone());
    let router = MemoryRouter::new(&start_url);

    // Debounce timers live on this runtime, separate from iced's executor
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("filterbar-timers")
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("filterbar: failed to start timer runtime: {e}");
            process::exit(2);
        }
    };

    let window_size = Size::new(config.window.width, config.window.height);

    tracing::info!("Starting filterbar at {}", start_url);

    *BOOT_PARAMS.lock().unwrap() = Some((config, router, runtime.handle().clone()));

    iced::application(boot, State::update, State::view)
        .title(State::title)
        .subscription(State::subscription)
        .theme(State::theme)
        .window_size(window_size)
        .run()
}
