use std::io::{self, Read};
use std::process;
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

use filterbar::config;
use filterbar::replay;
use filterbar::router::MemoryRouter;
use filterbar::search::SearchControl;

const USAGE: &str = "usage: filterbar-replay [--url <href>] [script]";

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = config::load();

    let mut start_url = config.start_url.clone();
    let mut script_path = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => match args.next() {
                Some(url) => start_url = url,
                None => fail(USAGE),
            },
            "-h" | "--help" => {
                println!("{USAGE}");
                println!();
                println!("Reads a replay script from the file or stdin and prints each");
                println!("navigation the search control makes as a JSON line.");
                return;
            }
            _ if script_path.is_none() => script_path = Some(arg),
            _ => fail(USAGE),
        }
    }

    let script = match script_path {
        Some(path) => std::fs::read_to_string(&path)
            .unwrap_or_else(|e| fail(&format!("cannot read {path}: {e}"))),
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                fail(&format!("cannot read stdin: {e}"));
            }
            buf
        }
    };

    let steps = replay::parse_script(&script).unwrap_or_else(|e| fail(&e.to_string()));

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| fail(&format!("failed to create tokio runtime: {e}")));

    let navigations = rt.block_on(async {
        let router = MemoryRouter::new(&start_url);
        let control = SearchControl::new(
            Arc::new(router.clone()),
            config.search.delay(),
            Handle::current(),
        );
        replay::run(steps, control, &router, config.replay.keystroke_gap()).await
    });

    for navigation in navigations {
        match serde_json::to_string(&navigation) {
            Ok(line) => println!("{line}"),
            Err(e) => fail(&format!("failed to encode navigation: {e}")),
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("filterbar-replay: {message}");
    process::exit(2);
}
