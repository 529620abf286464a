use std::io;
use std::path::PathBuf;
use std::process;

use log::{error, info};

use social_console::config::DEFAULT_CONFIG_PATH;
use social_console::console::Console;
use social_console::{Config, SocialApp};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let app = match SocialApp::new(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to start: {e}");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    info!(
        "Session files: users={} current={} mode={:?}",
        config.users_file.display(),
        config.current_user_file.display(),
        config.reload_mode
    );

    let mut console = Console::new(app, io::stdin().lock(), io::stdout(), io::stderr());
    if let Err(e) = console.run() {
        error!("Console I/O failed: {e}");
        process::exit(1);
    }
}
