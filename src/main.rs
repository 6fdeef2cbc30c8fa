use std::env;
use log::{error, info};
use aircast::config::load_config;
use aircast::initialization::init;
use aircast::logging::setup_logger;
use aircast::worker;

const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

fn main() {
    let config_path = env::args()
        .nth(1)
        .or_else(|| env::var("CONFIG_PATH").ok())
        .unwrap_or(DEFAULT_CONFIG_PATH.to_string());

    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => { eprintln!("Error loading config {}: {}", config_path, e); return; }
    };

    if let Err(e) = setup_logger(&config.general) {
        eprintln!("{}", e);
        return;
    }

    info!("aircast version: {}", env!("CARGO_PKG_VERSION"));

    let mut mgr = match init(&config) {
        Ok(m) => m,
        Err(e) => { error!("{}", e); return; }
    };

    if let Err(e) = worker::run(&config, &mut mgr) {
        error!("{}", e);
    }
}
