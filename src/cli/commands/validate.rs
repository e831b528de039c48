//! Validate configuration command.

use anyhow::Result;
use datacache_config::load_config;
use std::path::Path;

pub fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Log format: {}", config.logging.format);
            println!("Data folder: {}", config.data.folder);
            println!("Cache TTL: {}s", config.cache.ttl_secs);
            println!("Sweep interval: {}s", config.cache.sweep_interval_secs);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
