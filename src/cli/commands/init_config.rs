//! Init-config command implementation.

use anyhow::Result;
use std::path::Path;

pub fn run(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        anyhow::bail!(
            "Refusing to overwrite existing configuration: {}",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    datacache_config::write_default(config_path)?;

    println!("Wrote default configuration to {:?}", config_path);
    Ok(())
}
