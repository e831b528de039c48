//! Entries command implementation.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::cli::EntriesArgs;

use super::{build_cache, load_or_default};

pub fn run(args: EntriesArgs, config_path: &Path) -> Result<()> {
    let config = load_or_default(config_path)?;
    let cache = build_cache(&config, args.data.as_deref());

    match cache.entry_names(&args.key)? {
        Some(names) => {
            for name in &names {
                println!("{}", name);
            }
            info!("{} entries in {}", names.len(), args.key);
        }
        None => println!("No archive found for key: {}", args.key),
    }
    Ok(())
}
