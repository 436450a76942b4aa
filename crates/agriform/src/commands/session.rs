//! `agf session` - exercise the file-backed session store

use anyhow::Result;
use clap::ArgMatches;

use agriform_core::SessionStore;

use crate::config::Config;
use crate::store::FileSessionStore;

fn open_store(config: &Config) -> Result<FileSessionStore> {
    let path = match &config.session_file {
        Some(path) => path.clone(),
        None => FileSessionStore::default_path()?,
    };
    Ok(FileSessionStore::new(path))
}

/// Run `agf session get|set|clear`
///
/// `get` prints the cached value (nothing when the key is absent); `set`
/// and `clear` are silent on success.
///
/// # Errors
///
/// Fails when the backing store cannot be read or written.
pub fn run(config: &Config, matches: &ArgMatches) -> Result<()> {
    let mut store = open_store(config)?;

    match matches.subcommand() {
        Some(("get", sub)) => {
            let key = sub
                .get_one::<String>("key")
                .map_or("", String::as_str);
            if let Some(value) = store.get(key)? {
                #[allow(clippy::print_stdout)]
                {
                    println!("{value}");
                }
            }
            Ok(())
        }
        Some(("set", sub)) => {
            let key = sub
                .get_one::<String>("key")
                .map_or("", String::as_str);
            let value = sub
                .get_one::<String>("value")
                .map_or("", String::as_str);
            store.set(key, value)?;
            tracing::debug!(key, path = %store.path().display(), "session value cached");
            Ok(())
        }
        Some(("clear", _)) => {
            store.clear()?;
            tracing::debug!(path = %store.path().display(), "session cleared");
            Ok(())
        }
        _ => anyhow::bail!("no session subcommand given"),
    }
}
