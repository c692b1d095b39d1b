mod api;
mod commands;
mod console;
mod paths;
mod render;
mod screens;
mod settings;

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::{DirectoryApi, Entity, MemoryDirectory};
use crate::commands::Command;
use crate::console::{Console, ConsoleError, Reply};
use crate::settings::{MemoryStore, SettingsProvider, SqliteStore};

const PROMPT: &str = "> ";

/// Milliseconds every directory call is delayed by.
const LATENCY_VAR: &str = "ADMIN_CONSOLE_LATENCY_MS";

/// Records whose mutations fail, e.g. `user:4,organization:2`.
const FAIL_VAR: &str = "ADMIN_CONSOLE_FAIL";

fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return;
    };
    if let Some(dir) = path.parent()
        && let Err(e) = fs::create_dir_all(dir)
    {
        eprintln!("Failed to create log directory {}: {e}", dir.display());
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("Failed to initialize logger: {e}");
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {e}", path.display()),
    }
}

/// Settings backed by the settings database, or kept in memory if it cannot
/// be opened.
async fn open_settings() -> SettingsProvider {
    if let Some(path) = paths::settings_db() {
        if let Some(dir) = path.parent()
            && let Err(e) = fs::create_dir_all(dir)
        {
            log::warn!("could not create {}: {e}", dir.display());
        }
        match SqliteStore::open(&path).await {
            Ok(backend) => return SettingsProvider::new(backend),
            Err(e) => log::warn!("settings database unavailable, using memory: {e}"),
        }
    }
    SettingsProvider::new(MemoryStore::new())
}

/// The seeded directory, with latency and failures taken from the
/// environment.
fn open_directory() -> Result<MemoryDirectory, ConsoleError> {
    let mut directory = MemoryDirectory::seeded()?;

    if let Ok(value) = env::var(LATENCY_VAR) {
        match value.trim().parse::<u64>() {
            Ok(ms) => directory = directory.with_latency(Duration::from_millis(ms)),
            Err(_) => log::warn!("ignoring {LATENCY_VAR}={value}"),
        }
    }

    if let Ok(value) = env::var(FAIL_VAR) {
        for item in value.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let target = item.split_once(':').and_then(|(kind, id)| {
                let entity = match kind {
                    "user" => Entity::User,
                    "organization" | "org" => Entity::Organization,
                    _ => return None,
                };
                id.parse::<u64>().ok().map(|id| (entity, id))
            });
            match target {
                Some((entity, id)) => {
                    log::info!("injecting failures for {entity} {id}");
                    directory.fail_on(entity, id);
                }
                None => log::warn!("ignoring {FAIL_VAR} entry `{item}`"),
            }
        }
    }

    Ok(directory)
}

fn prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(PROMPT.as_bytes())?;
    stdout.flush()
}

async fn run() -> Result<(), ConsoleError> {
    init_logging();

    let settings = open_settings().await;
    let api: Arc<dyn DirectoryApi> = Arc::new(open_directory()?);
    let mut console = Console::new(api, settings);
    console.start().await?;

    print!("{}", console.render());
    println!("Type `help` for commands.");
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            prompt()?;
            continue;
        }
        let reply = match line.parse::<Command>() {
            Ok(command) => {
                if let Some(text) = console.announce(&command) {
                    print!("{text}");
                    std::io::stdout().flush()?;
                }
                console.execute(command).await
            }
            Err(e) => Err(ConsoleError::from(e)),
        };
        match reply {
            Ok(Reply::Output(text)) => print!("{text}"),
            Ok(Reply::Quit) => break,
            Err(e) => {
                log::debug!("command failed: {e}");
                println!("error: {e}");
            }
        }
        prompt()?;
    }

    log::info!("console closed");
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
