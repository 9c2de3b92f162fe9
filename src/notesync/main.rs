use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use notesync::api::{self, CmdMessage, ConfigAction, MessageLevel, SyncApi};
use notesync::config::SyncConfig;
use notesync::error::{Result, SyncError};
use notesync::remote::http::HttpNoteStore;
use notesync::remote::{Credentials, StaticCredentials};
use notesync::vault::fs::FsVault;
use std::path::{Path, PathBuf};

mod args;
use args::{Cli, Commands};

const PASSWORD_ENV: &str = "NOTESYNC_PASSWORD";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_dir = config_dir();
    let mut config = SyncConfig::load(&config_dir).unwrap_or_default();
    let vault = FsVault::new(vault_root(&cli, &config));

    match cli.command {
        Some(Commands::Sync) => handle_sync(&mut config, &config_dir, vault).await,
        Some(Commands::Push) => handle_push(&config, vault).await,
        Some(Commands::Pull) => handle_pull(&config, vault).await,
        Some(Commands::Status) => handle_status(&config, vault).await,
        Some(Commands::Init) => handle_init(&mut config, &config_dir, vault).await,
        Some(Commands::Config { key, value }) => handle_config(&mut config, &config_dir, key, value),
        None => {
            if config.sync.sync_on_startup {
                handle_sync(&mut config, &config_dir, vault).await
            } else {
                handle_status(&config, vault).await
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "notesync=debug" } else { "notesync=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NOTESYNC_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    let proj_dirs =
        ProjectDirs::from("com", "notesync", "notesync").expect("Could not determine config dir");
    proj_dirs.config_dir().to_path_buf()
}

fn vault_root(cli: &Cli, config: &SyncConfig) -> PathBuf {
    if let Some(vault) = &cli.vault {
        return vault.clone();
    }
    if !config.vault_path.as_os_str().is_empty() {
        return config.vault_path.clone();
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn build_store(config: &SyncConfig) -> Result<HttpNoteStore> {
    if config.server.url.is_empty() {
        return Err(SyncError::Config(
            "Server URL is not configured (notesync config server-url <url>)".to_string(),
        ));
    }
    let credentials = Credentials {
        email: config.server.email.clone(),
        password: std::env::var(PASSWORD_ENV).unwrap_or_default(),
    };
    Ok(HttpNoteStore::new(
        &config.server.url,
        Box::new(StaticCredentials(credentials)),
    ))
}

async fn handle_sync(config: &mut SyncConfig, config_dir: &Path, vault: FsVault) -> Result<()> {
    let api = SyncApi::new(vault, build_store(config)?);
    let result = api.sync(&config.sync).await?;
    print_messages(&result.messages);

    if let Some(at) = result.completed_at {
        config.sync.last_sync = Some(at);
        config.save(config_dir)?;
    }
    Ok(())
}

async fn handle_push(config: &SyncConfig, vault: FsVault) -> Result<()> {
    let api = SyncApi::new(vault, build_store(config)?);
    let result = api.push(&config.sync).await?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_pull(config: &SyncConfig, vault: FsVault) -> Result<()> {
    let api = SyncApi::new(vault, build_store(config)?);
    let result = api.pull(&config.sync).await?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_status(config: &SyncConfig, vault: FsVault) -> Result<()> {
    let result = notesync::commands::status::run(&vault, &config.sync).await?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_init(config: &mut SyncConfig, config_dir: &Path, vault: FsVault) -> Result<()> {
    let result = notesync::commands::init::run(&vault, &config.sync).await?;
    print_messages(&result.messages);

    config.save(config_dir)?;
    println!("Config written to {}", config_dir.join("config.json").display());
    Ok(())
}

fn handle_config(
    config: &mut SyncConfig,
    config_dir: &Path,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let mutates = matches!(action, ConfigAction::Set(..));

    let result = api::config(config, action)?;
    print_messages(&result.messages);

    if mutates {
        config.save(config_dir)?;
    }
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}
