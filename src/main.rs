// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2html::{
    router, AccountService, AppState, CommandLineInput, CredentialValidator, InMemoryStore,
    LookupTable, NotionHttpClient, NotionRepository, PageLookup, PostgrestLookupTable,
    RequestPipeline, ServiceConfig, SupabaseAuthClient, UnconfiguredNotion,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool, log_file_path: &Path) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "[{l}] {m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Wires the collaborators named by the configuration into router state.
fn build_state(config: &ServiceConfig) -> anyhow::Result<AppState> {
    let notion: Arc<dyn NotionRepository> = match &config.notion_api_key {
        Some(key) => Arc::new(NotionHttpClient::with_base_url(
            key,
            config.notion_base_url.clone(),
        )?),
        None => {
            log::warn!("NOTION_API_KEY is not set; page requests will fail until it is");
            Arc::new(UnconfiguredNotion)
        }
    };

    let lookup: Arc<dyn PageLookup> = match (&config.lookup_file, &config.supabase) {
        (Some(path), _) => Arc::new(
            LookupTable::from_json_file(path)
                .with_context(|| format!("loading lookup file {}", path.display()))?,
        ),
        (None, Some(supabase)) => {
            log::info!("Looking up pages in {}", supabase.url);
            Arc::new(PostgrestLookupTable::new(
                supabase.url.clone(),
                supabase.anon_key.clone(),
            )?)
        }
        (None, None) => {
            log::warn!("No lookup source configured; every page request will be NotFound");
            Arc::new(LookupTable::default())
        }
    };

    let accounts = AccountService::new(Arc::new(InMemoryStore::new()));
    let credentials: Arc<dyn CredentialValidator> = match &config.supabase {
        Some(supabase) => {
            log::info!("Validating tokens against {}", supabase.url);
            Arc::new(SupabaseAuthClient::new(
                supabase.url.clone(),
                supabase.anon_key.clone(),
            )?)
        }
        None => Arc::new(accounts.clone()),
    };

    Ok(AppState::new(
        RequestPipeline::new(credentials, lookup, notion),
        accounts,
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
    log::info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();
    let config = ServiceConfig::resolve(cli)?;

    setup_logging(config.verbose, &config.log_file)?;

    let state = build_state(&config)?;
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
