// src/config.rs
use crate::constants::NOTION_API_BASE_URL;
use crate::error::AppError;
use crate::types::{ApiKey, ValidatedUrl};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:8787")]
    pub addr: SocketAddr,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Log file path (defaults to notion2html.log in the temp dir)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// JSON file of {"email", "pageID"} records to serve lookups from
    #[arg(long)]
    pub lookup_file: Option<PathBuf>,
}

/// Connection details for a Supabase-style project (auth + PostgREST).
#[derive(Debug, Clone)]
pub struct SupabaseSettings {
    pub url: ValidatedUrl,
    pub anon_key: String,
}

/// Resolved service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub addr: SocketAddr,
    pub verbose: bool,
    pub log_file: PathBuf,
    /// `None` keeps the service up; page requests then fail with `ConfigError`.
    pub notion_api_key: Option<ApiKey>,
    pub notion_base_url: ValidatedUrl,
    pub supabase: Option<SupabaseSettings>,
    pub lookup_file: Option<PathBuf>,
}

impl ServiceConfig {
    /// Resolves configuration from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Like `resolve`, reading variables through `env`.
    pub fn resolve_with(
        cli: CommandLineInput,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let var = |name: &str| env(name).filter(|value| !value.trim().is_empty());

        let notion_api_key = var("NOTION_API_KEY").map(ApiKey::new).transpose()?;
        let notion_base_url = ValidatedUrl::parse(
            var("NOTION_API_BASE_URL")
                .as_deref()
                .unwrap_or(NOTION_API_BASE_URL),
        )?;

        let supabase = match (var("SUPABASE_URL"), var("SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) => Some(SupabaseSettings {
                url: ValidatedUrl::parse(&url)?,
                anon_key,
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(AppError::ConfigError(
                    "SUPABASE_ANON_KEY must be set together with SUPABASE_URL".to_string(),
                ))
            }
            (None, Some(_)) => {
                return Err(AppError::ConfigError(
                    "SUPABASE_URL must be set together with SUPABASE_ANON_KEY".to_string(),
                ))
            }
        };

        Ok(ServiceConfig {
            addr: cli.addr,
            verbose: cli.verbose,
            log_file: cli
                .log_file
                .unwrap_or_else(|| std::env::temp_dir().join("notion2html.log")),
            notion_api_key,
            notion_base_url,
            supabase,
            lookup_file: cli.lookup_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cli(args: &[&str]) -> CommandLineInput {
        CommandLineInput::parse_from(std::iter::once("notion2html").chain(args.iter().copied()))
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = ServiceConfig::resolve_with(cli(&[]), env(&[])).unwrap();
        assert_eq!(config.addr.to_string(), "127.0.0.1:8787");
        assert!(config.notion_api_key.is_none());
        assert!(config.supabase.is_none());
        assert_eq!(config.notion_base_url.as_str(), "https://api.notion.com/v1");
    }

    #[test]
    fn test_full_environment() {
        let config = ServiceConfig::resolve_with(
            cli(&["--addr", "0.0.0.0:9000", "--lookup-file", "pages.json", "-v"]),
            env(&[
                ("NOTION_API_KEY", "secret_abcdefghijklmnopqrs"),
                ("SUPABASE_URL", "https://project.supabase.co"),
                ("SUPABASE_ANON_KEY", "anon"),
            ]),
        )
        .unwrap();
        assert!(config.verbose);
        assert!(config.notion_api_key.is_some());
        assert_eq!(config.lookup_file, Some(PathBuf::from("pages.json")));
        assert_eq!(config.supabase.unwrap().anon_key, "anon");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(ServiceConfig::resolve_with(cli(&[]), env(&[("NOTION_API_KEY", "bogus")])).is_err());
        assert!(ServiceConfig::resolve_with(
            cli(&[]),
            env(&[("SUPABASE_URL", "https://project.supabase.co")])
        )
        .is_err());
    }
}
