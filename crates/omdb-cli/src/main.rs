//! omdb - look up and search films on OMDb from the command line.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{API_KEY_ENV, AppConfig, mask_key, resolve_config_path};
use omdb_api::{Film, LocalOmdbApi, OmdbClient, SearchOptions, SearchPages, SearchResult};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Look up a film by IMDb ID.
    Fetch(FetchArgs),
    /// Search films by title.
    Search(SearchArgs),
    /// Inspect or edit the config file.
    Config(ConfigCommand),
}

/// Arguments for the `fetch` subcommand.
#[derive(clap::Args)]
struct FetchArgs {
    /// IMDb ID (e.g. "tt0076759").
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Title to search for (e.g. "star wars").
    #[arg(long, required = true)]
    query: String,
    /// Filter by year of release.
    #[arg(long)]
    year: Option<i32>,
    /// Filter by type ("movie", "series", "episode").
    #[arg(long = "type")]
    kind: Option<String>,
    /// Fetch every result page instead of only the first.
    #[arg(long)]
    all_pages: bool,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show the resolved config.
    Show,
    /// Store the API key in the config file.
    SetKey(SetKeyArgs),
}

/// Arguments for the `config set-key` subcommand.
#[derive(clap::Args)]
struct SetKeyArgs {
    /// OMDb API key.
    key: String,
}

/// Builds an `OmdbClient` from the config file and `OMDB_API_KEY`.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, no API key is
/// available, or the client fails to build.
#[instrument(skip_all)]
fn build_client(dir: Option<&PathBuf>) -> Result<OmdbClient> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    let api_key = config.api_key(std::env::var(API_KEY_ENV).ok())?;

    let mut builder = OmdbClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(url) = config.base_url()? {
        tracing::debug!(base_url = %url, "Using base URL from config");
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build OMDb client")
}

/// Logs a film's fields.
fn log_film(film: &Film) {
    tracing::info!("Title: {}", film.title);
    if film.year == 0 {
        tracing::info!("Year: -");
    } else {
        tracing::info!("Year: {}", film.year);
    }
    tracing::info!("Genre: {}", film.genre);
    tracing::info!("Poster: {}", film.poster);
}

/// Logs search results as a table.
fn log_results(results: &[SearchResult]) {
    tracing::info!("ID\t\tYear\tType\tTitle");
    for result in results {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            result.id,
            result.year,
            result.kind,
            result.title
        );
    }
    tracing::info!("Total: {} results", results.len());
}

/// Runs the `fetch` subcommand.
///
/// A year-parse failure is reported as a warning and the partial film is
/// still shown.
///
/// # Errors
///
/// Returns an error if the client fails to build or the lookup fails.
#[instrument(skip_all)]
async fn run_fetch(args: &FetchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;

    match client.fetch(&args.id).await {
        Ok(film) => log_film(&film),
        Err(e) => {
            let Some(film) = e.partial_film() else {
                return Err(e).with_context(|| format!("OMDb lookup failed: {}", args.id));
            };
            tracing::warn!("{e}");
            log_film(film);
        }
    }

    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or any page request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;

    let mut options = SearchOptions::new();
    if let Some(year) = args.year {
        options = options.year(year);
    }
    if let Some(ref kind) = args.kind {
        options = options.kind(kind);
    }

    let fetched = if args.all_pages {
        SearchPages::new(&client, &args.query, Some(options))
            .collect_all()
            .await
    } else {
        client.search(&args.query, Some(&options)).await
    };
    let results = fetched.with_context(|| format!("OMDb search failed: {}", args.query))?;

    log_results(&results);

    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be resolved or loaded.
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    tracing::info!("Config: {}", config_path.display());
    tracing::info!(
        "api.key: {}",
        config
            .api
            .key
            .as_deref()
            .map_or_else(|| String::from("(not set)"), mask_key)
    );
    tracing::info!(
        "api.base_url: {}",
        config.api.base_url.as_deref().unwrap_or("(default)")
    );
    if std::env::var(API_KEY_ENV).is_ok_and(|k| !k.is_empty()) {
        tracing::info!("{API_KEY_ENV} is set and overrides api.key");
    }

    Ok(())
}

/// Runs the `config set-key` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or written.
fn run_config_set_key(args: &SetKeyArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;

    config.api.key = Some(args.key.clone());
    config.save(&config_path).context("failed to save config")?;

    tracing::info!("Saved API key to {}", config_path.display());
    Ok(())
}

/// Installs the tracing subscriber. With the `otel` feature, spans are also
/// exported over OTLP when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(not(feature = "otel"))]
    {
        fmt().with_env_filter(env_filter).with_target(false).init();
    }

    #[cfg(feature = "otel")]
    {
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Fetch(args) => run_fetch(&args, dir).await,
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Config(cfg) => match cfg.command {
            ConfigSubcommands::Show => run_config_show(dir),
            ConfigSubcommands::SetKey(args) => run_config_set_key(&args, dir),
        },
    }
}
