/// Lofi Player - terminal player
use clap::{Parser, Subcommand};
use lofi_catalog::CatalogClient;
use lofi_player::{terminal, AppConfig, Terminal};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lofi-player")]
#[command(about = "Lofi music player for the terminal", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./lofi.toml when present)
    #[arg(short, long, global = true, env = "LOFI_CONFIG")]
    config: Option<PathBuf>,

    /// Number of tracks to fetch
    #[arg(short, long, global = true)]
    limit: Option<usize>,

    /// Catalog search query
    #[arg(short, long, global = true)]
    query: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the catalog and print it
    Tracks,
    /// Fetch the catalog and start the interactive player
    Play,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lofi_player=info,lofi_playback=info,lofi_catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(limit) = cli.limit {
        config.track_limit = limit;
    }
    if let Some(query) = cli.query {
        config.catalog.query = query;
    }
    config.validate()?;

    match cli.command {
        Commands::Tracks => list_tracks(&config).await?,
        Commands::Play => play(&config).await?,
    }

    Ok(())
}

async fn list_tracks(config: &AppConfig) -> anyhow::Result<()> {
    let client = CatalogClient::new(config.catalog.clone())?;
    let tracks = client.fetch(config.track_limit).await?;

    let mut stdout = std::io::stdout().lock();
    for (index, track) in tracks.iter().enumerate() {
        writeln!(
            stdout,
            "{:>2}. {} [{}] ({})",
            index,
            track.display_name(),
            track.album,
            terminal::format_time(track.duration().as_secs_f64())
        )?;
    }

    Ok(())
}

async fn play(config: &AppConfig) -> anyhow::Result<()> {
    tracing::info!(query = %config.catalog.query, limit = config.track_limit, "Starting Lofi Player");

    let mut player = Terminal::new(config);
    let mut stdout = std::io::stdout();
    writeln!(stdout, "Loading tracks...")?;

    let client = CatalogClient::new(config.catalog.clone())?;
    match client.fetch(config.track_limit).await {
        Ok(tracks) => player.session_mut().tracks_loaded(tracks),
        Err(e) => {
            if e.is_fetch_error() {
                tracing::warn!(error = %e, "Catalog unreachable, check the network or proxy settings");
            } else {
                tracing::warn!(error = %e, "Catalog response not understood");
            }
            player.session_mut().tracks_failed(e.to_string());
        }
    }

    writeln!(stdout, "Type `help` for commands")?;
    let input = BufReader::new(tokio::io::stdin());
    terminal::run(&mut player, input, &mut stdout, config.tick()).await
}
