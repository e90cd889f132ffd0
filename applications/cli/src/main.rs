//! Spinlist - command-line playlist player

use anyhow::Context;
use clap::{Parser, Subcommand};
use spinlist_cli::{AppConfig, Collaborators, PlayerApp};
use spinlist_core::UploadFile;
use spinlist_playback::PlaybackEvent;
use spinlist_server_client::SpinlistClient;
use spinlist_storage::{JsonFileStore, SessionStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spinlist")]
#[command(about = "Play and upload tracks of a Spinlist playlist", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SPINLIST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tracks, newest first, marking the current one
    List,
    /// Upload an audio file and add it to the playlist
    Upload {
        /// Audio file to upload
        file: PathBuf,
    },
    /// Make a track current and start it
    Select {
        /// Row number as shown by `list`
        index: usize,
    },
    /// Record the playback position of a track
    Position {
        /// Row number as shown by `list`
        index: usize,
        /// Seconds from the start of the track
        seconds: f64,
    },
    /// Signal that a track finished playing
    Complete {
        /// Row number as shown by `list`
        index: usize,
    },
    /// Show the persisted session without contacting the backend
    Status,
    /// Write a configuration file with default values
    InitConfig {
        /// Destination path
        #[arg(default_value = spinlist_cli::config::DEFAULT_CONFIG_FILE)]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "spinlist=info,spinlist_cli=info,spinlist_playback=info,spinlist_server_client=info"
                        .into()
                }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Commands::InitConfig { path, force } = &cli.command {
        return init_config(path, *force);
    }

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let mut app = build_app(&config)?;

    match cli.command {
        Commands::List => {
            app.refresh().await?;
            print_tracks(&app);
        }
        Commands::Upload { file } => {
            upload(&mut app, &file).await?;
        }
        Commands::Select { index } => {
            app.refresh().await?;
            let events = app.select(index)?;
            print_events(&app, &events);
        }
        Commands::Position { index, seconds } => {
            app.refresh().await?;
            app.report_position(index, seconds)?;
            print_session(&app);
        }
        Commands::Complete { index } => {
            app.refresh().await?;
            let events = app.complete(index)?;
            print_events(&app, &events);
        }
        Commands::Status => {
            print_session(&app);
        }
        Commands::InitConfig { .. } => unreachable!("handled before loading configuration"),
    }

    Ok(())
}

fn build_app(config: &AppConfig) -> anyhow::Result<PlayerApp> {
    let store = JsonFileStore::open(&config.storage.session_path).with_context(|| {
        format!(
            "Failed to open session file {}",
            config.storage.session_path.display()
        )
    })?;

    let client = SpinlistClient::new(config.server_config())?;
    tracing::debug!(api_url = client.api_url(), "Backend configured");

    Ok(PlayerApp::new(
        Collaborators::from_client(Arc::new(client)),
        SessionStore::new(store),
    ))
}

async fn upload(app: &mut PlayerApp, path: &Path) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("track")
        .to_string();

    let media = app
        .upload(UploadFile::new(file_name, bytes), |percent| {
            eprintln!("Uploading... {percent}%");
        })
        .await?;

    println!("Uploaded {} ({})", media.public_id, media.secure_url);
    print_tracks(app);
    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    std::fs::write(path, AppConfig::default().to_toml()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn print_tracks(app: &PlayerApp) {
    let controller = app.controller();
    if controller.tracks().is_empty() {
        println!("No tracks yet. Upload one with `spinlist upload <file>`.");
        return;
    }

    for (index, track) in controller.tracks().iter().enumerate() {
        let marker = if controller.is_current(index) { ">" } else { " " };
        println!("{marker} {index:>3}  {}", track.file_name);
    }
    print_session(app);
}

fn print_session(app: &PlayerApp) {
    let session = app.controller().session();
    match (session.current_index, app.controller().current_track()) {
        (Some(index), Some(track)) => println!(
            "Current: [{index}] {} at {:.1}s",
            track.file_name, session.current_offset_secs
        ),
        (Some(index), None) => println!(
            "Current: [{index}] at {:.1}s",
            session.current_offset_secs
        ),
        (None, _) => println!("Nothing selected"),
    }
}

fn print_events(app: &PlayerApp, events: &[PlaybackEvent]) {
    let tracks = app.controller().tracks();
    for event in events {
        match event {
            PlaybackEvent::TrackSelected {
                index,
                resumed_from_secs,
                auto_advanced,
                ..
            } => {
                let name = tracks.get(*index).map_or("?", |t| t.file_name.as_str());
                let verb = if *auto_advanced { "Advanced to" } else { "Playing" };
                println!("{verb} [{index}] {name} from {resumed_from_secs:.1}s");
            }
            PlaybackEvent::PlaylistEnded { last_index } => {
                println!("Playlist ended after [{last_index}]");
            }
            PlaybackEvent::SessionReconciled { .. } => {}
        }
    }
}
