/// Musica - preview player in the terminal
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use musica_catalog::ItunesCatalog;
use musica_cli::{config::AppConfig, render, walk, CliError};
use musica_core::{
    AlbumId, CatalogClient, CatalogItem, PlaylistId, SearchKind, Track, TracingNotifier,
};
use musica_library::{JsonFileStore, LibraryManager, MoveDirection};
use musica_playback::RepeatMode;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Library = LibraryManager<JsonFileStore>;

#[derive(Parser)]
#[command(name = "musica")]
#[command(about = "Search, collect, and walk through 30-second music previews", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./musica.toml when present)
    #[arg(short, long, global = true, env = "MUSICA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search songs (or albums with --albums)
    Search {
        term: String,
        #[arg(long)]
        albums: bool,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show an album and its previewable tracks
    Album { id: AlbumId },
    /// Current chart tracks
    Charts,
    /// New release albums
    Releases,
    /// List liked songs and albums
    Liked,
    /// Like or unlike the first playable song matching a search
    Like { term: String },
    /// Like or unlike an album
    LikeAlbum { id: AlbumId },
    /// Manage playlists
    #[command(subcommand)]
    Playlist(PlaylistCommand),
    /// Play a queue headlessly and print each track as it starts
    Walk {
        #[command(flatten)]
        source: WalkSource,
        #[arg(long)]
        shuffle: bool,
        /// Overrides the configured repeat mode
        #[arg(long, value_enum)]
        repeat: Option<RepeatArg>,
        /// Stop after this many tracks have started
        #[arg(long, default_value_t = 20)]
        max: usize,
    },
}

#[derive(Subcommand)]
enum PlaylistCommand {
    /// List playlists
    List,
    /// Create an empty playlist
    Create {
        name: String,
        #[arg(long, default_value = "")]
        color: String,
    },
    /// Show a playlist's tracks
    Show { id: PlaylistId },
    /// Add the first playable song matching a search
    Add { id: PlaylistId, term: String },
    /// Add every previewable track of an album
    AddAlbum { id: PlaylistId, album: AlbumId },
    /// Move a track one step up or down
    Move {
        id: PlaylistId,
        index: usize,
        #[arg(value_enum)]
        direction: DirectionArg,
    },
    /// Remove the track at an index
    Remove { id: PlaylistId, index: usize },
    /// Remove every track
    Clear { id: PlaylistId },
    /// Delete the playlist
    Delete { id: PlaylistId },
}

#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct WalkSource {
    /// Search term whose results form the queue
    #[arg(long)]
    search: Option<String>,
    /// Album whose tracks form the queue
    #[arg(long)]
    album: Option<AlbumId>,
    /// Playlist whose tracks form the queue
    #[arg(long)]
    playlist: Option<PlaylistId>,
    /// Use the liked songs as the queue
    #[arg(long)]
    liked: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum RepeatArg {
    Off,
    All,
    One,
}

impl From<RepeatArg> for RepeatMode {
    fn from(arg: RepeatArg) -> Self {
        match arg {
            RepeatArg::Off => RepeatMode::Off,
            RepeatArg::All => RepeatMode::All,
            RepeatArg::One => RepeatMode::One,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for MoveDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => MoveDirection::Up,
            DirectionArg::Down => MoveDirection::Down,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "musica=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    let catalog = ItunesCatalog::new(config.catalog.clone())?;

    match cli.command {
        Commands::Search {
            term,
            albums,
            limit,
        } => {
            let library = open_library(&config);
            let kind = if albums {
                SearchKind::Album
            } else {
                SearchKind::Song
            };
            let limit = limit.unwrap_or(config.catalog.default_limit);
            for item in catalog.search_items(&term, kind, limit).await? {
                match item {
                    CatalogItem::Track(track) => {
                        println!("{}", render::track_line(&track, library.is_liked(track.id)));
                    }
                    CatalogItem::Album(album) => {
                        let liked = library.is_album_liked(album.id);
                        println!("{}", render::album_line(&album, liked));
                    }
                }
            }
        }
        Commands::Album { id } => {
            let library = open_library(&config);
            let detail = catalog.lookup_album(id).await?;
            println!("{}", render::album_header(&detail));
            for track in &detail.tracks {
                println!("{}", render::track_line(track, library.is_liked(track.id)));
            }
        }
        Commands::Charts => {
            let library = open_library(&config);
            for track in catalog.charts().await? {
                println!("{}", render::track_line(&track, library.is_liked(track.id)));
            }
        }
        Commands::Releases => {
            let library = open_library(&config);
            for album in catalog.new_releases().await? {
                println!("{}", render::album_line(&album, library.is_album_liked(album.id)));
            }
        }
        Commands::Liked => {
            let library = open_library(&config);
            println!("Liked Songs:");
            for track in library.library().liked_tracks() {
                println!("  {}", render::track_line(track, true));
            }
            println!("Albums:");
            for album in library.library().liked_albums() {
                println!("  {}", render::album_line(album, true));
            }
        }
        Commands::Like { term } => {
            let mut library = open_library(&config);
            let track = first_playable(&catalog, &term).await?;
            library.toggle_like(&track);
        }
        Commands::LikeAlbum { id } => {
            let mut library = open_library(&config);
            let detail = catalog.lookup_album(id).await?;
            library.toggle_like_album(&detail.album);
        }
        Commands::Playlist(command) => {
            let mut library = open_library(&config);
            run_playlist(&mut library, &catalog, command).await?;
        }
        Commands::Walk {
            source,
            shuffle,
            repeat,
            max,
        } => {
            let library = open_library(&config);
            let tracks = walk_queue(&library, &catalog, source).await?;

            let player = walk::walk_config(&config.player, shuffle, repeat.map(Into::into));

            let (steps, state) = walk::walk(tracks, player, Arc::new(TracingNotifier), max)?;
            for (n, step) in steps.iter().enumerate() {
                println!(
                    "{:>3}. [{}] {} - {}",
                    n + 1,
                    step.index,
                    step.title,
                    step.artist
                );
            }
            tracing::info!(started = steps.len(), state = ?state, "Walk finished");
        }
    }

    Ok(())
}

fn open_library(config: &AppConfig) -> Library {
    let store = JsonFileStore::from_config(&config.library);
    LibraryManager::load(store, Arc::new(TracingNotifier), &config.library)
}

async fn first_playable(catalog: &ItunesCatalog, term: &str) -> anyhow::Result<Track> {
    let tracks = catalog.search_tracks(term, catalog.config().default_limit).await?;
    tracks
        .into_iter()
        .next()
        .ok_or_else(|| CliError::NoResults(term.to_string()).into())
}

async fn run_playlist(
    library: &mut Library,
    catalog: &ItunesCatalog,
    command: PlaylistCommand,
) -> anyhow::Result<()> {
    match command {
        PlaylistCommand::List => {
            for playlist in library.playlists() {
                println!("{}", render::playlist_line(playlist));
            }
        }
        PlaylistCommand::Create { name, color } => {
            let id = library.create_playlist(&name, &color)?;
            println!("{id}");
        }
        PlaylistCommand::Show { id } => {
            let playlist = library
                .playlist(&id)
                .with_context(|| format!("Playlist not found: {id}"))?;
            println!("{}", render::playlist_line(playlist));
            for line in render::playlist_body(playlist) {
                println!("{line}");
            }
        }
        PlaylistCommand::Add { id, term } => {
            let track = first_playable(catalog, &term).await?;
            library.add_track(&id, &track)?;
        }
        PlaylistCommand::AddAlbum { id, album } => {
            let detail = catalog.lookup_album(album).await?;
            library.add_all_tracks(&id, &detail.tracks)?;
        }
        PlaylistCommand::Move {
            id,
            index,
            direction,
        } => {
            if !library.reorder(&id, index, direction.into())? {
                tracing::info!(index, "Track already at the edge of the playlist");
            }
        }
        PlaylistCommand::Remove { id, index } => {
            let removed = library.remove(&id, index)?;
            println!("Removed {} - {}", removed.title, removed.artist);
        }
        PlaylistCommand::Clear { id } => library.clear(&id)?,
        PlaylistCommand::Delete { id } => {
            library.delete(&id)?;
        }
    }
    Ok(())
}

async fn walk_queue(
    library: &Library,
    catalog: &ItunesCatalog,
    source: WalkSource,
) -> anyhow::Result<Vec<Track>> {
    if let Some(term) = source.search {
        return Ok(catalog.search_tracks(&term, catalog.config().default_limit).await?);
    }
    if let Some(album) = source.album {
        return Ok(catalog.lookup_album(album).await?.tracks);
    }
    if let Some(id) = source.playlist {
        let playlist = library
            .playlist(&id)
            .with_context(|| format!("Playlist not found: {id}"))?;
        return Ok(playlist.tracks.clone());
    }
    Ok(library.library().liked_tracks().to_vec())
}
