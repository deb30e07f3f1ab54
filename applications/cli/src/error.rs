/// CLI error types
use musica_catalog::CatalogError;
use musica_library::LibraryError;
use musica_playback::PlaybackError;
use thiserror::Error;

/// Result type alias using `CliError`
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("No results for \"{0}\"")]
    NoResults(String),
}
