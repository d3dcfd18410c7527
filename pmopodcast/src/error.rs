//! Types d'erreurs du lecteur de podcast

use thiserror::Error;

/// Type Result personnalisé pour le lecteur de podcast
pub type Result<T> = std::result::Result<T, PodcastError>;

/// Échec du catalogue d'épisodes
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Erreur Spotify (transport, authentification ou API)
    #[error(transparent)]
    Spotify(#[from] pmospotify::SpotifyError),

    /// Autre erreur du catalogue
    #[error("{0}")]
    Other(String),
}

/// Échec signalé par un lecteur distant
#[derive(Error, Debug)]
pub enum DeviceError {
    /// Le lecteur n'a pas pu être joint
    #[error("HTTP request to device failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Le lecteur a répondu mais refusé la commande
    #[error("{command} refused for {target} (HTTP {status}): {message}")]
    Rejected {
        command: String,
        target: String,
        status: u16,
        message: String,
    },

    /// Configuration du lecteur incomplète
    #[error("Device configuration error: {0}")]
    Configuration(String),

    /// Autre erreur du lecteur
    #[error("{0}")]
    Other(String),
}

/// Erreurs qui terminent une requête de lecture
///
/// Aucune n'est rejouée. « Aucun épisode ne correspond » n'est pas une
/// erreur, voir [`PlayOutcome::NoMatch`](crate::PlayOutcome::NoMatch).
#[derive(Error, Debug)]
pub enum PodcastError {
    /// La référence du podcast n'a pas de partie `show/<token>`
    #[error("Invalid Spotify podcast URL: {0}")]
    InvalidReference(String),

    /// Le mot-clé de filtre est vide
    #[error("Filter keywords must not be empty")]
    MissingFilter,

    /// Aucune référence de podcast fournie ni configurée
    #[error("No podcast URL provided")]
    MissingPodcastUrl,

    /// La fenêtre doit contenir au moins un épisode
    #[error("Invalid number of episodes to check: {0}")]
    InvalidWindow(u32),

    /// Le catalogue n'a pas pu être lu
    #[error("Failed to fetch episodes: {0}")]
    Source(#[from] CatalogError),

    /// Le lecteur a refusé la commande de lecture
    #[error("Playback device error: {0}")]
    Device(#[from] DeviceError),

    /// Erreur de configuration (pmoconfig/anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl From<pmospotify::SpotifyError> for PodcastError {
    fn from(err: pmospotify::SpotifyError) -> Self {
        Self::Source(CatalogError::Spotify(err))
    }
}
