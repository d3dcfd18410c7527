//! Modèle de données : référence de show, épisode, filtre et requête de lecture

use std::fmt;
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{PodcastError, Result};

/// Mot-clé utilisé quand aucun filtre n'est fourni ni configuré
pub const DEFAULT_FILTER_KEYWORDS: &str = "Headlines:";

/// Nombre d'épisodes examinés par défaut
pub const DEFAULT_EPISODES_TO_CHECK: u32 = 5;

/// Position de départ par défaut, en secondes
pub const DEFAULT_START_TIME: u64 = 0;

/// Type de contenu transmis au lecteur
pub const EPISODE_CONTENT_TYPE: &str = "episode";

lazy_static! {
    static ref SHOW_ID_RE: Regex =
        Regex::new(r"show/([a-zA-Z0-9]+)").expect("show id regex is valid");
}

/// Identifiant opaque d'un show dans le catalogue
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShowId(String);

impl ShowId {
    /// Extrait l'identifiant d'une référence de podcast
    ///
    /// La référence est une chaîne libre (typiquement une URL de partage) :
    /// l'identifiant est le premier jeton alphanumérique qui suit `show/`.
    /// Les suffixes de requête (`?si=...`) sont ignorés.
    ///
    /// ```
    /// use pmopodcast::ShowId;
    ///
    /// let id = ShowId::from_reference("https://open.spotify.com/show/abc123?si=x").unwrap();
    /// assert_eq!(id.as_str(), "abc123");
    /// ```
    pub fn from_reference(reference: &str) -> Result<Self> {
        SHOW_ID_RE
            .captures(reference)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
            .ok_or_else(|| PodcastError::InvalidReference(reference.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Un épisode tel que vu par le résolveur
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub id: String,
    /// Référence de contenu transmise au lecteur (`spotify:episode:...`)
    pub uri: String,
    pub name: String,
    /// Description textuelle, vide si absente
    pub description: String,
    pub release_date: String,
    pub duration: Duration,
}

impl Episode {
    /// Construit un épisode avec une description et une durée vides
    pub fn new(id: impl Into<String>, uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
            name: name.into(),
            description: String::new(),
            release_date: String::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl From<pmospotify::Episode> for Episode {
    fn from(episode: pmospotify::Episode) -> Self {
        Self {
            id: episode.id,
            uri: episode.uri,
            name: episode.name,
            description: episode.description,
            release_date: episode.release_date,
            duration: Duration::from_millis(episode.duration_ms),
        }
    }
}

/// Filtre de sélection d'épisode
///
/// La comparaison est une recherche de sous-chaîne insensible à la casse
/// sur le titre puis sur la description. Le mot-clé n'est pas découpé en
/// mots : `"Headlines:"` doit apparaître tel quel, deux-points compris.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    keyword: String,
    needle: String,
}

impl FilterSpec {
    /// Crée un filtre
    ///
    /// # Errors
    ///
    /// [`PodcastError::MissingFilter`] si le mot-clé est vide (ou ne
    /// contient que des blancs).
    pub fn new(keyword: impl Into<String>) -> Result<Self> {
        let keyword = keyword.into();
        if keyword.trim().is_empty() {
            return Err(PodcastError::MissingFilter);
        }
        let needle = keyword.to_lowercase();
        Ok(Self { keyword, needle })
    }

    /// Le mot-clé tel que fourni
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Vrai si le mot-clé apparaît dans le titre ou la description
    pub fn matches(&self, episode: &Episode) -> bool {
        episode.name.to_lowercase().contains(&self.needle)
            || episode.description.to_lowercase().contains(&self.needle)
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_FILTER_KEYWORDS.to_string(),
            needle: DEFAULT_FILTER_KEYWORDS.to_lowercase(),
        }
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keyword)
    }
}

/// Requête de lecture adressée au séquenceur
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackRequest {
    /// Identifiant du lecteur cible (ex: `media_player.kitchen`)
    pub target: String,
    pub content_reference: String,
    /// Position de départ en secondes, 0 pour le début
    pub start_offset: u64,
}

impl PlaybackRequest {
    pub fn new(target: impl Into<String>, episode: &Episode, start_offset: u64) -> Self {
        Self {
            target: target.into(),
            content_reference: episode.uri.clone(),
            start_offset,
        }
    }

    /// Vrai si un seek doit suivre la commande de lecture
    pub fn needs_seek(&self) -> bool {
        self.start_offset > 0
    }
}
