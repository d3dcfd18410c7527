//! Structures de données pour représenter les objets Spotify

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Marge retirée de la durée de vie annoncée d'un token
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

/// Token d'accès obtenu par le flux client credentials
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// Valeur du bearer token
    pub value: String,
    /// Instant à partir duquel le token n'est plus réutilisé
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Construit un token à partir de la durée de vie renvoyée par Spotify
    pub fn new(value: impl Into<String>, expires_in_secs: i64) -> Self {
        let lifetime = (expires_in_secs - TOKEN_EXPIRY_MARGIN_SECS).max(0);
        Self {
            value: value.into(),
            expires_at: Utc::now() + Duration::seconds(lifetime),
        }
    }

    /// Vérifie si le token doit être renouvelé
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Représente un podcast (show) Spotify
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Show {
    /// Identifiant Spotify du show
    pub id: String,
    /// Nom du show
    pub name: String,
    /// Éditeur
    #[serde(default)]
    pub publisher: String,
    /// Description en texte brut
    #[serde(default)]
    pub description: String,
    /// Nombre total d'épisodes publiés
    #[serde(default)]
    pub total_episodes: u32,
    /// URI Spotify (`spotify:show:...`)
    pub uri: String,
}

/// Représente un épisode Spotify
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    /// Identifiant Spotify de l'épisode
    pub id: String,
    /// URI Spotify (`spotify:episode:...`), utilisable directement pour la lecture
    pub uri: String,
    /// Titre de l'épisode
    pub name: String,
    /// Description en texte brut
    #[serde(default)]
    pub description: String,
    /// Date de sortie, précision variable (`2024`, `2024-03`, `2024-03-18`)
    #[serde(default)]
    pub release_date: String,
    /// Durée en millisecondes
    #[serde(default)]
    pub duration_ms: u64,
}

/// Page d'épisodes telle que renvoyée par `/shows/{id}/episodes`
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodePage {
    /// Épisodes dans l'ordre renvoyé par l'API (du plus récent au plus ancien)
    pub items: Vec<Episode>,
    /// Nombre total d'épisodes du show
    pub total: Option<u32>,
    /// Offset de la page
    pub offset: u32,
    /// URL de la page suivante, si elle existe
    pub next: Option<String>,
}
