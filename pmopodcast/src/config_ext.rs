//! Extension pour intégrer la configuration du lecteur de podcast dans pmoconfig
//!
//! Sections gérées :
//!
//! ```yaml
//! podcast:
//!   podcast_url: "https://open.spotify.com/show/..."
//!   filter_keywords: "Headlines:"
//!   start_time: 0
//!   episodes_to_check: 5
//! devices:
//!   homeassistant:
//!     url: "http://homeassistant.local:8123"
//!     token: "encrypted:..."
//! ```

use anyhow::{Result, anyhow};
use pmoconfig::Config;
use serde_yaml::Value;

use crate::model::{DEFAULT_EPISODES_TO_CHECK, DEFAULT_FILTER_KEYWORDS, DEFAULT_START_TIME};
use crate::service::PodcastDefaults;

/// Trait d'extension pour gérer la configuration du lecteur de podcast
pub trait PodcastConfigExt {
    /// Référence du podcast par défaut, None si non configurée
    fn get_podcast_url(&self) -> Option<String>;

    fn set_podcast_url(&self, url: &str) -> Result<()>;

    /// Mot-clé de filtre par défaut (`Headlines:` si non configuré)
    fn get_filter_keywords(&self) -> String;

    fn set_filter_keywords(&self, keywords: &str) -> Result<()>;

    /// Position de départ par défaut en secondes
    fn get_start_time(&self) -> u64;

    fn set_start_time(&self, seconds: u64) -> Result<()>;

    /// Nombre d'épisodes récents examinés par défaut
    fn get_episodes_to_check(&self) -> u32;

    fn set_episodes_to_check(&self, count: u32) -> Result<()>;

    /// URL de l'instance Home Assistant
    fn get_homeassistant_url(&self) -> Result<String>;

    fn set_homeassistant_url(&self, url: &str) -> Result<()>;

    /// Jeton d'accès Home Assistant, déchiffré s'il est stocké chiffré
    fn get_homeassistant_token(&self) -> Result<String>;

    fn set_homeassistant_token(&self, token: &str) -> Result<()>;

    /// Valeurs de repli d'une requête de lecture
    fn get_podcast_defaults(&self) -> PodcastDefaults;
}

impl PodcastConfigExt for Config {
    fn get_podcast_url(&self) -> Option<String> {
        self.get_string(&["podcast", "podcast_url"])
    }

    fn set_podcast_url(&self, url: &str) -> Result<()> {
        self.set_value(&["podcast", "podcast_url"], Value::String(url.to_string()))
    }

    fn get_filter_keywords(&self) -> String {
        self.get_string(&["podcast", "filter_keywords"])
            .unwrap_or_else(|| DEFAULT_FILTER_KEYWORDS.to_string())
    }

    fn set_filter_keywords(&self, keywords: &str) -> Result<()> {
        self.set_value(
            &["podcast", "filter_keywords"],
            Value::String(keywords.to_string()),
        )
    }

    fn get_start_time(&self) -> u64 {
        self.get_u64_or(&["podcast", "start_time"], DEFAULT_START_TIME)
    }

    fn set_start_time(&self, seconds: u64) -> Result<()> {
        self.set_u64(&["podcast", "start_time"], seconds)
    }

    fn get_episodes_to_check(&self) -> u32 {
        let count = self.get_u64_or(
            &["podcast", "episodes_to_check"],
            DEFAULT_EPISODES_TO_CHECK as u64,
        );
        u32::try_from(count).unwrap_or(DEFAULT_EPISODES_TO_CHECK)
    }

    fn set_episodes_to_check(&self, count: u32) -> Result<()> {
        self.set_u64(&["podcast", "episodes_to_check"], count as u64)
    }

    fn get_homeassistant_url(&self) -> Result<String> {
        self.get_string(&["devices", "homeassistant", "url"])
            .ok_or_else(|| anyhow!("Home Assistant url not configured"))
    }

    fn set_homeassistant_url(&self, url: &str) -> Result<()> {
        self.set_value(
            &["devices", "homeassistant", "url"],
            Value::String(url.to_string()),
        )
    }

    fn get_homeassistant_token(&self) -> Result<String> {
        self.get_secret(&["devices", "homeassistant", "token"])?
            .ok_or_else(|| anyhow!("Home Assistant token not configured"))
    }

    fn set_homeassistant_token(&self, token: &str) -> Result<()> {
        self.set_value(
            &["devices", "homeassistant", "token"],
            Value::String(token.to_string()),
        )
    }

    fn get_podcast_defaults(&self) -> PodcastDefaults {
        PodcastDefaults {
            podcast_url: self.get_podcast_url(),
            filter_keywords: self.get_filter_keywords(),
        }
    }
}
