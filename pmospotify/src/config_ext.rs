//! Extension pour intégrer la configuration Spotify dans pmoconfig
//!
//! Ce module fournit le trait `SpotifyConfigExt` qui ajoute à
//! `pmoconfig::Config` la gestion des credentials de l'application Spotify
//! (section `accounts.spotify`).

use anyhow::{Result, anyhow};
use pmoconfig::Config;
use serde_yaml::Value;

/// Trait d'extension pour gérer la configuration Spotify dans pmoconfig
///
/// # Exemple
///
/// ```rust,ignore
/// use pmoconfig::Config;
/// use pmospotify::SpotifyConfigExt;
///
/// let config = Config::load_config("")?;
/// let (client_id, _secret) = config.get_spotify_credentials()?;
/// println!("Spotify application: {}", client_id);
/// ```
pub trait SpotifyConfigExt {
    /// Récupère le client ID de l'application Spotify
    ///
    /// # Errors
    ///
    /// Retourne une erreur si le client ID n'est pas configuré
    fn get_spotify_client_id(&self) -> Result<String>;

    /// Définit le client ID de l'application Spotify
    fn set_spotify_client_id(&self, client_id: &str) -> Result<()>;

    /// Récupère le client secret, déchiffré s'il est stocké chiffré
    ///
    /// # Errors
    ///
    /// Retourne une erreur si le secret n'est pas configuré ou ne peut pas
    /// être déchiffré
    fn get_spotify_client_secret(&self) -> Result<String>;

    /// Définit le client secret (en clair ou au format `encrypted:...`)
    fn set_spotify_client_secret(&self, client_secret: &str) -> Result<()>;

    /// Récupère les credentials (client_id, client_secret)
    fn get_spotify_credentials(&self) -> Result<(String, String)>;

    /// Récupère le marché (code pays ISO 3166-1), None si non configuré
    fn get_spotify_market(&self) -> Result<Option<String>>;

    /// Définit le marché
    fn set_spotify_market(&self, market: &str) -> Result<()>;
}

impl SpotifyConfigExt for Config {
    fn get_spotify_client_id(&self) -> Result<String> {
        self.get_string(&["accounts", "spotify", "client_id"])
            .ok_or_else(|| anyhow!("Spotify client_id not configured"))
    }

    fn set_spotify_client_id(&self, client_id: &str) -> Result<()> {
        self.set_value(
            &["accounts", "spotify", "client_id"],
            Value::String(client_id.to_string()),
        )
    }

    fn get_spotify_client_secret(&self) -> Result<String> {
        self.get_secret(&["accounts", "spotify", "client_secret"])?
            .ok_or_else(|| anyhow!("Spotify client_secret not configured"))
    }

    fn set_spotify_client_secret(&self, client_secret: &str) -> Result<()> {
        self.set_value(
            &["accounts", "spotify", "client_secret"],
            Value::String(client_secret.to_string()),
        )
    }

    fn get_spotify_credentials(&self) -> Result<(String, String)> {
        let client_id = self.get_spotify_client_id()?;
        let client_secret = self.get_spotify_client_secret()?;
        Ok((client_id, client_secret))
    }

    fn get_spotify_market(&self) -> Result<Option<String>> {
        Ok(self.get_string(&["accounts", "spotify", "market"]))
    }

    fn set_spotify_market(&self, market: &str) -> Result<()> {
        self.set_value(
            &["accounts", "spotify", "market"],
            Value::String(market.to_string()),
        )
    }
}
