//! Client principal pour interagir avec l'API Spotify
//!
//! Ce module fournit un client haut-niveau qui gère lui-même le token
//! client credentials : il est obtenu à la première requête puis réutilisé
//! jusqu'à son expiration. Les réponses de l'API ne sont jamais mises en cache.

use crate::api::{
    DEFAULT_ACCOUNTS_BASE_URL, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, SpotifyApi,
};
use crate::config_ext::SpotifyConfigExt;
use crate::error::Result;
use crate::models::{AccessToken, EpisodePage, Show};
use pmoconfig::Config;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Client Spotify haut-niveau
#[derive(Debug)]
pub struct SpotifyClient {
    api: SpotifyApi,
    market: Option<String>,
    token: Mutex<Option<AccessToken>>,
}

impl SpotifyClient {
    /// Crée un client avec les credentials d'une application Spotify
    ///
    /// Aucune requête n'est faite avant le premier appel.
    ///
    /// # Exemple
    ///
    /// ```rust,no_run
    /// use pmospotify::SpotifyClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let client = SpotifyClient::new("client_id", "client_secret")?;
    ///     let page = client.get_show_episodes("0onVY7weTsqjZLM8y3Tt9A", None, 5).await?;
    ///     for episode in page.items {
    ///         println!("{} ({})", episode.name, episode.release_date);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub fn new(client_id: &str, client_secret: &str) -> Result<Self> {
        Self::builder(client_id, client_secret).build()
    }

    /// Crée un builder pour configurer le client
    pub fn builder(client_id: &str, client_secret: &str) -> ClientBuilder {
        ClientBuilder::new(client_id, client_secret)
    }

    /// Crée un client depuis un objet Config
    pub fn from_config_obj(config: &Config) -> Result<Self> {
        let (client_id, client_secret) = config.get_spotify_credentials()?;
        let mut builder = Self::builder(&client_id, &client_secret);
        if let Some(market) = config.get_spotify_market()? {
            builder = builder.market(market);
        }
        builder.build()
    }

    /// Retourne l'API bas-niveau
    pub fn api(&self) -> &SpotifyApi {
        &self.api
    }

    /// Retourne le marché utilisé pour les requêtes, s'il est configuré
    pub fn market(&self) -> Option<&str> {
        self.market.as_deref()
    }

    /// Retourne un token valide, en le renouvelant si nécessaire
    async fn access_token(&self) -> Result<String> {
        let mut slot = self.token.lock().await;
        if let Some(token) = slot.as_ref() {
            if !token.is_expired() {
                return Ok(token.value.clone());
            }
            debug!("Spotify access token expired, requesting a new one");
        }

        let token = self.api.request_token().await?;
        let value = token.value.clone();
        *slot = Some(token);
        Ok(value)
    }

    /// Vérifie que les credentials sont acceptés par Spotify
    ///
    /// Force l'obtention d'un nouveau token.
    pub async fn validate_credentials(&self) -> Result<()> {
        let token = self.api.request_token().await?;
        info!("Spotify credentials accepted");
        *self.token.lock().await = Some(token);
        Ok(())
    }

    // ============ Shows ============

    /// Récupère les informations d'un show
    pub async fn get_show(&self, show_id: &str) -> Result<Show> {
        let token = self.access_token().await?;
        self.api.get_show(&token, show_id, self.market()).await
    }

    /// Récupère une fenêtre d'épisodes d'un show, du plus récent au plus ancien
    pub async fn get_show_episodes(
        &self,
        show_id: &str,
        offset: Option<u32>,
        limit: u32,
    ) -> Result<EpisodePage> {
        let token = self.access_token().await?;
        self.api
            .get_show_episodes(&token, show_id, offset, limit, self.market())
            .await
    }
}

/// Builder pour [`SpotifyClient`]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    client_id: String,
    client_secret: String,
    api_base_url: String,
    accounts_base_url: String,
    timeout: Duration,
    market: Option<String>,
}

impl ClientBuilder {
    fn new(client_id: &str, client_secret: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            accounts_base_url: DEFAULT_ACCOUNTS_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            market: None,
        }
    }

    /// Remplace l'URL de l'API Web (tests, proxy)
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Remplace l'URL du service d'authentification
    pub fn accounts_base_url(mut self, url: impl Into<String>) -> Self {
        self.accounts_base_url = url.into();
        self
    }

    /// Timeout des requêtes HTTP
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Marché (code pays) transmis aux requêtes de catalogue
    pub fn market(mut self, market: impl Into<String>) -> Self {
        let market = market.into();
        self.market = (!market.is_empty()).then_some(market);
        self
    }

    /// Construit le client
    pub fn build(self) -> Result<SpotifyClient> {
        let http = Client::builder().timeout(self.timeout).build()?;
        Ok(SpotifyClient {
            api: SpotifyApi::with_client(
                http,
                self.api_base_url,
                self.accounts_base_url,
                self.client_id,
                self.client_secret,
            ),
            market: self.market,
            token: Mutex::new(None),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = SpotifyClient::builder("id", "secret");
        assert_eq!(builder.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(builder.accounts_base_url, DEFAULT_ACCOUNTS_BASE_URL);
        assert_eq!(
            builder.timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert!(builder.market.is_none());
    }

    #[test]
    fn test_empty_market_is_ignored() {
        let client = SpotifyClient::builder("id", "secret")
            .market("")
            .build()
            .unwrap();
        assert_eq!(client.market(), None);

        let client = SpotifyClient::builder("id", "secret")
            .market("FR")
            .build()
            .unwrap();
        assert_eq!(client.market(), Some("FR"));
    }
}
