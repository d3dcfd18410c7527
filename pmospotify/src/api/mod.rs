//! Couche d'accès à l'API REST Spotify
//!
//! Ce module fournit une interface bas-niveau : obtention du token
//! (`auth`) et lecture des shows et de leurs épisodes (`shows`). La gestion
//! de la durée de vie du token est laissée au [`SpotifyClient`](crate::SpotifyClient).

pub mod auth;
pub mod shows;

use crate::error::{Result, SpotifyError};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// URL de base de l'API Web Spotify
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";

/// URL de base du service d'authentification
pub const DEFAULT_ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";

/// Timeout par défaut des requêtes HTTP
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client API bas-niveau pour communiquer avec Spotify
#[derive(Debug, Clone)]
pub struct SpotifyApi {
    client: Client,
    api_base_url: String,
    accounts_base_url: String,
    client_id: String,
    client_secret: String,
}

impl SpotifyApi {
    /// Crée une nouvelle instance pointant sur les serveurs Spotify
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self::with_client(
            client,
            DEFAULT_API_BASE_URL,
            DEFAULT_ACCOUNTS_BASE_URL,
            client_id,
            client_secret,
        ))
    }

    /// Crée une instance avec un client HTTP et des URLs personnalisés
    pub fn with_client(
        client: Client,
        api_base_url: impl Into<String>,
        accounts_base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            accounts_base_url: accounts_base_url.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Retourne le client ID
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Retourne l'URL de base de l'API
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Effectue une requête GET authentifiée à l'API
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        token: &str,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.api_base_url, endpoint);
        debug!("GET {} with {} params", url, params.len());

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Traite la réponse HTTP
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let status_code = status.as_u16();

        debug!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = error_message(&error_text);
            warn!("Spotify API error ({}): {}", status_code, message);
            return Err(SpotifyError::from_status_code(status_code, message));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!("Failed to parse response: {}", e);
            SpotifyError::JsonParse(e)
        })
    }
}

/// Extrait un message lisible d'un corps d'erreur Spotify
///
/// L'API Web renvoie `{"error": {"status": 401, "message": "..."}}` tandis que
/// le service de comptes renvoie `{"error": "invalid_client",
/// "error_description": "..."}`.
pub(crate) fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };

    if let Some(message) = json
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
    {
        return message.to_string();
    }

    match (
        json.get("error").and_then(Value::as_str),
        json.get("error_description").and_then(Value::as_str),
    ) {
        (Some(code), Some(description)) => format!("{code}: {description}"),
        (Some(code), None) => code.to_string(),
        _ => body.trim().to_string(),
    }
}
