//! Module d'authentification (flux OAuth2 client credentials)

use super::{SpotifyApi, error_message};
use crate::error::{Result, SpotifyError};
use crate::models::AccessToken;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Réponse de l'endpoint /api/token
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    expires_in: i64,
}

impl SpotifyApi {
    /// Obtient un token d'accès avec le client id et le client secret
    ///
    /// # Errors
    ///
    /// * `SpotifyError::Unauthorized` - client id / secret refusés
    /// * `SpotifyError::Http` - erreur de transport
    pub async fn request_token(&self) -> Result<AccessToken> {
        info!("Requesting Spotify access token for client {}", self.client_id);

        let url = format!("{}/api/token", self.accounts_base_url);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            warn!("Token request refused ({}): {}", status, message);
            // Le service de comptes répond 400 invalid_client pour des credentials faux
            return Err(match status.as_u16() {
                400 | 401 | 403 => SpotifyError::Unauthorized(message),
                code => SpotifyError::from_status_code(code, message),
            });
        }

        let token: TokenResponse = response.json().await?;
        debug!(
            "Token obtained (type {:?}, expires in {}s)",
            token.token_type, token.expires_in
        );

        Ok(AccessToken::new(token.access_token, token.expires_in))
    }
}
