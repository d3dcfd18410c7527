//! Lecteur Home Assistant
//!
//! Pilote une entité `media_player` via l'API REST de Home Assistant :
//!
//! - `POST /api/services/media_player/play_media`
//! - `POST /api/services/media_player/media_seek`
//!
//! L'authentification se fait par un jeton d'accès longue durée (Bearer).

use std::time::Duration;

use async_trait::async_trait;
use pmoconfig::Config;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::config_ext::PodcastConfigExt;
use crate::device::{DeviceSink, PlayCommand, SeekCommand};
use crate::error::DeviceError;

/// Timeout par défaut des requêtes vers Home Assistant
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct PlayMediaData<'a> {
    entity_id: &'a str,
    media_content_id: &'a str,
    media_content_type: &'a str,
}

#[derive(Serialize)]
struct MediaSeekData<'a> {
    entity_id: &'a str,
    seek_position: u64,
}

/// Client des services `media_player` de Home Assistant
#[derive(Debug, Clone)]
pub struct HomeAssistantSink {
    client: Client,
    base_url: String,
    token: String,
}

impl HomeAssistantSink {
    /// Crée un client pour l'instance `base_url` (ex: `http://homeassistant.local:8123`)
    pub fn new(base_url: &str, token: &str) -> Result<Self, DeviceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("pmopodcast/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url, token))
    }

    /// Crée un client à partir d'un `reqwest::Client` existant
    pub fn with_client(client: Client, base_url: &str, token: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Crée un client depuis la section `devices.homeassistant` de la configuration
    pub fn from_config_obj(config: &Config) -> Result<Self, DeviceError> {
        let url = config
            .get_homeassistant_url()
            .map_err(|e| DeviceError::Configuration(e.to_string()))?;
        let token = config
            .get_homeassistant_token()
            .map_err(|e| DeviceError::Configuration(e.to_string()))?;
        Self::new(&url, &token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call_service<T: Serialize + ?Sized>(
        &self,
        service: &str,
        target: &str,
        data: &T,
    ) -> Result<(), DeviceError> {
        let url = format!("{}/api/services/media_player/{}", self.base_url, service);
        debug!("POST {} for {}", url, target);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(data)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or(body);

        Err(DeviceError::Rejected {
            command: service.to_string(),
            target: target.to_string(),
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl DeviceSink for HomeAssistantSink {
    async fn play(&self, command: &PlayCommand) -> Result<(), DeviceError> {
        let data = PlayMediaData {
            entity_id: &command.target,
            media_content_id: &command.content_reference,
            media_content_type: &command.content_type,
        };
        self.call_service("play_media", &command.target, &data).await
    }

    async fn seek(&self, command: &SeekCommand) -> Result<(), DeviceError> {
        let data = MediaSeekData {
            entity_id: &command.target,
            seek_position: command.position_seconds,
        };
        self.call_service("media_seek", &command.target, &data).await
    }
}
