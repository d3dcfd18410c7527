//! Module d'accès aux shows (podcasts) et à leurs épisodes

use super::SpotifyApi;
use crate::error::{Result, SpotifyError};
use crate::models::{Episode, EpisodePage, Show};
use serde::Deserialize;
use tracing::debug;

/// Nombre maximum d'épisodes par page accepté par l'API
pub const MAX_PAGE_LIMIT: u32 = 50;

/// Réponse de l'endpoint /shows/{id}/episodes
///
/// `items` reste optionnel pour distinguer une page vide d'une réponse
/// malformée. Spotify renvoie `null` à la place des épisodes indisponibles.
#[derive(Debug, Deserialize)]
struct EpisodesResponse {
    #[serde(default)]
    items: Option<Vec<Option<Episode>>>,
    #[serde(default)]
    total: Option<u32>,
    #[serde(default)]
    offset: Option<u32>,
    #[serde(default)]
    next: Option<String>,
}

impl SpotifyApi {
    /// Récupère les informations d'un show
    pub async fn get_show(&self, token: &str, show_id: &str, market: Option<&str>) -> Result<Show> {
        let params = market_param(market);
        self.get(token, &format!("/shows/{}", show_id), &params).await
    }

    /// Récupère une page d'épisodes d'un show
    ///
    /// # Arguments
    ///
    /// * `show_id` - Identifiant du show
    /// * `offset` - Index du premier épisode (None = depuis le plus récent)
    /// * `limit` - Taille de la page, bornée à [1, 50]
    /// * `market` - Code pays ISO 3166-1 optionnel
    ///
    /// # Errors
    ///
    /// `SpotifyError::MalformedResponse` si la réponse ne contient pas `items`.
    pub async fn get_show_episodes(
        &self,
        token: &str,
        show_id: &str,
        offset: Option<u32>,
        limit: u32,
        market: Option<&str>,
    ) -> Result<EpisodePage> {
        let limit = limit.clamp(1, MAX_PAGE_LIMIT);
        let mut params = vec![("limit", limit.to_string())];
        if let Some(offset) = offset {
            params.push(("offset", offset.to_string()));
        }
        params.extend(market_param(market));

        let response: EpisodesResponse = self
            .get(token, &format!("/shows/{}/episodes", show_id), &params)
            .await?;

        let raw_items = response.items.ok_or_else(|| {
            SpotifyError::MalformedResponse(format!("no items in episode page of show {show_id}"))
        })?;

        let returned = raw_items.len();
        let items: Vec<Episode> = raw_items.into_iter().flatten().collect();
        if items.len() != returned {
            debug!(
                "Skipped {} unavailable episode(s) of show {}",
                returned - items.len(),
                show_id
            );
        }

        Ok(EpisodePage {
            items,
            total: response.total,
            offset: response.offset.or(offset).unwrap_or(0),
            next: response.next,
        })
    }
}

fn market_param(market: Option<&str>) -> Vec<(&'static str, String)> {
    market
        .filter(|m| !m.is_empty())
        .map(|m| vec![("market", m.to_string())])
        .unwrap_or_default()
}
