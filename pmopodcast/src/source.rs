//! Source d'épisodes
//!
//! Le trait [`EpisodeSource`] abstrait le catalogue : il renvoie une fenêtre
//! d'épisodes d'un show, du plus récent au plus ancien. L'implémentation
//! réelle est [`pmospotify::SpotifyClient`].

use std::sync::Arc;

use async_trait::async_trait;
use pmospotify::SpotifyClient;
use tracing::debug;

use crate::error::CatalogError;
use crate::model::{Episode, ShowId};

/// Catalogue d'épisodes
#[async_trait]
pub trait EpisodeSource: Send + Sync {
    /// Récupère au plus `limit` épisodes à partir de `offset`
    ///
    /// L'ordre est celui du catalogue (le plus récent d'abord pour Spotify).
    /// Une fenêtre vide n'est pas une erreur.
    async fn fetch_episodes(
        &self,
        show_id: &ShowId,
        offset: Option<u32>,
        limit: u32,
    ) -> Result<Vec<Episode>, CatalogError>;
}

#[async_trait]
impl EpisodeSource for SpotifyClient {
    async fn fetch_episodes(
        &self,
        show_id: &ShowId,
        offset: Option<u32>,
        limit: u32,
    ) -> Result<Vec<Episode>, CatalogError> {
        let page = self
            .get_show_episodes(show_id.as_str(), offset, limit)
            .await?;
        debug!(
            "Spotify returned {} episodes for show {} (total: {:?})",
            page.items.len(),
            show_id,
            page.total
        );
        Ok(page.items.into_iter().map(Episode::from).collect())
    }
}

#[async_trait]
impl<S: EpisodeSource + ?Sized> EpisodeSource for Arc<S> {
    async fn fetch_episodes(
        &self,
        show_id: &ShowId,
        offset: Option<u32>,
        limit: u32,
    ) -> Result<Vec<Episode>, CatalogError> {
        (**self).fetch_episodes(show_id, offset, limit).await
    }
}
