//! Résolution d'épisode : premier épisode récent correspondant au filtre

use tracing::{debug, info};

use crate::error::{PodcastError, Result};
use crate::model::{Episode, FilterSpec, ShowId};
use crate::source::EpisodeSource;

/// Taille maximale de fenêtre (taille de page de l'API Spotify)
pub const MAX_WINDOW_SIZE: u32 = 50;

/// Sélectionne le premier épisode de la fenêtre qui correspond au filtre
///
/// L'ordre de la fenêtre est conservé : avec un catalogue trié du plus
/// récent au plus ancien, c'est l'épisode correspondant le plus récent.
pub fn select_episode(window: Vec<Episode>, filter: &FilterSpec) -> Option<Episode> {
    for episode in window {
        let matched = filter.matches(&episode);
        debug!(
            "Checking episode: {} ({}) match={}",
            episode.name, episode.release_date, matched
        );
        if matched {
            return Some(episode);
        }
    }
    None
}

/// Tous les épisodes de la fenêtre qui correspondent au filtre, dans l'ordre
pub fn matching_episodes<'a>(window: &'a [Episode], filter: &FilterSpec) -> Vec<&'a Episode> {
    window.iter().filter(|episode| filter.matches(episode)).collect()
}

/// Résolveur d'épisode au-dessus d'une [`EpisodeSource`]
pub struct EpisodeResolver<S> {
    source: S,
}

impl<S: EpisodeSource> EpisodeResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Récupère la fenêtre des `window_size` épisodes les plus récents
    ///
    /// La référence est analysée avant tout appel au catalogue. La taille
    /// est ramenée à [`MAX_WINDOW_SIZE`].
    pub async fn fetch_window(&self, show_ref: &str, window_size: u32) -> Result<Vec<Episode>> {
        let show_id = ShowId::from_reference(show_ref)?;
        if window_size == 0 {
            return Err(PodcastError::InvalidWindow(window_size));
        }
        let limit = window_size.min(MAX_WINDOW_SIZE);

        debug!("Fetching {} most recent episodes of show {}", limit, show_id);
        Ok(self.source.fetch_episodes(&show_id, None, limit).await?)
    }

    /// Résout l'épisode à jouer
    ///
    /// Renvoie `Ok(None)` si aucun épisode de la fenêtre ne correspond.
    ///
    /// # Errors
    ///
    /// - [`PodcastError::InvalidReference`] si la référence n'a pas de partie `show/...`
    /// - [`PodcastError::InvalidWindow`] si `window_size` vaut 0
    /// - [`PodcastError::Source`] si le catalogue échoue
    pub async fn resolve(
        &self,
        show_ref: &str,
        filter: &FilterSpec,
        window_size: u32,
    ) -> Result<Option<Episode>> {
        let window = self.fetch_window(show_ref, window_size).await?;
        let selected = select_episode(window, filter);
        match &selected {
            Some(episode) => info!(
                "Found episode matching '{}': {} ({})",
                filter, episode.name, episode.uri
            ),
            None => debug!("No episode matches '{}'", filter),
        }
        Ok(selected)
    }
}
