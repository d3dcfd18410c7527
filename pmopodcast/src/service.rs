//! Service `play_filtered_episode`
//!
//! Point d'entrée d'une requête de lecture : applique les valeurs de repli,
//! résout l'épisode puis le confie au séquenceur.

use tracing::{info, warn};

use crate::device::DeviceSink;
use crate::error::{PodcastError, Result};
use crate::model::{
    DEFAULT_EPISODES_TO_CHECK, DEFAULT_FILTER_KEYWORDS, DEFAULT_START_TIME, Episode, FilterSpec,
};
use crate::resolver::EpisodeResolver;
use crate::sequencer::{PlaybackAck, PlaybackSequencer};
use crate::source::EpisodeSource;

/// Paramètres d'une requête `play_filtered_episode`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayFilteredEpisode {
    /// Lecteur cible (obligatoire)
    pub entity_id: String,
    /// Référence du podcast, la valeur configurée si absente ou vide
    pub podcast_url: Option<String>,
    /// Mot-clé, la valeur configurée si absent ou vide
    pub filter_keywords: Option<String>,
    pub start_time: u64,
    pub episodes_to_check: u32,
}

impl PlayFilteredEpisode {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            podcast_url: None,
            filter_keywords: None,
            start_time: DEFAULT_START_TIME,
            episodes_to_check: DEFAULT_EPISODES_TO_CHECK,
        }
    }

    pub fn podcast_url(mut self, url: impl Into<String>) -> Self {
        self.podcast_url = Some(url.into());
        self
    }

    pub fn filter_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.filter_keywords = Some(keywords.into());
        self
    }

    pub fn start_time(mut self, seconds: u64) -> Self {
        self.start_time = seconds;
        self
    }

    pub fn episodes_to_check(mut self, count: u32) -> Self {
        self.episodes_to_check = count;
        self
    }
}

/// Valeurs de repli configurées
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodcastDefaults {
    pub podcast_url: Option<String>,
    pub filter_keywords: String,
}

impl Default for PodcastDefaults {
    fn default() -> Self {
        Self {
            podcast_url: None,
            filter_keywords: DEFAULT_FILTER_KEYWORDS.to_string(),
        }
    }
}

/// Issue d'une requête de lecture
#[derive(Debug)]
pub enum PlayOutcome {
    /// L'épisode a été accepté par le lecteur
    Played { episode: Episode, ack: PlaybackAck },
    /// Aucun épisode de la fenêtre ne correspond : rien n'a été envoyé au lecteur
    NoMatch { filter: String, episodes_checked: u32 },
}

impl PlayOutcome {
    pub fn episode(&self) -> Option<&Episode> {
        match self {
            PlayOutcome::Played { episode, .. } => Some(episode),
            PlayOutcome::NoMatch { .. } => None,
        }
    }

    /// Attend le seek différé éventuel
    pub async fn settled(self) {
        if let PlayOutcome::Played { ack, .. } = self {
            ack.settled().await;
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Lecteur de podcast : résolveur + séquenceur + valeurs de repli
pub struct PodcastPlayer<S, D: ?Sized> {
    resolver: EpisodeResolver<S>,
    sequencer: PlaybackSequencer<D>,
    defaults: PodcastDefaults,
}

impl<S, D> PodcastPlayer<S, D>
where
    S: EpisodeSource,
    D: DeviceSink + ?Sized + 'static,
{
    pub fn new(
        resolver: EpisodeResolver<S>,
        sequencer: PlaybackSequencer<D>,
        defaults: PodcastDefaults,
    ) -> Self {
        Self {
            resolver,
            sequencer,
            defaults,
        }
    }

    pub fn resolver(&self) -> &EpisodeResolver<S> {
        &self.resolver
    }

    pub fn defaults(&self) -> &PodcastDefaults {
        &self.defaults
    }

    /// Joue l'épisode récent correspondant au filtre
    ///
    /// # Errors
    ///
    /// - [`PodcastError::MissingPodcastUrl`] sans référence ni valeur configurée
    /// - [`PodcastError::MissingFilter`] si le filtre résolu est vide
    /// - les erreurs de [`EpisodeResolver::resolve`] et de
    ///   [`PlaybackSequencer::execute`]
    pub async fn play_filtered_episode(&self, request: PlayFilteredEpisode) -> Result<PlayOutcome> {
        let podcast_url = non_empty(request.podcast_url.as_deref())
            .or(non_empty(self.defaults.podcast_url.as_deref()))
            .ok_or(PodcastError::MissingPodcastUrl)?;

        let keyword = non_empty(request.filter_keywords.as_deref())
            .unwrap_or(&self.defaults.filter_keywords);
        let filter = FilterSpec::new(keyword)?;

        let episode = self
            .resolver
            .resolve(podcast_url, &filter, request.episodes_to_check)
            .await?;

        let Some(episode) = episode else {
            warn!(
                "No episode found matching filter '{}' in the last {} episodes",
                filter, request.episodes_to_check
            );
            return Ok(PlayOutcome::NoMatch {
                filter: filter.keyword().to_string(),
                episodes_checked: request.episodes_to_check,
            });
        };

        info!(
            "Playing episode {} on device {} at {} seconds",
            episode.name, request.entity_id, request.start_time
        );
        let ack = self
            .sequencer
            .play(&request.entity_id, &episode, request.start_time)
            .await?;

        Ok(PlayOutcome::Played { episode, ack })
    }
}
