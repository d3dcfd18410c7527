//! # pmopodcast - Lecture d'épisodes de podcast filtrés
//!
//! Cette crate trouve l'épisode le plus récent d'un podcast dont le titre ou
//! la description contient un mot-clé, puis le joue sur un lecteur distant,
//! éventuellement à partir d'une position donnée.
//!
//! ## Architecture
//!
//! - [`EpisodeSource`] : catalogue d'épisodes (implémenté par `pmospotify::SpotifyClient`)
//! - [`EpisodeResolver`] : sélection du premier épisode correspondant au filtre
//! - [`DeviceSink`] : lecteur distant (implémenté par [`HomeAssistantSink`])
//! - [`PlaybackSequencer`] : lecture puis seek différé de [`SETTLE_DELAY`]
//! - [`PodcastPlayer`] : le service `play_filtered_episode`
//! - [`PodcastConfigExt`] : valeurs par défaut dans `pmoconfig`
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use pmoconfig::Config;
//! use pmopodcast::{
//!     EpisodeResolver, HomeAssistantSink, PlayFilteredEpisode, PlaybackSequencer,
//!     PodcastConfigExt, PodcastPlayer,
//! };
//! use pmospotify::SpotifyClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_config("")?;
//!     let player = PodcastPlayer::new(
//!         EpisodeResolver::new(SpotifyClient::from_config_obj(&config)?),
//!         PlaybackSequencer::new(Arc::new(HomeAssistantSink::from_config_obj(&config)?)),
//!         config.get_podcast_defaults(),
//!     );
//!
//!     let outcome = player
//!         .play_filtered_episode(PlayFilteredEpisode::new("media_player.kitchen").start_time(30))
//!         .await?;
//!     outcome.settled().await;
//!     Ok(())
//! }
//! ```

pub mod config_ext;
pub mod device;
pub mod error;
pub mod hass;
pub mod model;
pub mod resolver;
pub mod sequencer;
pub mod service;
pub mod source;

pub use config_ext::PodcastConfigExt;
pub use device::{DeviceSink, PlayCommand, SeekCommand};
pub use error::{CatalogError, DeviceError, PodcastError, Result};
pub use hass::HomeAssistantSink;
pub use model::{
    DEFAULT_EPISODES_TO_CHECK, DEFAULT_FILTER_KEYWORDS, DEFAULT_START_TIME, Episode, FilterSpec,
    PlaybackRequest, ShowId,
};
pub use resolver::{EpisodeResolver, MAX_WINDOW_SIZE, matching_episodes, select_episode};
pub use sequencer::{PlaybackAck, PlaybackSequencer, SETTLE_DELAY, ScheduledSeek};
pub use service::{PlayFilteredEpisode, PlayOutcome, PodcastDefaults, PodcastPlayer};
pub use source::EpisodeSource;
