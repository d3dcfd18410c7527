use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "pmopodcast",
    version,
    about = "Play the latest podcast episode matching a keyword on a Home Assistant media player"
)]
pub struct Cli {
    /// Configuration directory (defaults to $PMOPODCAST_CONFIG, ./.pmopodcast, ~/.pmopodcast)
    #[arg(long, global = true, default_value = "")]
    pub config_dir: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play the most recent episode matching the filter
    Play {
        /// Target media player entity (ex: media_player.kitchen)
        entity_id: String,

        /// Spotify show URL (defaults to podcast.podcast_url)
        #[arg(long)]
        podcast_url: Option<String>,

        /// Keyword searched in episode titles and descriptions (defaults to podcast.filter_keywords)
        #[arg(long)]
        filter: Option<String>,

        /// Start position in seconds (defaults to podcast.start_time)
        #[arg(long)]
        start_time: Option<u64>,

        /// Number of recent episodes to check (defaults to podcast.episodes_to_check)
        #[arg(long)]
        episodes_to_check: Option<u32>,
    },

    /// Show podcast information and its most recent episodes
    Episodes {
        /// Spotify show URL (defaults to podcast.podcast_url)
        podcast_url: Option<String>,

        /// Number of recent episodes to list
        #[arg(long, default_value_t = pmopodcast::DEFAULT_EPISODES_TO_CHECK)]
        limit: u32,

        /// Only list episodes matching this keyword
        #[arg(long)]
        filter: Option<String>,
    },

    /// Check the Spotify application credentials
    CheckCredentials,

    /// Print the encrypted form of a secret for config.yaml
    EncryptSecret {
        secret: String,
    },
}
