use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use pmoconfig::Config;
use pmopodcast::{
    Episode, EpisodeResolver, FilterSpec, HomeAssistantSink, PlayFilteredEpisode, PlayOutcome,
    PlaybackSequencer, PodcastConfigExt, PodcastPlayer, ShowId, matching_episodes,
};
use pmospotify::SpotifyClient;
use tracing::{error, info};

use crate::cli::{Cli, Command};

/// Code de sortie quand aucun épisode ne correspond au filtre
const NO_MATCH_EXIT_CODE: u8 = 2;

const EXCERPT_LEN: usize = 100;

pub async fn run(cli: Cli, config: Config) -> Result<ExitCode> {
    match cli.command {
        Command::Play {
            entity_id,
            podcast_url,
            filter,
            start_time,
            episodes_to_check,
        } => {
            let request = play_request(
                &config,
                entity_id,
                podcast_url,
                filter,
                start_time,
                episodes_to_check,
            );
            play(&config, request).await
        }
        Command::Episodes {
            podcast_url,
            limit,
            filter,
        } => {
            episodes(&config, podcast_url, limit, filter).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::CheckCredentials => check_credentials(&config).await,
        Command::EncryptSecret { secret } => {
            let encrypted = pmoconfig::encryption::encrypt_secret(&secret)?;
            println!("{}", encrypted);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Construit la requête de lecture, les options absentes venant de la section `podcast`
///
/// L'URL et le filtre restent optionnels : leur repli est fait par le service.
fn play_request(
    config: &Config,
    entity_id: String,
    podcast_url: Option<String>,
    filter: Option<String>,
    start_time: Option<u64>,
    episodes_to_check: Option<u32>,
) -> PlayFilteredEpisode {
    PlayFilteredEpisode {
        entity_id,
        podcast_url,
        filter_keywords: filter,
        start_time: start_time.unwrap_or_else(|| config.get_start_time()),
        episodes_to_check: episodes_to_check.unwrap_or_else(|| config.get_episodes_to_check()),
    }
}

async fn play(config: &Config, request: PlayFilteredEpisode) -> Result<ExitCode> {
    let client = SpotifyClient::from_config_obj(config)
        .context("Failed to create the Spotify client")?;
    let sink = HomeAssistantSink::from_config_obj(config)?;
    info!("Using Home Assistant at {}", sink.base_url());

    let player = PodcastPlayer::new(
        EpisodeResolver::new(client),
        PlaybackSequencer::new(Arc::new(sink)),
        config.get_podcast_defaults(),
    );

    let outcome = player.play_filtered_episode(request).await?;
    let code = match &outcome {
        PlayOutcome::Played { episode, ack } => {
            println!("▶️  {} → {}", episode.name, ack.target);
            ExitCode::SUCCESS
        }
        PlayOutcome::NoMatch {
            filter,
            episodes_checked,
        } => {
            println!(
                "No episode matching '{}' in the last {} episodes",
                filter, episodes_checked
            );
            ExitCode::from(NO_MATCH_EXIT_CODE)
        }
    };

    // le runtime s'arrête avec main : laisser le seek différé aboutir
    outcome.settled().await;
    Ok(code)
}

async fn episodes(
    config: &Config,
    podcast_url: Option<String>,
    limit: u32,
    filter: Option<String>,
) -> Result<()> {
    let podcast_url = podcast_url
        .filter(|url| !url.trim().is_empty())
        .or_else(|| config.get_podcast_url())
        .ok_or_else(|| anyhow!("No podcast URL provided"))?;
    let show_id = ShowId::from_reference(&podcast_url)?;

    let client = SpotifyClient::from_config_obj(config)
        .context("Failed to create the Spotify client")?;

    let show = client.get_show(show_id.as_str()).await?;
    println!("📻 {}", show.name);
    println!("   Publisher: {}", show.publisher);
    println!("   Total episodes: {}", show.total_episodes);
    println!("   {}", excerpt(&show.description));
    println!();

    let resolver = EpisodeResolver::new(client);
    let window = resolver.fetch_window(&podcast_url, limit).await?;

    match filter {
        None => {
            println!("Latest {} episodes:", window.len());
            for (i, episode) in window.iter().enumerate() {
                print_episode(i + 1, episode);
            }
        }
        Some(keyword) => {
            let filter = FilterSpec::new(keyword)?;
            let matches = matching_episodes(&window, &filter);
            if matches.is_empty() {
                println!(
                    "No episode matching '{}' in the last {} episodes",
                    filter,
                    window.len()
                );
                return Ok(());
            }

            println!("Episodes matching '{}':", filter);
            for (i, episode) in matches.iter().enumerate() {
                print_episode(i + 1, episode);
            }
            println!("To play the first match:");
            println!(
                "  pmopodcast play <entity_id> --podcast-url '{}' --filter '{}' --episodes-to-check {}",
                podcast_url, filter, limit
            );
        }
    }
    Ok(())
}

async fn check_credentials(config: &Config) -> Result<ExitCode> {
    let client = SpotifyClient::from_config_obj(config)
        .context("Failed to create the Spotify client")?;

    match client.validate_credentials().await {
        Ok(()) => {
            println!("✅ Spotify credentials are valid ({})", client.api().client_id());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_auth_error() => {
            error!("Spotify authentication failed: {}", e);
            println!("❌ Invalid Spotify credentials: {}", e);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_episode(index: usize, episode: &Episode) {
    println!("{:>3}. {}", index, episode.name);
    println!(
        "     {} | {} min | {}",
        episode.release_date,
        episode.duration.as_secs() / 60,
        episode.uri
    );
    if !episode.description.is_empty() {
        println!("     {}", excerpt(&episode.description));
    }
}

fn excerpt(text: &str) -> String {
    let text = text.trim();
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
