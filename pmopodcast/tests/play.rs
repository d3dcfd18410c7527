use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pmopodcast::{
    CatalogError, DeviceError, DeviceSink, Episode, EpisodeResolver, EpisodeSource, FilterSpec,
    PlayCommand, PlayFilteredEpisode, PlayOutcome, PlaybackSequencer, PodcastDefaults,
    PodcastError, PodcastPlayer, SETTLE_DELAY, SeekCommand, ShowId,
};
use tokio::time::Instant;

const SHOW_URL: &str = "https://open.spotify.com/show/0onVY7weTsqjZLM8y3Tt9A";
const KITCHEN: &str = "media_player.kitchen";

// ============ Fakes ============

#[derive(Default)]
struct FakeSource {
    episodes: Vec<Episode>,
    fail: bool,
    calls: AtomicUsize,
    limits: Mutex<Vec<u32>>,
}

impl FakeSource {
    fn with(episodes: Vec<Episode>) -> Arc<Self> {
        Arc::new(Self {
            episodes,
            ..Default::default()
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Default::default()
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EpisodeSource for FakeSource {
    async fn fetch_episodes(
        &self,
        show_id: &ShowId,
        offset: Option<u32>,
        limit: u32,
    ) -> Result<Vec<Episode>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.limits.lock().unwrap().push(limit);
        assert_eq!(show_id.as_str(), "0onVY7weTsqjZLM8y3Tt9A");
        assert_eq!(offset, None);
        if self.fail {
            return Err(CatalogError::Other("connection reset".into()));
        }
        Ok(self.episodes.iter().take(limit as usize).cloned().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Sent {
    Play(PlayCommand),
    Seek(SeekCommand, Duration),
}

struct RecordingSink {
    started: Instant,
    sent: Mutex<Vec<Sent>>,
    fail_play: bool,
    fail_seek: bool,
}

impl RecordingSink {
    fn new() -> Arc<Self> {
        Self::build(false, false)
    }

    fn build(fail_play: bool, fail_seek: bool) -> Arc<Self> {
        Arc::new(Self {
            started: Instant::now(),
            sent: Mutex::new(Vec::new()),
            fail_play,
            fail_seek,
        })
    }

    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeviceSink for RecordingSink {
    async fn play(&self, command: &PlayCommand) -> Result<(), DeviceError> {
        self.sent.lock().unwrap().push(Sent::Play(command.clone()));
        if self.fail_play {
            return Err(DeviceError::Other("entity unavailable".into()));
        }
        Ok(())
    }

    async fn seek(&self, command: &SeekCommand) -> Result<(), DeviceError> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Seek(command.clone(), self.started.elapsed()));
        if self.fail_seek {
            return Err(DeviceError::Other("seek not supported".into()));
        }
        Ok(())
    }
}

fn episode(id: &str, name: &str, description: &str) -> Episode {
    Episode::new(id, format!("spotify:episode:{id}"), name).with_description(description)
}

fn play_command(id: &str) -> Sent {
    Sent::Play(PlayCommand {
        target: KITCHEN.into(),
        content_reference: format!("spotify:episode:{id}"),
        content_type: "episode".into(),
    })
}

fn player(
    source: Arc<FakeSource>,
    sink: Arc<RecordingSink>,
) -> PodcastPlayer<Arc<FakeSource>, RecordingSink> {
    PodcastPlayer::new(
        EpisodeResolver::new(source),
        PlaybackSequencer::new(sink),
        PodcastDefaults {
            podcast_url: Some(SHOW_URL.into()),
            filter_keywords: "Headlines:".into(),
        },
    )
}

// ============ Resolver ============

#[tokio::test]
async fn single_match_in_title_is_resolved() {
    let resolver = EpisodeResolver::new(FakeSource::with(vec![
        episode("e1", "Sports", ""),
        episode("e2", "Weather report", ""),
        episode("e3", "Market close", ""),
    ]));
    let filter = FilterSpec::new("weather").unwrap();

    let found = resolver.resolve(SHOW_URL, &filter, 5).await.unwrap();
    assert_eq!(found.unwrap().id, "e2");
}

#[tokio::test]
async fn first_match_in_returned_order_wins() {
    let resolver = EpisodeResolver::new(FakeSource::with(vec![
        episode("e1", "News Update", ""),
        episode("e2", "Headlines: Monday", ""),
        episode("e3", "Headlines: Sunday", ""),
    ]));
    let filter = FilterSpec::new("Headlines:").unwrap();

    let found = resolver.resolve(SHOW_URL, &filter, 5).await.unwrap();
    assert_eq!(found.unwrap().id, "e2");
}

#[tokio::test]
async fn description_match_counts() {
    let resolver = EpisodeResolver::new(FakeSource::with(vec![
        episode("e1", "Morning edition", "Today's Headlines: the vote"),
        episode("e2", "Headlines: Sunday", ""),
    ]));
    let filter = FilterSpec::new("headlines:").unwrap();

    let found = resolver.resolve(SHOW_URL, &filter, 5).await.unwrap();
    assert_eq!(found.unwrap().id, "e1");
}

#[tokio::test]
async fn no_match_and_empty_window_are_not_found() {
    let filter = FilterSpec::new("Headlines:").unwrap();

    let resolver = EpisodeResolver::new(FakeSource::with(vec![episode("e1", "Sports", "Scores")]));
    assert!(resolver.resolve(SHOW_URL, &filter, 5).await.unwrap().is_none());

    let resolver = EpisodeResolver::new(FakeSource::with(Vec::new()));
    assert!(resolver.resolve(SHOW_URL, &filter, 5).await.unwrap().is_none());
}

#[tokio::test]
async fn matches_outside_window_are_ignored() {
    let source = FakeSource::with(vec![
        episode("e1", "Sports", ""),
        episode("e2", "Weather", ""),
        episode("e3", "Headlines: old", ""),
    ]);
    let resolver = EpisodeResolver::new(source.clone());
    let filter = FilterSpec::new("Headlines:").unwrap();

    assert!(resolver.resolve(SHOW_URL, &filter, 2).await.unwrap().is_none());
    assert_eq!(*source.limits.lock().unwrap(), vec![2]);
}

#[tokio::test]
async fn invalid_reference_never_reaches_catalog() {
    let source = FakeSource::with(vec![episode("e1", "Headlines: Monday", "")]);
    let resolver = EpisodeResolver::new(source.clone());
    let filter = FilterSpec::default();

    let err = resolver
        .resolve("https://open.spotify.com/episode/abc", &filter, 5)
        .await
        .unwrap_err();
    assert!(matches!(err, PodcastError::InvalidReference(_)));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn zero_window_is_rejected() {
    let source = FakeSource::with(Vec::new());
    let resolver = EpisodeResolver::new(source.clone());

    let err = resolver
        .resolve(SHOW_URL, &FilterSpec::default(), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, PodcastError::InvalidWindow(0)));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn catalog_failure_is_a_source_error() {
    let source = FakeSource::failing();
    let resolver = EpisodeResolver::new(source.clone());

    let err = resolver
        .resolve(SHOW_URL, &FilterSpec::default(), 5)
        .await
        .unwrap_err();
    assert!(matches!(err, PodcastError::Source(CatalogError::Other(_))));
    assert_eq!(source.calls(), 1);
}

// ============ Sequencer ============

#[tokio::test(start_paused = true)]
async fn play_from_start_sends_only_play() {
    let sink = RecordingSink::new();
    let sequencer = PlaybackSequencer::new(sink.clone());

    let ack = sequencer
        .play(KITCHEN, &episode("e1", "Headlines: Monday", ""), 0)
        .await
        .unwrap();
    assert!(ack.seek.is_none());

    tokio::time::sleep(SETTLE_DELAY * 5).await;
    assert_eq!(sink.sent(), vec![play_command("e1")]);
}

#[tokio::test(start_paused = true)]
async fn play_with_offset_seeks_after_settle_delay() {
    let sink = RecordingSink::new();
    let sequencer = PlaybackSequencer::new(sink.clone());

    let ack = sequencer
        .play(KITCHEN, &episode("e1", "Headlines: Monday", ""), 30)
        .await
        .unwrap();

    // play returns before the seek is sent
    assert_eq!(sink.sent(), vec![play_command("e1")]);

    ack.settled().await;
    let sent = sink.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], play_command("e1"));
    match &sent[1] {
        Sent::Seek(command, at) => {
            assert_eq!(command.target, KITCHEN);
            assert_eq!(command.position_seconds, 30);
            assert!(*at >= SETTLE_DELAY);
        }
        other => panic!("expected a seek, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn failed_play_schedules_no_seek() {
    let sink = RecordingSink::build(true, false);
    let sequencer = PlaybackSequencer::new(sink.clone());

    let err = sequencer
        .play(KITCHEN, &episode("e1", "Headlines: Monday", ""), 30)
        .await
        .unwrap_err();
    assert!(matches!(err, PodcastError::Device(_)));

    tokio::time::sleep(SETTLE_DELAY * 5).await;
    assert_eq!(sink.sent(), vec![play_command("e1")]);
}

#[tokio::test(start_paused = true)]
async fn failed_seek_is_not_reported() {
    let sink = RecordingSink::build(false, true);
    let sequencer = PlaybackSequencer::new(sink.clone());

    let ack = sequencer
        .play(KITCHEN, &episode("e1", "Headlines: Monday", ""), 30)
        .await
        .unwrap();
    let seek = ack.seek.expect("seek scheduled");
    seek.settled().await;

    assert_eq!(sink.sent().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn dropped_ack_does_not_cancel_seek() {
    let sink = RecordingSink::new();
    let sequencer = PlaybackSequencer::new(sink.clone());

    drop(
        sequencer
            .play(KITCHEN, &episode("e1", "Headlines: Monday", ""), 45)
            .await
            .unwrap(),
    );

    tokio::time::sleep(SETTLE_DELAY + Duration::from_millis(10)).await;
    assert!(matches!(
        sink.sent().last(),
        Some(Sent::Seek(command, _)) if command.position_seconds == 45
    ));
}

// ============ Service ============

#[tokio::test(start_paused = true)]
async fn play_filtered_episode_uses_configured_defaults() {
    let source = FakeSource::with(vec![
        episode("e1", "News Update", ""),
        episode("e2", "Headlines: Monday", ""),
    ]);
    let sink = RecordingSink::new();
    let player = player(source, sink.clone());

    let outcome = player
        .play_filtered_episode(PlayFilteredEpisode::new(KITCHEN))
        .await
        .unwrap();
    assert_eq!(outcome.episode().map(|e| e.id.as_str()), Some("e2"));

    outcome.settled().await;
    assert_eq!(sink.sent(), vec![play_command("e2")]);
}

#[tokio::test(start_paused = true)]
async fn play_filtered_episode_overrides_filter() {
    let source = FakeSource::with(vec![
        episode("e1", "Weather", ""),
        episode("e2", "Headlines: Monday", ""),
    ]);
    let sink = RecordingSink::new();
    let player = player(source, sink.clone());

    let outcome = player
        .play_filtered_episode(
            PlayFilteredEpisode::new(KITCHEN)
                .podcast_url(SHOW_URL)
                .filter_keywords("WEATHER")
                .start_time(15),
        )
        .await
        .unwrap();
    assert_eq!(outcome.episode().map(|e| e.id.as_str()), Some("e1"));

    outcome.settled().await;
    let sent = sink.sent();
    assert_eq!(sent.len(), 2);
    assert!(matches!(&sent[1], Sent::Seek(command, _) if command.position_seconds == 15));
}

#[tokio::test]
async fn no_match_sends_nothing() {
    let source = FakeSource::with(vec![episode("e1", "Sports", "")]);
    let sink = RecordingSink::new();
    let player = player(source, sink.clone());

    let outcome = player
        .play_filtered_episode(PlayFilteredEpisode::new(KITCHEN).start_time(30))
        .await
        .unwrap();
    match outcome {
        PlayOutcome::NoMatch {
            filter,
            episodes_checked,
        } => {
            assert_eq!(filter, "Headlines:");
            assert_eq!(episodes_checked, 5);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(sink.sent().is_empty());
}

#[tokio::test]
async fn missing_podcast_url_is_reported() {
    let source = FakeSource::with(Vec::new());
    let sink = RecordingSink::new();
    let player = PodcastPlayer::new(
        EpisodeResolver::new(source.clone()),
        PlaybackSequencer::new(sink),
        PodcastDefaults::default(),
    );

    let err = player
        .play_filtered_episode(PlayFilteredEpisode::new(KITCHEN).podcast_url(""))
        .await
        .unwrap_err();
    assert!(matches!(err, PodcastError::MissingPodcastUrl));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn empty_configured_filter_is_missing() {
    let source = FakeSource::with(Vec::new());
    let player = PodcastPlayer::new(
        EpisodeResolver::new(source.clone()),
        PlaybackSequencer::new(RecordingSink::new()),
        PodcastDefaults {
            podcast_url: Some(SHOW_URL.into()),
            filter_keywords: String::new(),
        },
    );

    let err = player
        .play_filtered_episode(PlayFilteredEpisode::new(KITCHEN))
        .await
        .unwrap_err();
    assert!(matches!(err, PodcastError::MissingFilter));
    assert_eq!(source.calls(), 0);
}
