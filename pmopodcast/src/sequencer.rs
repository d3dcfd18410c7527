//! Séquenceur de lecture
//!
//! Envoie la commande de lecture, puis, si une position de départ est
//! demandée, planifie un seek différé dans une tâche détachée. Le lecteur a
//! besoin d'un délai de stabilisation après `play_media` avant d'accepter un
//! seek.
//!
//! ```text
//! play(target, episode, offset)
//!   ├─ device.play(...)           (attendu, erreur propagée)
//!   └─ offset > 0 ?
//!        └─ spawn: sleep(SETTLE_DELAY) → device.seek(...)   (erreur journalisée)
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::device::DeviceSink;
use crate::error::Result;
use crate::model::{Episode, PlaybackRequest};

/// Délai entre la commande de lecture et le seek
pub const SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Seek planifié après une lecture
///
/// La tâche est détachée : la lâcher ne l'annule pas. [`ScheduledSeek::settled`]
/// permet seulement d'attendre sa fin, son issue n'est jamais remontée.
#[derive(Debug)]
pub struct ScheduledSeek {
    position_seconds: u64,
    handle: JoinHandle<()>,
}

impl ScheduledSeek {
    pub fn position_seconds(&self) -> u64 {
        self.position_seconds
    }

    /// Attend la fin du seek (réussi ou non)
    pub async fn settled(self) {
        if let Err(e) = self.handle.await {
            warn!("Delayed seek task did not complete: {}", e);
        }
    }
}

/// Accusé de réception d'une commande de lecture acceptée
#[derive(Debug)]
pub struct PlaybackAck {
    pub target: String,
    pub content_reference: String,
    /// Présent quand une position de départ non nulle a été demandée
    pub seek: Option<ScheduledSeek>,
}

impl PlaybackAck {
    /// Attend le seek éventuel
    pub async fn settled(self) {
        if let Some(seek) = self.seek {
            seek.settled().await;
        }
    }
}

/// Séquenceur play → seek différé
pub struct PlaybackSequencer<D: ?Sized> {
    device: Arc<D>,
}

impl<D: DeviceSink + ?Sized + 'static> PlaybackSequencer<D> {
    pub fn new(device: Arc<D>) -> Self {
        Self { device }
    }

    /// Joue `episode` sur `target` à partir de `offset_seconds`
    pub async fn play(
        &self,
        target: &str,
        episode: &Episode,
        offset_seconds: u64,
    ) -> Result<PlaybackAck> {
        self.execute(PlaybackRequest::new(target, episode, offset_seconds))
            .await
    }

    /// Exécute une requête de lecture
    ///
    /// Retourne dès que le lecteur a accepté la commande de lecture, sans
    /// attendre le seek.
    ///
    /// # Errors
    ///
    /// [`PodcastError::Device`](crate::PodcastError::Device) si le lecteur
    /// refuse la lecture. Aucun seek n'est alors planifié.
    pub async fn execute(&self, request: PlaybackRequest) -> Result<PlaybackAck> {
        self.device.play(&request.play_command()).await?;
        info!(
            "Playing {} on {}",
            request.content_reference, request.target
        );

        let seek = request.seek_command().map(|command| {
            let device = Arc::clone(&self.device);
            let position_seconds = command.position_seconds;
            let handle = tokio::spawn(async move {
                tokio::time::sleep(SETTLE_DELAY).await;
                match device.seek(&command).await {
                    Ok(()) => info!(
                        "Seeked {} to {} seconds",
                        command.target, command.position_seconds
                    ),
                    Err(e) => warn!(
                        "Failed to seek {} to {} seconds: {}",
                        command.target, command.position_seconds, e
                    ),
                }
            });
            ScheduledSeek {
                position_seconds,
                handle,
            }
        });

        Ok(PlaybackAck {
            target: request.target,
            content_reference: request.content_reference,
            seek,
        })
    }
}
