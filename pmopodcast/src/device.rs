//! Commandes envoyées au lecteur distant

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DeviceError;
use crate::model::{EPISODE_CONTENT_TYPE, PlaybackRequest};

/// Demande de lecture d'un contenu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCommand {
    pub target: String,
    pub content_reference: String,
    pub content_type: String,
}

/// Demande de déplacement dans le contenu en cours
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeekCommand {
    pub target: String,
    pub position_seconds: u64,
}

impl PlaybackRequest {
    pub fn play_command(&self) -> PlayCommand {
        PlayCommand {
            target: self.target.clone(),
            content_reference: self.content_reference.clone(),
            content_type: EPISODE_CONTENT_TYPE.to_string(),
        }
    }

    /// `None` quand la lecture démarre au début
    pub fn seek_command(&self) -> Option<SeekCommand> {
        self.needs_seek().then(|| SeekCommand {
            target: self.target.clone(),
            position_seconds: self.start_offset,
        })
    }
}

/// Lecteur capable de jouer un contenu et de s'y déplacer
///
/// Les appels ne sont pas rejoués en cas d'échec.
#[async_trait]
pub trait DeviceSink: Send + Sync {
    async fn play(&self, command: &PlayCommand) -> Result<(), DeviceError>;

    async fn seek(&self, command: &SeekCommand) -> Result<(), DeviceError>;
}

#[async_trait]
impl<D: DeviceSink + ?Sized> DeviceSink for Arc<D> {
    async fn play(&self, command: &PlayCommand) -> Result<(), DeviceError> {
        (**self).play(command).await
    }

    async fn seek(&self, command: &SeekCommand) -> Result<(), DeviceError> {
        (**self).seek(command).await
    }
}
